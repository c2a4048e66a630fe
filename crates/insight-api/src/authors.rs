use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

pub async fn list_authors(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.list_authors()?))
}

pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "author")?;
    let author = state
        .store
        .get_author(id)?
        .ok_or_else(|| ApiError::NotFound("Author not found".into()))?;

    Ok(Json(author))
}
