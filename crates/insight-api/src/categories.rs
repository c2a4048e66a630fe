use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use insight_types::api::CategoryDetail;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(default)]
    pub include_blogs: bool,
}

pub async fn list_categories(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.store.list_categories()?))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<CategoryQuery>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let category = state
        .store
        .get_category_by_slug(&slug)?
        .ok_or_else(|| ApiError::NotFound("Category not found".into()))?;

    let blogs = if query.include_blogs {
        Some(state.store.blogs_in_category(category.id)?)
    } else {
        None
    };

    Ok(Json(CategoryDetail { category, blogs }))
}
