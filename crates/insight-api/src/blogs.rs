use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use tracing::debug;

use insight_store::store::DEFAULT_RELATED_LIMIT;
use insight_types::api::LikeResponse;

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

const MAX_RELATED_LIMIT: usize = 20;

#[derive(Debug, Deserialize)]
pub struct BlogQuery {
    /// Category slug to filter by.
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    pub limit: Option<usize>,
}

pub async fn list_blogs(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<BlogQuery>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let blogs = match query.category {
        Some(slug) => {
            let category = state
                .store
                .get_category_by_slug(&slug)?
                .ok_or_else(|| ApiError::NotFound("Category not found".into()))?;
            state.store.blogs_in_category(category.id)?
        }
        None => state.store.list_blogs()?,
    };

    Ok(Json(blogs))
}

pub async fn featured_blog(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let blog = state
        .store
        .featured_blog()?
        .ok_or_else(|| ApiError::NotFound("No featured blog found".into()))?;

    Ok(Json(blog))
}

/// Fetch a blog by id and count the view. The response shows the blog as
/// it was before this view.
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "blog")?;
    let blog = state
        .store
        .get_blog(id)?
        .ok_or_else(|| ApiError::NotFound("Blog not found".into()))?;

    let views = state.store.increment_views(id)?;
    debug!(blog_id = id, ?views, "Blog viewed");

    Ok(Json(blog))
}

pub async fn get_blog_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let blog = state
        .store
        .get_blog_by_slug(&slug)?
        .ok_or_else(|| ApiError::NotFound("Blog not found".into()))?;

    let views = state.store.increment_views(blog.blog.id)?;
    debug!(blog_id = blog.blog.id, ?views, "Blog viewed");

    Ok(Json(blog))
}

pub async fn related_blogs(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Query(query), _): WithRejection<Query<RelatedQuery>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let id = parse_id(&id, "blog")?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RELATED_LIMIT)
        .min(MAX_RELATED_LIMIT);

    Ok(Json(state.store.related_blogs(id, limit)?))
}

pub async fn like_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    update_likes(&state, &id, true)
}

pub async fn unlike_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    update_likes(&state, &id, false)
}

fn update_likes(state: &AppState, raw_id: &str, increment: bool) -> Result<Json<LikeResponse>, ApiError> {
    let id = parse_id(raw_id, "blog")?;
    let like_count = state
        .store
        .update_blog_likes(id, increment)?
        .ok_or_else(|| ApiError::NotFound("Blog not found".into()))?;

    let message = if increment {
        "Blog liked successfully"
    } else {
        "Blog unliked successfully"
    };
    Ok(Json(LikeResponse {
        message: message.into(),
        like_count,
    }))
}
