use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::WithRejection;
use tracing::{info, warn};

use insight_store::{EntityKind, StoreError};
use insight_types::api::{Claims, CreateCommentRequest, LikeResponse};
use insight_types::models::NewComment;

use crate::error::{ApiError, parse_id};
use crate::state::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let blog_id = parse_id(&id, "blog")?;
    if state.store.get_blog(blog_id)?.is_none() {
        return Err(ApiError::NotFound("Blog not found".into()));
    }

    Ok(Json(state.store.comments_for_blog(blog_id)?))
}

/// Post a comment, or a reply when `parentId` names a root comment of
/// the same blog.
pub async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(claims): Extension<Claims>,
    WithRejection(Json(req), _): WithRejection<Json<CreateCommentRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    let blog_id = parse_id(&id, "blog")?;

    let name = req.name.trim();
    let content = req.content.trim();
    if name.is_empty() || content.is_empty() {
        warn!(blog_id, user_id = claims.sub, "Rejected comment with empty fields");
        return Err(ApiError::BadRequest("Invalid comment data".into()));
    }

    if let Some(parent_id) = req.parent_id {
        let parent = state.store.get_comment(parent_id)?;
        let valid = parent.is_some_and(|p| p.blog_id == blog_id && p.parent_id.is_none());
        if !valid {
            warn!(blog_id, parent_id, "Rejected reply to unknown parent");
            return Err(ApiError::BadRequest("Invalid parent comment".into()));
        }
    }

    let comment = state
        .store
        .create_comment(NewComment {
            blog_id,
            name: name.to_string(),
            avatar: req.avatar,
            content: content.to_string(),
            parent_id: req.parent_id,
        })
        .map_err(|e| match e {
            StoreError::DanglingReference {
                kind: EntityKind::Blog,
                ..
            } => ApiError::NotFound("Blog not found".into()),
            other => other.into(),
        })?;

    info!(comment_id = comment.id, blog_id, user_id = claims.sub, "Comment added");
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn like_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    update_likes(&state, &id, true)
}

pub async fn unlike_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    update_likes(&state, &id, false)
}

fn update_likes(state: &AppState, raw_id: &str, increment: bool) -> Result<Json<LikeResponse>, ApiError> {
    let id = parse_id(raw_id, "comment")?;
    let like_count = state
        .store
        .update_comment_likes(id, increment)?
        .ok_or_else(|| ApiError::NotFound("Comment not found".into()))?;

    let message = if increment {
        "Comment liked successfully"
    } else {
        "Comment unliked successfully"
    };
    Ok(Json(LikeResponse {
        message: message.into(),
        like_count,
    }))
}
