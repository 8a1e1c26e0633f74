//! Comment handlers
//!
//! Endpoints for comments, one-level replies, and comment likes.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_core::LikeTarget;
use pulse_service::{
    CommentResponse, CommentService, CreateCommentRequest, LikeService, LikeToggleResponse,
    UpdateCommentRequest,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comment on a post (or reply to a top-level comment via parent_id)
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let post_id = post_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid post_id format"))?;

    let service = CommentService::new(state.service_context());
    let response = service.create(auth.user_id, post_id, request).await?;
    Ok(Created(Json(response)))
}

/// Top-level comments on a post
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let post_id = post_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid post_id format"))?;

    let service = CommentService::new(state.service_context());
    let response = service
        .list(auth.user_id, post_id, pagination.feed_query())
        .await?;
    Ok(Json(response))
}

/// Replies to a top-level comment
///
/// GET /comments/{comment_id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comment_id = comment_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))?;

    let service = CommentService::new(state.service_context());
    let response = service
        .replies(auth.user_id, comment_id, pagination.feed_query())
        .await?;
    Ok(Json(response))
}

/// Edit a comment
///
/// PATCH /comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment_id = comment_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))?;

    let service = CommentService::new(state.service_context());
    let response = service.update(auth.user_id, comment_id, request).await?;
    Ok(Json(response))
}

/// Delete a comment (comment author or post author)
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<NoContent> {
    let comment_id = comment_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))?;

    let service = CommentService::new(state.service_context());
    service.delete(auth.user_id, comment_id).await?;
    Ok(NoContent)
}

/// Toggle a like on a comment
///
/// POST /comments/{comment_id}/likes
pub async fn toggle_comment_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<Json<LikeToggleResponse>> {
    let comment_id = comment_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))?;

    let service = LikeService::new(state.service_context());
    let response = service
        .toggle(auth.user_id, LikeTarget::Comment, comment_id)
        .await?;
    Ok(Json(response))
}
