//! Post handlers
//!
//! Endpoints for post CRUD, the home feed, and post likes.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_core::LikeTarget;
use pulse_service::{
    CreatePostRequest, LikeService, LikeToggleResponse, PostResponse, PostService,
    UpdatePostRequest,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get a post by ID
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = post_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid post_id format"))?;

    let service = PostService::new(state.service_context());
    let response = service.get(auth.user_id, post_id).await?;
    Ok(Json(response))
}

/// Edit a post
///
/// PATCH /posts/{post_id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let post_id = post_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid post_id format"))?;

    let service = PostService::new(state.service_context());
    let response = service.update(auth.user_id, post_id, request).await?;
    Ok(Json(response))
}

/// Delete a post
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<NoContent> {
    let post_id = post_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid post_id format"))?;

    let service = PostService::new(state.service_context());
    service.delete(auth.user_id, post_id).await?;
    Ok(NoContent)
}

/// Home feed for the caller
///
/// GET /feed
pub async fn feed(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let response = service.feed(auth.user_id, pagination.feed_query()).await?;
    Ok(Json(response))
}

/// Posts by one author
///
/// GET /users/{user_id}/posts
pub async fn posts_by_author(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PostResponse>>> {
    let author_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = PostService::new(state.service_context());
    let response = service
        .by_author(auth.user_id, author_id, pagination.feed_query())
        .await?;
    Ok(Json(response))
}

/// Toggle a like on a post
///
/// POST /posts/{post_id}/likes
pub async fn toggle_post_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(post_id): Path<String>,
) -> ApiResult<Json<LikeToggleResponse>> {
    let post_id = post_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid post_id format"))?;

    let service = LikeService::new(state.service_context());
    let response = service
        .toggle(auth.user_id, LikeTarget::Post, post_id)
        .await?;
    Ok(Json(response))
}
