//! Reel handlers
//!
//! Endpoints for publishing and browsing short-form video.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_core::LikeTarget;
use pulse_service::{
    CreateReelRequest, LikeService, LikeToggleResponse, ReelResponse, ReelService,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Publish a reel
///
/// POST /reels
pub async fn create_reel(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateReelRequest>,
) -> ApiResult<Created<Json<ReelResponse>>> {
    let service = ReelService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Recent reels across the network
///
/// GET /reels
pub async fn explore(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ReelResponse>>> {
    let service = ReelService::new(state.service_context());
    let response = service.explore(auth.user_id, pagination.feed_query()).await?;
    Ok(Json(response))
}

/// Get a reel by ID
///
/// GET /reels/{reel_id}
pub async fn get_reel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(reel_id): Path<String>,
) -> ApiResult<Json<ReelResponse>> {
    let reel_id = reel_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid reel_id format"))?;

    let service = ReelService::new(state.service_context());
    let response = service.get(auth.user_id, reel_id).await?;
    Ok(Json(response))
}

/// Delete a reel
///
/// DELETE /reels/{reel_id}
pub async fn delete_reel(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(reel_id): Path<String>,
) -> ApiResult<NoContent> {
    let reel_id = reel_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid reel_id format"))?;

    let service = ReelService::new(state.service_context());
    service.delete(auth.user_id, reel_id).await?;
    Ok(NoContent)
}

/// Reels by one author
///
/// GET /users/{user_id}/reels
pub async fn reels_by_author(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ReelResponse>>> {
    let author_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = ReelService::new(state.service_context());
    let response = service
        .by_author(auth.user_id, author_id, pagination.feed_query())
        .await?;
    Ok(Json(response))
}

/// Toggle a like on a reel
///
/// POST /reels/{reel_id}/likes
pub async fn toggle_reel_like(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(reel_id): Path<String>,
) -> ApiResult<Json<LikeToggleResponse>> {
    let reel_id = reel_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid reel_id format"))?;

    let service = LikeService::new(state.service_context());
    let response = service
        .toggle(auth.user_id, LikeTarget::Reel, reel_id)
        .await?;
    Ok(Json(response))
}
