//! Follow graph handlers
//!
//! Endpoints for following, follow requests, blocking, and follower lists.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_service::{FollowResponse, FollowService, UserResponse};

use crate::extractors::{AuthUser, Pagination};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Follow a user
///
/// POST /users/{user_id}/follow
pub async fn follow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Created<Json<FollowResponse>>> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = FollowService::new(state.service_context());
    let response = service.follow(auth.user_id, user_id).await?;
    Ok(Created(Json(response)))
}

/// Unfollow a user (or cancel a pending request)
///
/// DELETE /users/{user_id}/follow
pub async fn unfollow(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = FollowService::new(state.service_context());
    service.unfollow(auth.user_id, user_id).await?;
    Ok(NoContent)
}

/// Remove one of the caller's followers
///
/// DELETE /users/@me/followers/{user_id}
pub async fn remove_follower(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = FollowService::new(state.service_context());
    service.remove_follower(auth.user_id, user_id).await?;
    Ok(NoContent)
}

/// Block a user
///
/// POST /users/{user_id}/block
pub async fn block(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = FollowService::new(state.service_context());
    service.block(auth.user_id, user_id).await?;
    Ok(NoContent)
}

/// Unblock a user
///
/// DELETE /users/{user_id}/block
pub async fn unblock(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = FollowService::new(state.service_context());
    service.unblock(auth.user_id, user_id).await?;
    Ok(NoContent)
}

/// Accepted followers of a user
///
/// GET /users/{user_id}/followers
pub async fn followers(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = FollowService::new(state.service_context());
    let response = service.followers(user_id, pagination.feed_query()).await?;
    Ok(Json(response))
}

/// Users a user follows
///
/// GET /users/{user_id}/following
pub async fn following(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(user_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = FollowService::new(state.service_context());
    let response = service.following(user_id, pagination.feed_query()).await?;
    Ok(Json(response))
}

/// A pending follow request with the requester's profile
#[derive(Debug, serde::Serialize)]
pub struct FollowRequestEntry {
    pub follow: FollowResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester: Option<UserResponse>,
}

/// Pending incoming follow requests for the caller
///
/// GET /follows/requests
pub async fn pending_requests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<FollowRequestEntry>>> {
    let service = FollowService::new(state.service_context());
    let requests = service.pending_requests(auth.user_id).await?;

    let entries = requests
        .into_iter()
        .map(|(follow, requester)| FollowRequestEntry { follow, requester })
        .collect();
    Ok(Json(entries))
}

/// Accept a pending follow request
///
/// POST /follows/requests/{user_id}/accept
pub async fn accept_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<FollowResponse>> {
    let follower_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = FollowService::new(state.service_context());
    let response = service.accept(auth.user_id, follower_id).await?;
    Ok(Json(response))
}

/// Decline a pending follow request
///
/// POST /follows/requests/{user_id}/decline
pub async fn decline_request(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<NoContent> {
    let follower_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = FollowService::new(state.service_context());
    service.decline(auth.user_id, follower_id).await?;
    Ok(NoContent)
}
