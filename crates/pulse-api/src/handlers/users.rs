//! User handlers
//!
//! Endpoints for the current user, public profiles, and user search.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use pulse_service::{
    CurrentUserResponse, ProfileResponse, UpdateUserRequest, UserResponse, UserService,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Get current user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update current user's profile
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_user(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Get a user's profile with social counts
///
/// GET /users/{user_id}
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = user_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid user_id format"))?;

    let service = UserService::new(state.service_context());
    let response = service.get_profile(auth.user_id, user_id).await?;
    Ok(Json(response))
}

/// Look up a user by handle
///
/// GET /users/by-handle/{handle}
pub async fn get_by_handle(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(handle): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_by_handle(&handle).await?;
    Ok(Json(response))
}

/// User search query parameters
#[derive(Debug, serde::Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Search users by handle prefix
///
/// GET /users/search?q=...
pub async fn search(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let response = service.search(&params.q, params.limit.unwrap_or(20)).await?;
    Ok(Json(response))
}
