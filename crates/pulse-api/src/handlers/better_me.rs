//! Better Me handlers
//!
//! Endpoints for health profiles and AI-generated wellness plans.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_service::{
    BetterMeService, GeneratePlanRequest, HealthProfileResponse, PlanResponse,
    UpsertHealthProfileRequest,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// The caller's health profile
///
/// GET /better-me/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<HealthProfileResponse>> {
    let service = BetterMeService::new(state.service_context());
    let response = service.get_profile(auth.user_id).await?;
    Ok(Json(response))
}

/// Create or replace the caller's health profile
///
/// PUT /better-me/profile
pub async fn upsert_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpsertHealthProfileRequest>,
) -> ApiResult<Json<HealthProfileResponse>> {
    let service = BetterMeService::new(state.service_context());
    let response = service.upsert_profile(auth.user_id, request).await?;
    Ok(Json(response))
}

/// Generate a meal or workout plan
///
/// POST /better-me/plans
pub async fn generate_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<GeneratePlanRequest>,
) -> ApiResult<Created<Json<PlanResponse>>> {
    let service = BetterMeService::new(state.service_context());
    let response = service.generate_plan(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// The caller's plans, newest first
///
/// GET /better-me/plans
pub async fn list_plans(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<PlanResponse>>> {
    let service = BetterMeService::new(state.service_context());
    let response = service
        .list_plans(auth.user_id, pagination.feed_query())
        .await?;
    Ok(Json(response))
}

/// Get one of the caller's plans
///
/// GET /better-me/plans/{plan_id}
pub async fn get_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<String>,
) -> ApiResult<Json<PlanResponse>> {
    let plan_id = plan_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid plan_id format"))?;

    let service = BetterMeService::new(state.service_context());
    let response = service.get_plan(auth.user_id, plan_id).await?;
    Ok(Json(response))
}

/// Delete one of the caller's plans
///
/// DELETE /better-me/plans/{plan_id}
pub async fn delete_plan(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(plan_id): Path<String>,
) -> ApiResult<NoContent> {
    let plan_id = plan_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid plan_id format"))?;

    let service = BetterMeService::new(state.service_context());
    service.delete_plan(auth.user_id, plan_id).await?;
    Ok(NoContent)
}
