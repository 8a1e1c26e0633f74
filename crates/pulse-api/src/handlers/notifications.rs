//! Notification handlers
//!
//! Endpoints for listing notifications and read state.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_service::{NotificationResponse, NotificationService, UnreadCountResponse};

use crate::extractors::{AuthUser, Pagination};
use crate::response::{ApiError, ApiResult, NoContent};
use crate::state::AppState;

/// The caller's notifications, newest first
///
/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let service = NotificationService::new(state.service_context());
    let response = service.list(auth.user_id, pagination.feed_query()).await?;
    Ok(Json(response))
}

/// Unread notification count
///
/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let unread = service.unread_count(auth.user_id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// Mark one notification read
///
/// POST /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<String>,
) -> ApiResult<NoContent> {
    let notification_id = notification_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid notification_id format"))?;

    let service = NotificationService::new(state.service_context());
    service.mark_read(auth.user_id, notification_id).await?;
    Ok(NoContent)
}

/// Mark all of the caller's notifications read
///
/// POST /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.mark_all_read(auth.user_id).await?;
    Ok(NoContent)
}
