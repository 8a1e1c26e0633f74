//! AI token accounting handlers
//!
//! Endpoints for the monthly token budget and its ledger.

use axum::{extract::State, Json};
use pulse_service::{LedgerEntryResponse, TokenBudgetResponse, TokenService};

use crate::extractors::{AuthUser, Pagination};
use crate::response::ApiResult;
use crate::state::AppState;

/// The caller's token budget for the current month
///
/// GET /ai/tokens
pub async fn get_budget(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<TokenBudgetResponse>> {
    let service = TokenService::new(state.service_context());
    let response = service.budget(auth.user_id).await?;
    Ok(Json(response))
}

/// The caller's token ledger, newest first
///
/// GET /ai/tokens/ledger
pub async fn get_ledger(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<LedgerEntryResponse>>> {
    let service = TokenService::new(state.service_context());
    let response = service.ledger(auth.user_id, pagination.feed_query()).await?;
    Ok(Json(response))
}
