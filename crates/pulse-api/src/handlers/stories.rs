//! Story handlers
//!
//! Endpoints for stories, the story tray, views, polls, and sliders.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_service::{
    CreateStoryRequest, PollResultsResponse, PollVoteRequest, SliderResultsResponse,
    SliderVoteRequest, StoryResponse, StoryService, StoryTrayEntry, StoryViewerResponse,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Publish a story
///
/// POST /stories
pub async fn create_story(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateStoryRequest>,
) -> ApiResult<Created<Json<StoryResponse>>> {
    let service = StoryService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Story tray: active stories from followed accounts, own stories first
///
/// GET /stories/tray
pub async fn tray(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<StoryTrayEntry>>> {
    let service = StoryService::new(state.service_context());
    let response = service.tray(auth.user_id).await?;
    Ok(Json(response))
}

/// Get a story by ID
///
/// GET /stories/{story_id}
pub async fn get_story(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<String>,
) -> ApiResult<Json<StoryResponse>> {
    let story_id = story_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid story_id format"))?;

    let service = StoryService::new(state.service_context());
    let response = service.get(auth.user_id, story_id).await?;
    Ok(Json(response))
}

/// Delete a story
///
/// DELETE /stories/{story_id}
pub async fn delete_story(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<String>,
) -> ApiResult<NoContent> {
    let story_id = story_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid story_id format"))?;

    let service = StoryService::new(state.service_context());
    service.delete(auth.user_id, story_id).await?;
    Ok(NoContent)
}

/// Record a story view
///
/// POST /stories/{story_id}/view
pub async fn view_story(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<String>,
) -> ApiResult<NoContent> {
    let story_id = story_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid story_id format"))?;

    let service = StoryService::new(state.service_context());
    service.view(auth.user_id, story_id).await?;
    Ok(NoContent)
}

/// Who viewed a story (author only)
///
/// GET /stories/{story_id}/viewers
pub async fn story_viewers(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<String>,
) -> ApiResult<Json<Vec<StoryViewerResponse>>> {
    let story_id = story_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid story_id format"))?;

    let service = StoryService::new(state.service_context());
    let response = service.viewers(auth.user_id, story_id).await?;
    Ok(Json(response))
}

/// Vote on a story poll
///
/// POST /stories/{story_id}/poll
pub async fn vote_poll(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<String>,
    ValidatedJson(request): ValidatedJson<PollVoteRequest>,
) -> ApiResult<Json<PollResultsResponse>> {
    let story_id = story_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid story_id format"))?;

    let service = StoryService::new(state.service_context());
    let response = service
        .vote_poll(auth.user_id, story_id, request.option_index)
        .await?;
    Ok(Json(response))
}

/// Aggregate poll results
///
/// GET /stories/{story_id}/poll
pub async fn poll_results(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<String>,
) -> ApiResult<Json<PollResultsResponse>> {
    let story_id = story_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid story_id format"))?;

    let service = StoryService::new(state.service_context());
    let response = service.poll_results(auth.user_id, story_id).await?;
    Ok(Json(response))
}

/// Submit a slider value
///
/// POST /stories/{story_id}/slider
pub async fn submit_slider(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SliderVoteRequest>,
) -> ApiResult<Json<SliderResultsResponse>> {
    let story_id = story_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid story_id format"))?;

    let service = StoryService::new(state.service_context());
    let response = service
        .submit_slider(auth.user_id, story_id, request.value)
        .await?;
    Ok(Json(response))
}

/// Aggregate slider results
///
/// GET /stories/{story_id}/slider
pub async fn slider_results(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(story_id): Path<String>,
) -> ApiResult<Json<SliderResultsResponse>> {
    let story_id = story_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid story_id format"))?;

    let service = StoryService::new(state.service_context());
    let response = service.slider_results(auth.user_id, story_id).await?;
    Ok(Json(response))
}
