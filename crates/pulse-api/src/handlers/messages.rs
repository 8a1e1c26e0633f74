//! Messaging handlers
//!
//! Endpoints for 1:1 conversations, text and audio messages, and read markers.

use axum::{
    extract::{Path, State},
    Json,
};
use pulse_service::{
    AudioResponse, AudioService, ConversationResponse, MarkReadRequest, MessageResponse,
    MessageService, SendAudioRequest, SendMessageRequest,
};

use crate::extractors::{AuthUser, Pagination, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Open conversation request body
#[derive(Debug, serde::Deserialize)]
pub struct OpenConversationBody {
    pub user_id: String,
}

/// Open (or return the existing) conversation with another user
///
/// POST /conversations
pub async fn open_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<OpenConversationBody>,
) -> ApiResult<Created<Json<ConversationResponse>>> {
    let other_id = body
        .user_id
        .parse()
        .map_err(|_| ApiError::invalid_query("Invalid user_id format"))?;

    let service = MessageService::new(state.service_context());
    let response = service.open_conversation(auth.user_id, other_id).await?;
    Ok(Created(Json(response)))
}

/// The caller's inbox
///
/// GET /conversations
pub async fn list_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConversationResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.list_conversations(auth.user_id).await?;
    Ok(Json(response))
}

/// Messages in a conversation
///
/// GET /conversations/{conversation_id}/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let conversation_id = conversation_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid conversation_id format"))?;

    let service = MessageService::new(state.service_context());
    let response = service
        .messages(auth.user_id, conversation_id, pagination.feed_query())
        .await?;
    Ok(Json(response))
}

/// Send a text message
///
/// POST /conversations/{conversation_id}/messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let conversation_id = conversation_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid conversation_id format"))?;

    let service = MessageService::new(state.service_context());
    let response = service.send(auth.user_id, conversation_id, request).await?;
    Ok(Created(Json(response)))
}

/// Send an audio message; transcription runs in the background
///
/// POST /conversations/{conversation_id}/audio
pub async fn send_audio(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    ValidatedJson(request): ValidatedJson<SendAudioRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let conversation_id = conversation_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid conversation_id format"))?;

    let service = AudioService::new(state.service_context());
    let response = service.send(auth.user_id, conversation_id, request).await?;
    Ok(Created(Json(response)))
}

/// Advance the caller's read marker
///
/// POST /conversations/{conversation_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(conversation_id): Path<String>,
    Json(request): Json<MarkReadRequest>,
) -> ApiResult<NoContent> {
    let conversation_id = conversation_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid conversation_id format"))?;

    let service = MessageService::new(state.service_context());
    service
        .mark_read(auth.user_id, conversation_id, request.message_id)
        .await?;
    Ok(NoContent)
}

/// Get an audio message and its transcription state
///
/// GET /audio/{audio_id}
pub async fn get_audio(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(audio_id): Path<String>,
) -> ApiResult<Json<AudioResponse>> {
    let audio_id = audio_id
        .parse()
        .map_err(|_| ApiError::invalid_path("Invalid audio_id format"))?;

    let service = AudioService::new(state.service_context());
    let response = service.get(auth.user_id, audio_id).await?;
    Ok(Json(response))
}
