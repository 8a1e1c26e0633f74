//! Audio message service
//!
//! Sends voice clips into conversations and runs the delayed mock
//! transcription that fills in the transcript afterwards.

use std::time::Duration;

use pulse_core::entities::{AudioMessage, Message};
use pulse_core::{DomainError, DomainEvent, NotificationKind, Snowflake};
use tracing::{info, instrument, warn};

use crate::dto::{AudioResponse, MessageResponse, SendAudioRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::message::find_participating;
use super::notification::NotificationService;

/// Audio message service
pub struct AudioService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AudioService<'a> {
    /// Create a new AudioService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send an audio message into a conversation.
    ///
    /// The clip lands in `pending` transcription state; a background task
    /// attaches the transcript after the configured delay.
    #[instrument(skip(self, request))]
    pub async fn send(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
        request: SendAudioRequest,
    ) -> ServiceResult<MessageResponse> {
        let conversation = find_participating(self.ctx, user_id, conversation_id).await?;
        let other_id = conversation
            .other_participant(user_id)
            .ok_or(ServiceError::Domain(DomainError::NotParticipant))?;

        if self
            .ctx
            .follow_repo()
            .is_blocked_either_way(user_id, other_id)
            .await?
        {
            return Err(ServiceError::Domain(DomainError::Blocked));
        }

        let audio = AudioMessage::new(
            self.ctx.generate_id(),
            conversation_id,
            user_id,
            request.url,
            request.duration_secs,
        );
        self.ctx.audio_repo().create(&audio).await?;

        let message = Message::new_audio(
            self.ctx.generate_id(),
            conversation_id,
            user_id,
            audio.id,
        );
        self.ctx.conversation_repo().create_message(&message).await?;

        NotificationService::new(self.ctx)
            .deliver(
                other_id,
                user_id,
                NotificationKind::Message,
                Some(conversation_id),
            )
            .await?;

        info!(audio_id = %audio.id, conversation_id = %conversation_id, "Audio message sent");

        spawn_transcription(self.ctx.clone(), audio.id, audio.duration_secs);

        Ok(MessageResponse::from_message(
            &message,
            Some(AudioResponse::from(&audio)),
        ))
    }

    /// Get an audio message and its transcription state; participants only
    #[instrument(skip(self))]
    pub async fn get(&self, user_id: Snowflake, audio_id: Snowflake) -> ServiceResult<AudioResponse> {
        let audio = self
            .ctx
            .audio_repo()
            .find_by_id(audio_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::AudioMessageNotFound(
                audio_id,
            )))?;

        let _ = find_participating(self.ctx, user_id, audio.conversation_id).await?;

        Ok(AudioResponse::from(&audio))
    }
}

/// Run the mock transcription off the request path.
///
/// Sleeps for the configured delay, then writes the transcript. Failures
/// flip the clip to `failed` so clients stop polling.
fn spawn_transcription(ctx: ServiceContext, audio_id: Snowflake, duration_secs: i32) {
    let delay = Duration::from_millis(ctx.ai_config().transcription_delay_ms);

    tokio::spawn(async move {
        tokio::time::sleep(delay).await;

        let transcript = mock_transcript(duration_secs);
        match ctx
            .audio_repo()
            .complete_transcription(audio_id, &transcript)
            .await
        {
            Ok(()) => {
                super::emit(&DomainEvent::TranscriptionFinished {
                    audio_id,
                    succeeded: true,
                });
            }
            Err(err) => {
                warn!(audio_id = %audio_id, error = %err, "Transcription failed");
                if let Err(err) = ctx.audio_repo().fail_transcription(audio_id).await {
                    warn!(audio_id = %audio_id, error = %err, "Could not mark transcription failed");
                }
                super::emit(&DomainEvent::TranscriptionFinished {
                    audio_id,
                    succeeded: false,
                });
            }
        }
    });
}

/// Canned transcript scaled to clip length
fn mock_transcript(duration_secs: i32) -> String {
    format!("(voice message, {duration_secs}s) Hey, just checking in - talk soon!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_transcript_mentions_duration() {
        let transcript = mock_transcript(42);
        assert!(transcript.contains("42s"));
    }
}
