//! Audio message entity <-> model mapper

use pulse_core::entities::{AudioMessage, TranscriptionStatus};
use pulse_core::value_objects::Snowflake;

use crate::models::AudioMessageModel;

use super::parse_or;

impl From<AudioMessageModel> for AudioMessage {
    fn from(model: AudioMessageModel) -> Self {
        AudioMessage {
            id: Snowflake::new(model.id),
            conversation_id: Snowflake::new(model.conversation_id),
            sender_id: Snowflake::new(model.sender_id),
            url: model.url,
            duration_secs: model.duration_secs,
            status: parse_or(&model.status, TranscriptionStatus::Failed),
            transcript: model.transcript,
            created_at: model.created_at,
        }
    }
}
