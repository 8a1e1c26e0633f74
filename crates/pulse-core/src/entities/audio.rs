//! Audio message entity and its transcription state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Transcription lifecycle of an audio message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptionStatus {
    Pending,
    Complete,
    Failed,
}

impl TranscriptionStatus {
    /// Stable string form used for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }
}

impl std::str::FromStr for TranscriptionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "complete" => Ok(Self::Complete),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown transcription status: {other}")),
        }
    }
}

/// Voice clip attached to a conversation message.
///
/// Transcription runs after creation; the transcript is only present
/// once status reaches `Complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioMessage {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub sender_id: Snowflake,
    pub url: String,
    pub duration_secs: i32,
    pub status: TranscriptionStatus,
    pub transcript: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AudioMessage {
    /// Create a new audio message awaiting transcription
    pub fn new(
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        url: String,
        duration_secs: i32,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            url,
            duration_secs,
            status: TranscriptionStatus::Pending,
            transcript: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the finished transcript
    pub fn complete_transcription(&mut self, transcript: String) {
        self.transcript = Some(transcript);
        self.status = TranscriptionStatus::Complete;
    }

    /// Mark transcription as failed
    pub fn fail_transcription(&mut self) {
        self.status = TranscriptionStatus::Failed;
    }

    #[inline]
    pub fn is_transcribed(&self) -> bool {
        self.status == TranscriptionStatus::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_audio_is_pending() {
        let audio = AudioMessage::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "/media/a.ogg".to_string(),
            12,
        );
        assert_eq!(audio.status, TranscriptionStatus::Pending);
        assert!(audio.transcript.is_none());
    }

    #[test]
    fn test_complete_transcription() {
        let mut audio = AudioMessage::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "/media/a.ogg".to_string(),
            12,
        );
        audio.complete_transcription("hello there".to_string());
        assert!(audio.is_transcribed());
        assert_eq!(audio.transcript.as_deref(), Some("hello there"));
    }

    #[test]
    fn test_status_roundtrip() {
        for s in [
            TranscriptionStatus::Pending,
            TranscriptionStatus::Complete,
            TranscriptionStatus::Failed,
        ] {
            assert_eq!(s.as_str().parse::<TranscriptionStatus>().unwrap(), s);
        }
    }
}
