//! Audio message database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for audio_messages table
#[derive(Debug, Clone, FromRow)]
pub struct AudioMessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub url: String,
    pub duration_secs: i32,
    pub status: String,
    pub transcript: Option<String>,
    pub created_at: DateTime<Utc>,
}
