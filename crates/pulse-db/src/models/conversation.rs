//! Conversation and message database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for conversations table.
///
/// Participants are stored in canonical order (user_a < user_b) with a
/// unique index on the pair.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationModel {
    pub id: i64,
    pub user_a: i64,
    pub user_b: i64,
    pub created_at: DateTime<Utc>,
}

/// Database model for messages table
#[derive(Debug, Clone, FromRow)]
pub struct MessageModel {
    pub id: i64,
    pub conversation_id: i64,
    pub sender_id: i64,
    pub content: Option<String>,
    pub audio_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}
