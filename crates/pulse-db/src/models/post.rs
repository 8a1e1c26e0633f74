//! Post and like database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for posts table
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub media_urls: Vec<String>,
    pub visibility: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Database model for likes table.
///
/// One table covers posts, comments, and reels; `target_kind` plus
/// `target_id` identify the liked row.
#[derive(Debug, Clone, FromRow)]
pub struct LikeModel {
    pub id: i64,
    pub user_id: i64,
    pub target_kind: String,
    pub target_id: i64,
    pub created_at: DateTime<Utc>,
}
