//! Reel database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for reels table
#[derive(Debug, Clone, FromRow)]
pub struct ReelModel {
    pub id: i64,
    pub author_id: i64,
    pub video_url: String,
    pub caption: Option<String>,
    pub duration_secs: i32,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
