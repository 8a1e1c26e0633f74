//! Story database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for stories table.
///
/// `attachment` holds the poll/slider payload as JSONB; plain stories
/// store NULL.
#[derive(Debug, Clone, FromRow)]
pub struct StoryModel {
    pub id: i64,
    pub author_id: i64,
    pub media_url: String,
    pub caption: Option<String>,
    pub attachment: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Database model for story_views table (one row per story/viewer pair)
#[derive(Debug, Clone, FromRow)]
pub struct StoryViewModel {
    pub story_id: i64,
    pub viewer_id: i64,
    pub viewed_at: DateTime<Utc>,
}
