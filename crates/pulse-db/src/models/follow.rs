//! Follow edge database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for follows table.
///
/// Primary key is (follower_id, followee_id); `status` stores the edge
/// state as text.
#[derive(Debug, Clone, FromRow)]
pub struct FollowModel {
    pub follower_id: i64,
    pub followee_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
