//! Error handling utilities for repositories

use pulse_core::error::DomainError;
use pulse_core::value_objects::Snowflake;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::Database(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Snowflake) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "post not found" error
pub fn post_not_found(id: Snowflake) -> DomainError {
    DomainError::PostNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: Snowflake) -> DomainError {
    DomainError::CommentNotFound(id)
}

/// Create a "reel not found" error
pub fn reel_not_found(id: Snowflake) -> DomainError {
    DomainError::ReelNotFound(id)
}

/// Create a "story not found" error
pub fn story_not_found(id: Snowflake) -> DomainError {
    DomainError::StoryNotFound(id)
}

/// Create an "audio message not found" error
pub fn audio_not_found(id: Snowflake) -> DomainError {
    DomainError::AudioMessageNotFound(id)
}

/// Create a "notification not found" error
pub fn notification_not_found(id: Snowflake) -> DomainError {
    DomainError::NotificationNotFound(id)
}

/// Create a "plan not found" error
pub fn plan_not_found(id: Snowflake) -> DomainError {
    DomainError::PlanNotFound(id)
}

/// Create a "follow relationship not found" error
pub fn follow_not_found() -> DomainError {
    DomainError::FollowNotFound
}
