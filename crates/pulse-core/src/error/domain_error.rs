//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Reel not found: {0}")]
    ReelNotFound(Snowflake),

    #[error("Story not found: {0}")]
    StoryNotFound(Snowflake),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(Snowflake),

    #[error("Message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("Audio message not found: {0}")]
    AudioMessageNotFound(Snowflake),

    #[error("Notification not found: {0}")]
    NotificationNotFound(Snowflake),

    #[error("Follow relationship not found")]
    FollowNotFound,

    #[error("Health profile not found")]
    HealthProfileNotFound,

    #[error("Plan not found: {0}")]
    PlanNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Invalid poll option index")]
    InvalidPollOption,

    #[error("Slider value out of range (0-100)")]
    SliderValueOutOfRange,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not the author")]
    NotAuthor,

    #[error("Not visible to this user")]
    NotVisible,

    #[error("Not a participant of this conversation")]
    NotParticipant,

    #[error("Blocked by user")]
    Blocked,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Handle already in use")]
    HandleAlreadyExists,

    #[error("Already following or requested")]
    AlreadyFollowing,

    #[error("Cannot follow yourself")]
    SelfFollow,

    // =========================================================================
    // State Errors
    // =========================================================================
    #[error("Story has expired")]
    StoryExpired,

    #[error("Token budget exhausted: {remaining} tokens remaining")]
    TokenBudgetExhausted { remaining: i64 },

    // =========================================================================
    // Infrastructure Errors (mapped from the database layer)
    // =========================================================================
    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    /// Check if this is a not-found error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::PostNotFound(_)
                | Self::CommentNotFound(_)
                | Self::ReelNotFound(_)
                | Self::StoryNotFound(_)
                | Self::ConversationNotFound(_)
                | Self::MessageNotFound(_)
                | Self::AudioMessageNotFound(_)
                | Self::NotificationNotFound(_)
                | Self::FollowNotFound
                | Self::HealthProfileNotFound
                | Self::PlanNotFound(_)
        )
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidHandle(_)
                | Self::ContentTooLong { .. }
                | Self::InvalidPollOption
                | Self::SliderValueOutOfRange
        )
    }

    /// Check if this is an authorization error
    #[must_use]
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotAuthor | Self::NotVisible | Self::NotParticipant | Self::Blocked
        )
    }

    /// Check if this is a conflict error
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::HandleAlreadyExists
                | Self::AlreadyFollowing
                | Self::SelfFollow
        )
    }

    /// Check if this is a budget-exhausted error
    #[must_use]
    pub fn is_budget_exhausted(&self) -> bool {
        matches!(self, Self::TokenBudgetExhausted { .. })
    }

    /// Check if this error means the resource existed but lapsed
    #[must_use]
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::StoryExpired)
    }

    /// Stable error code for API responses
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::PostNotFound(_) => "POST_NOT_FOUND",
            Self::CommentNotFound(_) => "COMMENT_NOT_FOUND",
            Self::ReelNotFound(_) => "REEL_NOT_FOUND",
            Self::StoryNotFound(_) => "STORY_NOT_FOUND",
            Self::ConversationNotFound(_) => "CONVERSATION_NOT_FOUND",
            Self::MessageNotFound(_) => "MESSAGE_NOT_FOUND",
            Self::AudioMessageNotFound(_) => "AUDIO_MESSAGE_NOT_FOUND",
            Self::NotificationNotFound(_) => "NOTIFICATION_NOT_FOUND",
            Self::FollowNotFound => "FOLLOW_NOT_FOUND",
            Self::HealthProfileNotFound => "HEALTH_PROFILE_NOT_FOUND",
            Self::PlanNotFound(_) => "PLAN_NOT_FOUND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidHandle(_) => "INVALID_HANDLE",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidPollOption => "INVALID_POLL_OPTION",
            Self::SliderValueOutOfRange => "SLIDER_VALUE_OUT_OF_RANGE",
            Self::NotAuthor => "NOT_AUTHOR",
            Self::NotVisible => "NOT_VISIBLE",
            Self::NotParticipant => "NOT_PARTICIPANT",
            Self::Blocked => "BLOCKED",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::HandleAlreadyExists => "HANDLE_ALREADY_EXISTS",
            Self::AlreadyFollowing => "ALREADY_FOLLOWING",
            Self::SelfFollow => "SELF_FOLLOW",
            Self::StoryExpired => "STORY_EXPIRED",
            Self::TokenBudgetExhausted { .. } => "TOKEN_BUDGET_EXHAUSTED",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(DomainError::PostNotFound(Snowflake::new(1)).is_not_found());
        assert!(DomainError::NotAuthor.is_authorization());
        assert!(DomainError::InvalidPollOption.is_validation());
        assert!(DomainError::AlreadyFollowing.is_conflict());
        assert!(DomainError::TokenBudgetExhausted { remaining: 3 }.is_budget_exhausted());
        assert!(!DomainError::StoryExpired.is_not_found());
        assert!(DomainError::StoryExpired.is_expired());
        assert!(!DomainError::StoryNotFound(Snowflake::new(1)).is_expired());
    }

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(DomainError::SelfFollow.code(), "SELF_FOLLOW");
        assert_eq!(DomainError::StoryExpired.code(), "STORY_EXPIRED");
    }
}
