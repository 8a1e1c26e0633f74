//! Request DTOs with validation rules

use chrono::NaiveDate;
use pulse_core::{
    ActivityLevel, DietaryPreference, PlanKind, Snowflake, StoryAttachment, WellnessGoal,
};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Handle must be 3-32 characters"))]
    pub handle: String,

    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

// ============================================================================
// Users
// ============================================================================

/// Profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Display name must be 1-64 characters"))]
    pub display_name: Option<String>,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,

    #[validate(length(max = 2048, message = "Avatar URL too long"))]
    pub avatar_url: Option<String>,

    /// "public", "followers" or "private"
    pub default_visibility: Option<String>,
}

// ============================================================================
// Posts
// ============================================================================

/// Create a feed post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(max = 4000, message = "Post content must be at most 4000 characters"))]
    pub content: String,

    #[validate(length(max = 10, message = "At most 10 media attachments"))]
    #[serde(default)]
    pub media_urls: Vec<String>,

    /// Falls back to the author's default visibility when absent
    pub visibility: Option<String>,
}

/// Edit an existing post
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(
        min = 1,
        max = 4000,
        message = "Post content must be 1-4000 characters"
    ))]
    pub content: String,

    pub visibility: Option<String>,
}

// ============================================================================
// Comments
// ============================================================================

/// Create a comment or a reply
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub content: String,

    /// When set, this comment replies to the given top-level comment
    pub parent_id: Option<Snowflake>,
}

/// Edit a comment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "Comment must be 1-1000 characters"))]
    pub content: String,
}

// ============================================================================
// Reels
// ============================================================================

/// Publish a reel
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReelRequest {
    #[validate(length(min = 1, max = 2048, message = "Video URL is required"))]
    pub video_url: String,

    #[validate(length(max = 1000, message = "Caption must be at most 1000 characters"))]
    pub caption: Option<String>,

    #[validate(range(min = 1, max = 180, message = "Duration must be 1-180 seconds"))]
    pub duration_secs: i32,
}

// ============================================================================
// Stories
// ============================================================================

/// Publish a story
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStoryRequest {
    #[validate(length(min = 1, max = 2048, message = "Media URL is required"))]
    pub media_url: String,

    #[validate(length(max = 500, message = "Caption must be at most 500 characters"))]
    pub caption: Option<String>,

    /// Optional poll or slider; poll options are validated in the service
    pub attachment: Option<StoryAttachment>,
}

/// Vote on a story poll
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PollVoteRequest {
    #[validate(range(min = 0, max = 3, message = "Option index out of range"))]
    pub option_index: i16,
}

/// Submit a slider value
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SliderVoteRequest {
    #[validate(range(min = 0, max = 100, message = "Slider value must be 0-100"))]
    pub value: i16,
}

// ============================================================================
// Messaging
// ============================================================================

/// Send a text message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub content: String,
}

/// Send an audio message
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendAudioRequest {
    #[validate(length(min = 1, max = 2048, message = "Audio URL is required"))]
    pub url: String,

    #[validate(range(min = 1, max = 600, message = "Duration must be 1-600 seconds"))]
    pub duration_secs: i32,
}

/// Advance the read marker in a conversation
#[derive(Debug, Clone, Deserialize)]
pub struct MarkReadRequest {
    pub message_id: Snowflake,
}

// ============================================================================
// Better Me
// ============================================================================

/// Create or replace the caller's health profile
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertHealthProfileRequest {
    #[validate(range(min = 50.0, max = 280.0, message = "Height must be 50-280 cm"))]
    pub height_cm: f64,

    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be 20-500 kg"))]
    pub weight_kg: f64,

    pub birth_date: NaiveDate,

    pub activity_level: ActivityLevel,

    pub dietary_preference: DietaryPreference,

    pub goal: WellnessGoal,
}

/// Generate a meal or workout plan
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePlanRequest {
    pub kind: PlanKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let req = RegisterRequest {
            handle: "jane".to_string(),
            display_name: None,
            email: "jane@example.com".to_string(),
            password: "Str0ngPass".to_string(),
        };
        assert!(req.validate().is_ok());

        let bad = RegisterRequest {
            handle: "ab".to_string(),
            display_name: None,
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_slider_range() {
        assert!(SliderVoteRequest { value: 100 }.validate().is_ok());
        assert!(SliderVoteRequest { value: 101 }.validate().is_err());
        assert!(SliderVoteRequest { value: -1 }.validate().is_err());
    }

    #[test]
    fn test_health_profile_ranges() {
        let req = UpsertHealthProfileRequest {
            height_cm: 180.0,
            weight_kg: 80.0,
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            activity_level: ActivityLevel::Moderate,
            dietary_preference: DietaryPreference::None,
            goal: WellnessGoal::Maintain,
        };
        assert!(req.validate().is_ok());

        let mut bad = req.clone();
        bad.height_cm = 10.0;
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_comment_reply_parses_string_id() {
        let json = r#"{"content":"nice","parent_id":"12345"}"#;
        let req: CreateCommentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.parent_id, Some(Snowflake::new(12345)));
    }
}
