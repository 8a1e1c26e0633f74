//! Test fixtures and data generators
//!
//! Provides reusable request builders and response shapes for
//! integration tests.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Registration request
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub handle: String,
    pub display_name: Option<String>,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            handle: format!("testuser{suffix}"),
            display_name: None,
            email: format!("test{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Auth response
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

/// Current user response
#[derive(Debug, Deserialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub default_visibility: String,
}

/// Public user response
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub handle: String,
    pub display_name: String,
}

/// Profile response with social counts
#[derive(Debug, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub handle: String,
    pub follower_count: i64,
    pub following_count: i64,
    pub follow_status: Option<String>,
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Create post request
#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub content: String,
    pub media_urls: Vec<String>,
    pub visibility: Option<String>,
}

impl CreatePostRequest {
    pub fn public(content: &str) -> Self {
        Self {
            content: content.to_string(),
            media_urls: Vec::new(),
            visibility: Some("public".to_string()),
        }
    }

    pub fn followers_only(content: &str) -> Self {
        Self {
            content: content.to_string(),
            media_urls: Vec::new(),
            visibility: Some("followers".to_string()),
        }
    }
}

/// Post response
#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub visibility: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked_by_viewer: bool,
    pub edited_at: Option<String>,
}

/// Like toggle response
#[derive(Debug, Deserialize)]
pub struct LikeToggleResponse {
    pub liked: bool,
    pub like_count: i64,
}

/// Create comment request
#[derive(Debug, Serialize)]
pub struct CreateCommentRequest {
    pub content: String,
    pub parent_id: Option<String>,
}

impl CreateCommentRequest {
    pub fn top_level(content: &str) -> Self {
        Self {
            content: content.to_string(),
            parent_id: None,
        }
    }

    pub fn reply(content: &str, parent_id: &str) -> Self {
        Self {
            content: content.to_string(),
            parent_id: Some(parent_id.to_string()),
        }
    }
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub parent_id: Option<String>,
    pub content: String,
    pub reply_count: i64,
}

/// Follow response
#[derive(Debug, Deserialize)]
pub struct FollowResponse {
    pub follower_id: String,
    pub followee_id: String,
    pub status: String,
}

/// Create story request with an optional attachment
#[derive(Debug, Serialize)]
pub struct CreateStoryRequest {
    pub media_url: String,
    pub caption: Option<String>,
    pub attachment: Option<serde_json::Value>,
}

impl CreateStoryRequest {
    pub fn plain() -> Self {
        let suffix = unique_suffix();
        Self {
            media_url: format!("https://cdn.example.com/stories/{suffix}.jpg"),
            caption: None,
            attachment: None,
        }
    }

    pub fn with_poll(question: &str, options: &[&str]) -> Self {
        let mut fixture = Self::plain();
        fixture.attachment = Some(serde_json::json!({
            "kind": "poll",
            "question": question,
            "options": options,
        }));
        fixture
    }

    pub fn with_slider(emoji: &str, prompt: &str) -> Self {
        let mut fixture = Self::plain();
        fixture.attachment = Some(serde_json::json!({
            "kind": "slider",
            "emoji": emoji,
            "prompt": prompt,
        }));
        fixture
    }
}

/// Story response
#[derive(Debug, Deserialize)]
pub struct StoryResponse {
    pub id: String,
    pub author_id: String,
    pub media_url: String,
    pub viewed_by_viewer: bool,
    pub view_count: Option<i64>,
    pub expires_at: String,
}

/// Poll vote request
#[derive(Debug, Serialize)]
pub struct PollVoteRequest {
    pub option_index: i16,
}

/// Poll results response
#[derive(Debug, Deserialize)]
pub struct PollResultsResponse {
    pub story_id: String,
    pub counts: Vec<i64>,
    pub total_votes: i64,
    pub own_vote: Option<i16>,
}

/// Slider vote request
#[derive(Debug, Serialize)]
pub struct SliderVoteRequest {
    pub value: i16,
}

/// Slider results response
#[derive(Debug, Deserialize)]
pub struct SliderResultsResponse {
    pub count: i64,
    pub average: f64,
    pub own_value: Option<i16>,
}

/// Open conversation request
#[derive(Debug, Serialize)]
pub struct OpenConversationRequest {
    pub user_id: String,
}

/// Conversation response
#[derive(Debug, Deserialize)]
pub struct ConversationResponse {
    pub id: String,
    pub other_user: UserResponse,
    pub unread_count: i64,
}

/// Send message request
#[derive(Debug, Serialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// Send audio request
#[derive(Debug, Serialize)]
pub struct SendAudioRequest {
    pub url: String,
    pub duration_secs: i32,
}

/// Message response
#[derive(Debug, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    pub content: Option<String>,
    pub audio: Option<AudioResponse>,
}

/// Audio message response
#[derive(Debug, Deserialize)]
pub struct AudioResponse {
    pub id: String,
    pub status: String,
    pub transcript: Option<String>,
}

/// Notification response
#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub actor_id: String,
    pub kind: String,
    pub read: bool,
}

/// Unread count response
#[derive(Debug, Deserialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

/// Token budget response
#[derive(Debug, Deserialize)]
pub struct TokenBudgetResponse {
    pub granted: i64,
    pub used: i64,
    pub remaining: i64,
}

/// Health profile request
#[derive(Debug, Serialize)]
pub struct UpsertHealthProfileRequest {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub birth_date: String,
    pub activity_level: String,
    pub dietary_preference: String,
    pub goal: String,
}

impl UpsertHealthProfileRequest {
    pub fn typical() -> Self {
        Self {
            height_cm: 178.0,
            weight_kg: 74.5,
            birth_date: "1993-06-12".to_string(),
            activity_level: "active".to_string(),
            dietary_preference: "omnivore".to_string(),
            goal: "gain_muscle".to_string(),
        }
    }
}

/// Health profile response
#[derive(Debug, Deserialize)]
pub struct HealthProfileResponse {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: i32,
    pub bmi: f64,
    pub goal: String,
}

/// Generate plan request
#[derive(Debug, Serialize)]
pub struct GeneratePlanRequest {
    pub kind: String,
}

/// Plan response
#[derive(Debug, Deserialize)]
pub struct PlanResponse {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub tokens_spent: i64,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
