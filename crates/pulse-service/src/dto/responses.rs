//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response with cursor-based pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, next_cursor: Option<String>, has_more: bool, limit: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                next_cursor,
                has_more,
                limit,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Cursor for fetching the next (older) page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    /// Whether more results exist
    pub has_more: bool,
    /// Page size limit used
    pub limit: i64,
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication response with tokens
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

impl AuthResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: CurrentUserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Token refresh response
#[derive(Debug, Serialize)]
pub struct TokenRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public user response (limited fields)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Current authenticated user response (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub default_visibility: String,
    pub created_at: DateTime<Utc>,
}

/// Full profile view with social counts
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub handle: String,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub follower_count: i64,
    pub following_count: i64,
    /// Viewer's edge towards this user, if any ("pending", "accepted", "blocked")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_status: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Follow Responses
// ============================================================================

/// One follow edge
#[derive(Debug, Clone, Serialize)]
pub struct FollowResponse {
    pub follower_id: String,
    pub followee_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Post Responses
// ============================================================================

/// A feed post with engagement counts
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub content: String,
    pub media_urls: Vec<String>,
    pub visibility: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub liked_by_viewer: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

/// Result of a like toggle
#[derive(Debug, Clone, Serialize)]
pub struct LikeToggleResponse {
    /// Whether the viewer now likes the target
    pub liked: bool,
    pub like_count: i64,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// A comment with its reply count
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub content: String,
    pub like_count: i64,
    pub reply_count: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Reel Responses
// ============================================================================

/// A reel with engagement counts
#[derive(Debug, Clone, Serialize)]
pub struct ReelResponse {
    pub id: String,
    pub author_id: String,
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub duration_secs: i32,
    pub like_count: i64,
    pub liked_by_viewer: bool,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Story Responses
// ============================================================================

/// A story as seen by a viewer
#[derive(Debug, Clone, Serialize)]
pub struct StoryResponse {
    pub id: String,
    pub author_id: String,
    pub media_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<pulse_core::StoryAttachment>,
    pub viewed_by_viewer: bool,
    /// Unique viewer count; present for the author only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// One author's active stories in the tray
#[derive(Debug, Serialize)]
pub struct StoryTrayEntry {
    pub author: UserResponse,
    pub stories: Vec<StoryResponse>,
}

/// One view of a story (author-only)
#[derive(Debug, Clone, Serialize)]
pub struct StoryViewerResponse {
    pub viewer: UserResponse,
    pub viewed_at: DateTime<Utc>,
}

/// Aggregate poll results
#[derive(Debug, Serialize)]
pub struct PollResultsResponse {
    pub story_id: String,
    /// Vote counts indexed by option, zero-filled
    pub counts: Vec<i64>,
    pub total_votes: i64,
    /// The caller's own vote, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_vote: Option<i16>,
}

/// Aggregate slider results
#[derive(Debug, Serialize)]
pub struct SliderResultsResponse {
    pub story_id: String,
    pub count: i64,
    pub average: f64,
    /// The caller's own submission, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_value: Option<i16>,
}

// ============================================================================
// Messaging Responses
// ============================================================================

/// A conversation summary for the inbox
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: String,
    pub other_user: UserResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_message: Option<MessageResponse>,
    pub unread_count: i64,
    pub created_at: DateTime<Utc>,
}

/// A single message
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub id: String,
    pub conversation_id: String,
    pub sender_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioResponse>,
    pub created_at: DateTime<Utc>,
}

/// An audio message and its transcription state
#[derive(Debug, Clone, Serialize)]
pub struct AudioResponse {
    pub id: String,
    pub url: String,
    pub duration_secs: i32,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Notification Responses
// ============================================================================

/// A notification
#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: String,
    pub actor_id: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Unread notification count
#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

// ============================================================================
// AI Token Responses
// ============================================================================

/// Current token budget for the caller
#[derive(Debug, Serialize)]
pub struct TokenBudgetResponse {
    pub period_start: NaiveDate,
    pub granted: i64,
    pub used: i64,
    pub remaining: i64,
}

/// One ledger row
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntryResponse {
    pub id: String,
    pub delta: i64,
    pub feature: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Better Me Responses
// ============================================================================

/// Health profile with derived metrics
#[derive(Debug, Serialize)]
pub struct HealthProfileResponse {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub birth_date: NaiveDate,
    pub age_years: i32,
    pub bmi: f64,
    pub activity_level: String,
    pub dietary_preference: String,
    pub goal: String,
    pub updated_at: DateTime<Utc>,
}

/// A generated plan
#[derive(Debug, Clone, Serialize)]
pub struct PlanResponse {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub content: String,
    pub tokens_spent: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let all_healthy = database_healthy && redis_healthy;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
                redis: if redis_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }
}
