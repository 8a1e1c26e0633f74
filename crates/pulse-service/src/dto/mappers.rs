//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use pulse_core::{
    AudioMessage, Comment, Follow, HealthProfile, Message, Notification, Plan, Post, Reel, Story,
    TokenBudget, TokenLedgerEntry, User,
};

use super::responses::{
    AudioResponse, CommentResponse, CurrentUserResponse, FollowResponse, HealthProfileResponse,
    LedgerEntryResponse, MessageResponse, NotificationResponse, PlanResponse, PostResponse,
    ReelResponse, StoryResponse, TokenBudgetResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            handle: user.handle.clone(),
            display_name: user.display_name.clone(),
            avatar_url: user.avatar_url.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            handle: user.handle.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            bio: user.bio.clone(),
            avatar_url: user.avatar_url.clone(),
            default_visibility: user.default_visibility.to_string(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Follow Mappers
// ============================================================================

impl From<&Follow> for FollowResponse {
    fn from(follow: &Follow) -> Self {
        Self {
            follower_id: follow.follower_id.to_string(),
            followee_id: follow.followee_id.to_string(),
            status: follow.status.to_string(),
            created_at: follow.created_at,
        }
    }
}

impl From<Follow> for FollowResponse {
    fn from(follow: Follow) -> Self {
        Self::from(&follow)
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl PostResponse {
    /// Build from a post plus viewer-dependent engagement data
    pub fn from_post(post: &Post, like_count: i64, comment_count: i64, liked_by_viewer: bool) -> Self {
        Self {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            content: post.content.clone(),
            media_urls: post.media_urls.clone(),
            visibility: post.visibility.to_string(),
            like_count,
            comment_count,
            liked_by_viewer,
            created_at: post.created_at,
            edited_at: post.edited_at,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl CommentResponse {
    /// Build from a comment plus engagement counts
    pub fn from_comment(comment: &Comment, like_count: i64, reply_count: i64) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            author_id: comment.author_id.to_string(),
            parent_id: comment.parent_id.map(|id| id.to_string()),
            content: comment.content.clone(),
            like_count,
            reply_count,
            created_at: comment.created_at,
            edited_at: comment.edited_at,
        }
    }
}

// ============================================================================
// Reel Mappers
// ============================================================================

impl ReelResponse {
    /// Build from a reel plus viewer-dependent engagement data
    pub fn from_reel(reel: &Reel, like_count: i64, liked_by_viewer: bool) -> Self {
        Self {
            id: reel.id.to_string(),
            author_id: reel.author_id.to_string(),
            video_url: reel.video_url.clone(),
            caption: reel.caption.clone(),
            duration_secs: reel.duration_secs,
            like_count,
            liked_by_viewer,
            created_at: reel.created_at,
        }
    }
}

// ============================================================================
// Story Mappers
// ============================================================================

impl StoryResponse {
    /// Build from a story plus whether the viewer has seen it
    pub fn from_story(story: &Story, viewed_by_viewer: bool) -> Self {
        Self {
            id: story.id.to_string(),
            author_id: story.author_id.to_string(),
            media_url: story.media_url.clone(),
            caption: story.caption.clone(),
            attachment: story.attachment.clone(),
            viewed_by_viewer,
            view_count: None,
            created_at: story.created_at,
            expires_at: story.expires_at,
        }
    }

    /// Attach the unique viewer count (author-facing reads)
    #[must_use]
    pub fn with_view_count(mut self, view_count: i64) -> Self {
        self.view_count = Some(view_count);
        self
    }
}

// ============================================================================
// Messaging Mappers
// ============================================================================

impl From<&AudioMessage> for AudioResponse {
    fn from(audio: &AudioMessage) -> Self {
        Self {
            id: audio.id.to_string(),
            url: audio.url.clone(),
            duration_secs: audio.duration_secs,
            status: audio.status.as_str().to_string(),
            transcript: audio.transcript.clone(),
            created_at: audio.created_at,
        }
    }
}

impl From<AudioMessage> for AudioResponse {
    fn from(audio: AudioMessage) -> Self {
        Self::from(&audio)
    }
}

impl MessageResponse {
    /// Build from a message, attaching the audio aggregate when present
    pub fn from_message(message: &Message, audio: Option<AudioResponse>) -> Self {
        Self {
            id: message.id.to_string(),
            conversation_id: message.conversation_id.to_string(),
            sender_id: message.sender_id.to_string(),
            content: message.content.clone(),
            audio,
            created_at: message.created_at,
        }
    }
}

// ============================================================================
// Notification Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(notification: &Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            actor_id: notification.actor_id.to_string(),
            kind: notification.kind.as_str().to_string(),
            subject_id: notification.subject_id.map(|id| id.to_string()),
            read: notification.is_read(),
            created_at: notification.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(notification: Notification) -> Self {
        Self::from(&notification)
    }
}

// ============================================================================
// AI Token Mappers
// ============================================================================

impl From<&TokenBudget> for TokenBudgetResponse {
    fn from(budget: &TokenBudget) -> Self {
        Self {
            period_start: budget.period_start,
            granted: budget.granted,
            used: budget.used,
            remaining: budget.remaining(),
        }
    }
}

impl From<TokenBudget> for TokenBudgetResponse {
    fn from(budget: TokenBudget) -> Self {
        Self::from(&budget)
    }
}

impl From<&TokenLedgerEntry> for LedgerEntryResponse {
    fn from(entry: &TokenLedgerEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            delta: entry.delta,
            feature: entry.feature.clone(),
            created_at: entry.created_at,
        }
    }
}

impl From<TokenLedgerEntry> for LedgerEntryResponse {
    fn from(entry: TokenLedgerEntry) -> Self {
        Self::from(&entry)
    }
}

// ============================================================================
// Better Me Mappers
// ============================================================================

impl From<&HealthProfile> for HealthProfileResponse {
    fn from(profile: &HealthProfile) -> Self {
        Self {
            height_cm: profile.height_cm,
            weight_kg: profile.weight_kg,
            birth_date: profile.birth_date,
            age_years: profile.age_years(),
            bmi: profile.bmi(),
            activity_level: profile.activity_level.as_str().to_string(),
            dietary_preference: profile.dietary_preference.as_str().to_string(),
            goal: profile.goal.as_str().to_string(),
            updated_at: profile.updated_at,
        }
    }
}

impl From<HealthProfile> for HealthProfileResponse {
    fn from(profile: HealthProfile) -> Self {
        Self::from(&profile)
    }
}

impl From<&Plan> for PlanResponse {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id.to_string(),
            kind: plan.kind.as_str().to_string(),
            title: plan.title.clone(),
            content: plan.content.clone(),
            tokens_spent: plan.tokens_spent,
            created_at: plan.created_at,
        }
    }
}

impl From<Plan> for PlanResponse {
    fn from(plan: Plan) -> Self {
        Self::from(&plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::{NotificationKind, Snowflake, Visibility};

    #[test]
    fn test_user_response_hides_email() {
        let user = User::new(
            Snowflake::new(1),
            "jane".to_string(),
            "Jane".to_string(),
            "jane@example.com".to_string(),
        );
        let resp = UserResponse::from(&user);
        assert_eq!(resp.id, "1");
        assert_eq!(resp.handle, "jane");

        let current = CurrentUserResponse::from(user);
        assert_eq!(current.email, "jane@example.com");
        assert_eq!(current.default_visibility, Visibility::Public.to_string());
    }

    #[test]
    fn test_post_response_counts() {
        let post = Post::new(
            Snowflake::new(10),
            Snowflake::new(1),
            "hello".to_string(),
            vec![],
            Visibility::Public,
        );
        let resp = PostResponse::from_post(&post, 3, 2, true);
        assert_eq!(resp.like_count, 3);
        assert_eq!(resp.comment_count, 2);
        assert!(resp.liked_by_viewer);
    }

    #[test]
    fn test_notification_read_flag() {
        let mut n = Notification::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            NotificationKind::Like,
            None,
        );
        assert!(!NotificationResponse::from(&n).read);
        n.mark_read();
        assert!(NotificationResponse::from(&n).read);
    }

    #[test]
    fn test_budget_remaining() {
        let mut budget = TokenBudget::new(Snowflake::new(1), 1000);
        budget.used = 400;
        let resp = TokenBudgetResponse::from(&budget);
        assert_eq!(resp.remaining, 600);
    }
}
