//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{
    AudioMessage, Comment, Conversation, Follow, HealthProfile, Like, LikeTarget, Message,
    Notification, Plan, Post, Reel, Story, StoryView, TokenBudget, TokenLedgerEntry, User,
};
use crate::error::DomainError;
use crate::value_objects::{FollowStatus, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Cursor pagination for timeline-style queries.
///
/// `before` is an exclusive Snowflake cursor; results come back newest
/// first.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedQuery {
    pub before: Option<Snowflake>,
    pub limit: i64,
}

impl FeedQuery {
    /// Create a query with a clamped limit
    pub fn new(before: Option<Snowflake>, limit: i64) -> Self {
        Self {
            before,
            limit: limit.clamp(1, 100),
        }
    }
}

/// Aggregate slider results for a story
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SliderStats {
    pub count: i64,
    pub average: f64,
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by handle
    async fn find_by_handle(&self, handle: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Check if handle is already taken
    async fn handle_exists(&self, handle: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;

    /// Search users by handle prefix (case-insensitive)
    async fn search_by_handle(&self, prefix: &str, limit: i64) -> RepoResult<Vec<User>>;
}

// ============================================================================
// Follow Repository
// ============================================================================

#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Find the edge from follower to followee
    async fn find(&self, follower_id: Snowflake, followee_id: Snowflake)
        -> RepoResult<Option<Follow>>;

    /// Insert a new edge; conflicts if one already exists
    async fn create(&self, follow: &Follow) -> RepoResult<()>;

    /// Overwrite the status of an existing edge (block, accept)
    async fn set_status(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
        status: FollowStatus,
    ) -> RepoResult<()>;

    /// Remove the edge entirely (unfollow, decline, unblock)
    async fn delete(&self, follower_id: Snowflake, followee_id: Snowflake) -> RepoResult<()>;

    /// Accepted followers of a user
    async fn followers(&self, user_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<User>>;

    /// Users this user follows (accepted only)
    async fn following(&self, user_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<User>>;

    /// Pending incoming requests for a user
    async fn pending_requests(&self, user_id: Snowflake) -> RepoResult<Vec<Follow>>;

    /// Check for an accepted edge
    async fn is_accepted(&self, follower_id: Snowflake, followee_id: Snowflake) -> RepoResult<bool>;

    /// Check whether either direction of the pair is blocked
    async fn is_blocked_either_way(&self, a: Snowflake, b: Snowflake) -> RepoResult<bool>;

    /// Accepted follower / following counts
    async fn counts(&self, user_id: Snowflake) -> RepoResult<(i64, i64)>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>>;

    /// Create a new post
    async fn create(&self, post: &Post) -> RepoResult<()>;

    /// Update content/visibility of an existing post
    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Soft delete a post
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Home feed: own posts plus visible posts from accepted followees,
    /// newest first. Visibility filtering happens in SQL.
    async fn feed(&self, viewer_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<Post>>;

    /// Posts by one author, filtered to what the viewer may see
    async fn find_by_author(
        &self,
        author_id: Snowflake,
        viewer_can_see_followers: bool,
        is_author: bool,
        query: FeedQuery,
    ) -> RepoResult<Vec<Post>>;
}

// ============================================================================
// Like Repository
// ============================================================================

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Find a user's like on a target
    async fn find(
        &self,
        target: LikeTarget,
        target_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Like>>;

    /// Insert a like (no-op on conflict)
    async fn create(&self, like: &Like) -> RepoResult<()>;

    /// Remove a user's like from a target
    async fn delete(
        &self,
        target: LikeTarget,
        target_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<()>;

    /// Total likes on a target
    async fn count(&self, target: LikeTarget, target_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Create a new comment
    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Update comment content
    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Soft delete a comment
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Top-level comments on a post, newest first
    async fn find_top_level(&self, post_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<Comment>>;

    /// Replies to a comment, oldest first
    async fn find_replies(&self, parent_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<Comment>>;

    /// Number of replies to a comment
    async fn reply_count(&self, parent_id: Snowflake) -> RepoResult<i64>;

    /// Number of comments on a post (including replies)
    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Conversation Repository
// ============================================================================

#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Find conversation by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Find the conversation between two users, regardless of order
    async fn find_pair(&self, a: Snowflake, b: Snowflake) -> RepoResult<Option<Conversation>>;

    /// Create a new conversation
    async fn create(&self, conversation: &Conversation) -> RepoResult<()>;

    /// All conversations a user participates in, most recent activity first
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Conversation>>;

    /// Append a message
    async fn create_message(&self, message: &Message) -> RepoResult<()>;

    /// Find a single message
    async fn find_message(&self, id: Snowflake) -> RepoResult<Option<Message>>;

    /// Messages in a conversation, newest first
    async fn find_messages(
        &self,
        conversation_id: Snowflake,
        query: FeedQuery,
    ) -> RepoResult<Vec<Message>>;

    /// Latest message in a conversation
    async fn last_message(&self, conversation_id: Snowflake) -> RepoResult<Option<Message>>;

    /// Move the reader's high-water mark
    async fn mark_read(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        message_id: Snowflake,
    ) -> RepoResult<()>;

    /// Messages from the other participant past the reader's mark
    async fn unread_count(&self, conversation_id: Snowflake, user_id: Snowflake) -> RepoResult<i64>;
}

// ============================================================================
// Notification Repository
// ============================================================================

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Deliver a notification
    async fn create(&self, notification: &Notification) -> RepoResult<()>;

    /// Find a single notification
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Notification>>;

    /// A user's notifications, newest first
    async fn find_by_recipient(
        &self,
        recipient_id: Snowflake,
        query: FeedQuery,
    ) -> RepoResult<Vec<Notification>>;

    /// Unread notification count
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64>;

    /// Mark one notification read
    async fn mark_read(&self, id: Snowflake) -> RepoResult<()>;

    /// Mark all of a user's notifications read, returning how many changed
    async fn mark_all_read(&self, recipient_id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Story Repository
// ============================================================================

#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Find story by ID (expired stories are still returned; callers decide)
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Story>>;

    /// Create a new story
    async fn create(&self, story: &Story) -> RepoResult<()>;

    /// Delete a story
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Unexpired stories from the given authors, oldest first per author
    async fn active_by_authors(&self, author_ids: &[Snowflake]) -> RepoResult<Vec<Story>>;

    /// Record a unique view; idempotent per (story, viewer)
    async fn record_view(&self, view: &StoryView) -> RepoResult<()>;

    /// Check whether a user has viewed a story
    async fn has_viewed(&self, story_id: Snowflake, viewer_id: Snowflake) -> RepoResult<bool>;

    /// Viewers of a story, most recent first
    async fn list_viewers(&self, story_id: Snowflake) -> RepoResult<Vec<StoryView>>;

    /// View count for a story
    async fn view_count(&self, story_id: Snowflake) -> RepoResult<i64>;

    /// Upsert a poll vote; re-voting moves the vote
    async fn upsert_poll_vote(
        &self,
        story_id: Snowflake,
        user_id: Snowflake,
        option_index: i16,
    ) -> RepoResult<()>;

    /// A user's current poll vote
    async fn find_poll_vote(
        &self,
        story_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<i16>>;

    /// Votes per option index
    async fn poll_counts(&self, story_id: Snowflake) -> RepoResult<Vec<(i16, i64)>>;

    /// Upsert a slider submission; resubmission overwrites
    async fn upsert_slider_value(
        &self,
        story_id: Snowflake,
        user_id: Snowflake,
        value: i16,
    ) -> RepoResult<()>;

    /// A user's current slider value
    async fn find_slider_value(
        &self,
        story_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<i16>>;

    /// Aggregate slider results
    async fn slider_stats(&self, story_id: Snowflake) -> RepoResult<SliderStats>;
}

// ============================================================================
// Reel Repository
// ============================================================================

#[async_trait]
pub trait ReelRepository: Send + Sync {
    /// Find reel by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Reel>>;

    /// Create a new reel
    async fn create(&self, reel: &Reel) -> RepoResult<()>;

    /// Soft delete a reel
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    /// Recent reels across the network, newest first
    async fn list_recent(&self, query: FeedQuery) -> RepoResult<Vec<Reel>>;

    /// Reels by one author, newest first
    async fn find_by_author(&self, author_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<Reel>>;
}

// ============================================================================
// Audio Repository
// ============================================================================

#[async_trait]
pub trait AudioRepository: Send + Sync {
    /// Find audio message by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AudioMessage>>;

    /// Create an audio message in pending state
    async fn create(&self, audio: &AudioMessage) -> RepoResult<()>;

    /// Store a finished transcript and flip status to complete
    async fn complete_transcription(&self, id: Snowflake, transcript: &str) -> RepoResult<()>;

    /// Flip status to failed
    async fn fail_transcription(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Health Profile Repository
// ============================================================================

#[async_trait]
pub trait HealthProfileRepository: Send + Sync {
    /// A user's health profile
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Option<HealthProfile>>;

    /// Insert or replace the profile
    async fn upsert(&self, profile: &HealthProfile) -> RepoResult<()>;
}

// ============================================================================
// Plan Repository
// ============================================================================

#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Find plan by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Plan>>;

    /// Store a generated plan
    async fn create(&self, plan: &Plan) -> RepoResult<()>;

    /// A user's plans, newest first
    async fn find_by_user(&self, user_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<Plan>>;

    /// Delete a plan
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Token Repository
// ============================================================================

#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// The budget row for a user and period, if one exists
    async fn find_budget(
        &self,
        user_id: Snowflake,
        period_start: NaiveDate,
    ) -> RepoResult<Option<TokenBudget>>;

    /// Create the period's budget with the monthly grant if missing,
    /// returning the current row either way
    async fn ensure_budget(
        &self,
        user_id: Snowflake,
        period_start: NaiveDate,
        grant: i64,
    ) -> RepoResult<TokenBudget>;

    /// Atomically spend `amount` tokens if the budget allows it.
    /// Returns the updated budget on success, None if the balance was
    /// insufficient.
    async fn try_debit(
        &self,
        user_id: Snowflake,
        period_start: NaiveDate,
        amount: i64,
    ) -> RepoResult<Option<TokenBudget>>;

    /// Append a ledger entry
    async fn record_ledger(&self, entry: &TokenLedgerEntry) -> RepoResult<()>;

    /// A user's ledger, newest first
    async fn ledger(&self, user_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<TokenLedgerEntry>>;
}
