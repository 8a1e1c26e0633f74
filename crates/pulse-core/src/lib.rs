//! # pulse-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain events.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    ActivityLevel, AudioMessage, Comment, Conversation, DietaryPreference, Follow, HealthProfile,
    Like, LikeTarget, Message, Notification, NotificationKind, Plan, PlanKind, Post, Reel, Story,
    StoryAttachment, StoryView, TokenBudget, TokenLedgerEntry, TranscriptionStatus, User,
    WellnessGoal,
};
pub use error::DomainError;
pub use events::DomainEvent;
pub use traits::{
    AudioRepository, CommentRepository, ConversationRepository, FeedQuery, FollowRepository,
    HealthProfileRepository, LikeRepository, NotificationRepository, PlanRepository,
    PostRepository, ReelRepository, RepoResult, StoryRepository, TokenRepository, UserRepository,
};
pub use value_objects::{
    FollowStatus, Snowflake, SnowflakeGenerator, SnowflakeParseError, Visibility,
};
