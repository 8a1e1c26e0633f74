//! # pulse-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `pulse-core`:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, PgPool};
pub use repositories::{
    PgAudioRepository, PgCommentRepository, PgConversationRepository, PgFollowRepository,
    PgHealthProfileRepository, PgLikeRepository, PgNotificationRepository, PgPlanRepository,
    PgPostRepository, PgReelRepository, PgStoryRepository, PgTokenRepository, PgUserRepository,
};
