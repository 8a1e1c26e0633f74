//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod ai;
pub mod audio;
pub mod auth;
pub mod better_me;
pub mod comment;
pub mod context;
pub mod error;
pub mod follow;
pub mod like;
pub mod message;
pub mod notification;
pub mod post;
pub mod reel;
pub mod story;
pub mod user;

use pulse_core::DomainEvent;
use tracing::info;

/// Log a domain event as a structured record.
///
/// Kept as a plain log sink; a message-bus publisher would hang off the
/// same call sites.
pub(crate) fn emit(event: &DomainEvent) {
    info!(event = event.name(), detail = ?event, "Domain event");
}

// Re-export all services for convenience
pub use ai::TokenService;
pub use audio::AudioService;
pub use auth::AuthService;
pub use better_me::BetterMeService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use follow::FollowService;
pub use like::LikeService;
pub use message::MessageService;
pub use notification::NotificationService;
pub use post::PostService;
pub use reel::ReelService;
pub use story::StoryService;
pub use user::UserService;
