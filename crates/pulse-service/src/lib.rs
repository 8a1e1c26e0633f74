//! # pulse-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod clients;
pub mod dto;
pub mod services;

pub use clients::{CompletionClient, CompletionOutput, MockCompletionClient};
pub use dto::*;
pub use services::{
    AudioService, AuthService, BetterMeService, CommentService, FollowService, LikeService,
    MessageService, NotificationService, PostService, ReelService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, StoryService, TokenService, UserService,
};
