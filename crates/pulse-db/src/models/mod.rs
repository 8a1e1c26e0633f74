//! Database models - SQLx-compatible structs for PostgreSQL tables

mod audio;
mod comment;
mod conversation;
mod follow;
mod notification;
mod post;
mod reel;
mod story;
mod token;
mod user;
mod wellness;

pub use audio::AudioMessageModel;
pub use comment::CommentModel;
pub use conversation::{ConversationModel, MessageModel};
pub use follow::FollowModel;
pub use notification::NotificationModel;
pub use post::{LikeModel, PostModel};
pub use reel::ReelModel;
pub use story::{StoryModel, StoryViewModel};
pub use token::{TokenBudgetModel, TokenLedgerModel};
pub use user::UserModel;
pub use wellness::{HealthProfileModel, PlanModel};
