//! Domain entities

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

pub use audio::{AudioMessage, TranscriptionStatus};
pub use comment::Comment;
pub use conversation::{Conversation, Message};
pub use follow::Follow;
pub use notification::{Notification, NotificationKind};
pub use post::{Like, LikeTarget, Post};
pub use reel::Reel;
pub use story::{Story, StoryAttachment, StoryView};
pub use token::{TokenBudget, TokenLedgerEntry};
pub use user::User;
pub use wellness::{ActivityLevel, DietaryPreference, HealthProfile, Plan, PlanKind, WellnessGoal};
