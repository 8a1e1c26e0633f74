//! Repository implementations - PostgreSQL-backed data access

pub mod error;

mod audio;
mod comment;
mod conversation;
mod follow;
mod like;
mod notification;
mod post;
mod reel;
mod story;
mod token;
mod user;
mod wellness;

pub use audio::PgAudioRepository;
pub use comment::PgCommentRepository;
pub use conversation::PgConversationRepository;
pub use follow::PgFollowRepository;
pub use like::PgLikeRepository;
pub use notification::PgNotificationRepository;
pub use post::PgPostRepository;
pub use reel::PgReelRepository;
pub use story::PgStoryRepository;
pub use token::PgTokenRepository;
pub use user::PgUserRepository;
pub use wellness::{PgHealthProfileRepository, PgPlanRepository};
