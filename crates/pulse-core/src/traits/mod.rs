//! Repository traits (ports)

mod repositories;

pub use repositories::{
    AudioRepository, CommentRepository, ConversationRepository, FeedQuery, FollowRepository,
    HealthProfileRepository, LikeRepository, NotificationRepository, PlanRepository,
    PostRepository, ReelRepository, RepoResult, SliderStats, StoryRepository, TokenRepository,
    UserRepository,
};
