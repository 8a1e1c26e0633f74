//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, and other dependencies needed by services.

use std::sync::Arc;

use pulse_cache::{FixedWindowLimiter, RefreshTokenStore, SharedRedisPool};
use pulse_common::auth::JwtService;
use pulse_common::AiConfig;
use pulse_core::traits::{
    AudioRepository, CommentRepository, ConversationRepository, FollowRepository,
    HealthProfileRepository, LikeRepository, NotificationRepository, PlanRepository,
    PostRepository, ReelRepository, StoryRepository, TokenRepository, UserRepository,
};
use pulse_core::SnowflakeGenerator;
use pulse_db::PgPool;

use crate::clients::CompletionClient;

/// AI limiter window length
const AI_LIMITER_WINDOW_SECS: i64 = 60;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Redis cache stores
/// - JWT service for authentication
/// - Snowflake generator for ID generation
/// - The AI completion client and its per-user limiter
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    post_repo: Arc<dyn PostRepository>,
    like_repo: Arc<dyn LikeRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    conversation_repo: Arc<dyn ConversationRepository>,
    notification_repo: Arc<dyn NotificationRepository>,
    story_repo: Arc<dyn StoryRepository>,
    reel_repo: Arc<dyn ReelRepository>,
    audio_repo: Arc<dyn AudioRepository>,
    health_profile_repo: Arc<dyn HealthProfileRepository>,
    plan_repo: Arc<dyn PlanRepository>,
    token_repo: Arc<dyn TokenRepository>,

    // Cache stores
    refresh_token_store: RefreshTokenStore,
    ai_limiter: FixedWindowLimiter,

    // AI
    completion_client: Arc<dyn CompletionClient>,
    ai_config: AiConfig,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        follow_repo: Arc<dyn FollowRepository>,
        post_repo: Arc<dyn PostRepository>,
        like_repo: Arc<dyn LikeRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        conversation_repo: Arc<dyn ConversationRepository>,
        notification_repo: Arc<dyn NotificationRepository>,
        story_repo: Arc<dyn StoryRepository>,
        reel_repo: Arc<dyn ReelRepository>,
        audio_repo: Arc<dyn AudioRepository>,
        health_profile_repo: Arc<dyn HealthProfileRepository>,
        plan_repo: Arc<dyn PlanRepository>,
        token_repo: Arc<dyn TokenRepository>,
        completion_client: Arc<dyn CompletionClient>,
        ai_config: AiConfig,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        // Clone the inner RedisPool from the Arc
        let inner_pool = (*redis_pool).clone();
        let refresh_token_store = RefreshTokenStore::new(inner_pool.clone());
        let ai_limiter = FixedWindowLimiter::new(
            inner_pool,
            ai_config.calls_per_minute,
            AI_LIMITER_WINDOW_SECS,
        );

        Self {
            pool,
            redis_pool,
            user_repo,
            follow_repo,
            post_repo,
            like_repo,
            comment_repo,
            conversation_repo,
            notification_repo,
            story_repo,
            reel_repo,
            audio_repo,
            health_profile_repo,
            plan_repo,
            token_repo,
            refresh_token_store,
            ai_limiter,
            completion_client,
            ai_config,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the follow repository
    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    /// Get the post repository
    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    /// Get the like repository
    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    /// Get the conversation repository
    pub fn conversation_repo(&self) -> &dyn ConversationRepository {
        self.conversation_repo.as_ref()
    }

    /// Get the notification repository
    pub fn notification_repo(&self) -> &dyn NotificationRepository {
        self.notification_repo.as_ref()
    }

    /// Get the story repository
    pub fn story_repo(&self) -> &dyn StoryRepository {
        self.story_repo.as_ref()
    }

    /// Get the reel repository
    pub fn reel_repo(&self) -> &dyn ReelRepository {
        self.reel_repo.as_ref()
    }

    /// Get the audio message repository
    pub fn audio_repo(&self) -> &dyn AudioRepository {
        self.audio_repo.as_ref()
    }

    /// Get the health profile repository
    pub fn health_profile_repo(&self) -> &dyn HealthProfileRepository {
        self.health_profile_repo.as_ref()
    }

    /// Get the plan repository
    pub fn plan_repo(&self) -> &dyn PlanRepository {
        self.plan_repo.as_ref()
    }

    /// Get the token budget repository
    pub fn token_repo(&self) -> &dyn TokenRepository {
        self.token_repo.as_ref()
    }

    // === Cache Stores ===

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    /// Get the per-user AI call limiter
    pub fn ai_limiter(&self) -> &FixedWindowLimiter {
        &self.ai_limiter
    }

    // === AI ===

    /// Get the completion client
    pub fn completion_client(&self) -> &dyn CompletionClient {
        self.completion_client.as_ref()
    }

    /// Get the AI configuration
    pub fn ai_config(&self) -> &AiConfig {
        &self.ai_config
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> pulse_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("cache_stores", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    conversation_repo: Option<Arc<dyn ConversationRepository>>,
    notification_repo: Option<Arc<dyn NotificationRepository>>,
    story_repo: Option<Arc<dyn StoryRepository>>,
    reel_repo: Option<Arc<dyn ReelRepository>>,
    audio_repo: Option<Arc<dyn AudioRepository>>,
    health_profile_repo: Option<Arc<dyn HealthProfileRepository>>,
    plan_repo: Option<Arc<dyn PlanRepository>>,
    token_repo: Option<Arc<dyn TokenRepository>>,
    completion_client: Option<Arc<dyn CompletionClient>>,
    ai_config: Option<AiConfig>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            user_repo: None,
            follow_repo: None,
            post_repo: None,
            like_repo: None,
            comment_repo: None,
            conversation_repo: None,
            notification_repo: None,
            story_repo: None,
            reel_repo: None,
            audio_repo: None,
            health_profile_repo: None,
            plan_repo: None,
            token_repo: None,
            completion_client: None,
            ai_config: None,
            jwt_service: None,
            snowflake_generator: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn conversation_repo(mut self, repo: Arc<dyn ConversationRepository>) -> Self {
        self.conversation_repo = Some(repo);
        self
    }

    pub fn notification_repo(mut self, repo: Arc<dyn NotificationRepository>) -> Self {
        self.notification_repo = Some(repo);
        self
    }

    pub fn story_repo(mut self, repo: Arc<dyn StoryRepository>) -> Self {
        self.story_repo = Some(repo);
        self
    }

    pub fn reel_repo(mut self, repo: Arc<dyn ReelRepository>) -> Self {
        self.reel_repo = Some(repo);
        self
    }

    pub fn audio_repo(mut self, repo: Arc<dyn AudioRepository>) -> Self {
        self.audio_repo = Some(repo);
        self
    }

    pub fn health_profile_repo(mut self, repo: Arc<dyn HealthProfileRepository>) -> Self {
        self.health_profile_repo = Some(repo);
        self
    }

    pub fn plan_repo(mut self, repo: Arc<dyn PlanRepository>) -> Self {
        self.plan_repo = Some(repo);
        self
    }

    pub fn token_repo(mut self, repo: Arc<dyn TokenRepository>) -> Self {
        self.token_repo = Some(repo);
        self
    }

    pub fn completion_client(mut self, client: Arc<dyn CompletionClient>) -> Self {
        self.completion_client = Some(client);
        self
    }

    pub fn ai_config(mut self, config: AiConfig) -> Self {
        self.ai_config = Some(config);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.follow_repo
                .ok_or_else(|| ServiceError::validation("follow_repo is required"))?,
            self.post_repo
                .ok_or_else(|| ServiceError::validation("post_repo is required"))?,
            self.like_repo
                .ok_or_else(|| ServiceError::validation("like_repo is required"))?,
            self.comment_repo
                .ok_or_else(|| ServiceError::validation("comment_repo is required"))?,
            self.conversation_repo
                .ok_or_else(|| ServiceError::validation("conversation_repo is required"))?,
            self.notification_repo
                .ok_or_else(|| ServiceError::validation("notification_repo is required"))?,
            self.story_repo
                .ok_or_else(|| ServiceError::validation("story_repo is required"))?,
            self.reel_repo
                .ok_or_else(|| ServiceError::validation("reel_repo is required"))?,
            self.audio_repo
                .ok_or_else(|| ServiceError::validation("audio_repo is required"))?,
            self.health_profile_repo
                .ok_or_else(|| ServiceError::validation("health_profile_repo is required"))?,
            self.plan_repo
                .ok_or_else(|| ServiceError::validation("plan_repo is required"))?,
            self.token_repo
                .ok_or_else(|| ServiceError::validation("token_repo is required"))?,
            self.completion_client
                .ok_or_else(|| ServiceError::validation("completion_client is required"))?,
            self.ai_config.unwrap_or_default(),
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
