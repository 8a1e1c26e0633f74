//! # pulse-cache
//!
//! Redis caching layer for sessions and AI rate limiting.
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Refresh token management
//! - **Limiter**: Per-user fixed-window rate limiting for AI calls

pub mod limiter;
pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::{RefreshTokenData, RefreshTokenStore};

// Re-export limiter types
pub use limiter::FixedWindowLimiter;
