//! Fixed-window rate limiter backed by Redis.
//!
//! Counts calls per user inside aligned time windows. The counter key
//! carries the window number, so stale windows expire on their own.

use crate::pool::{RedisPool, RedisResult};
use pulse_core::Snowflake;

/// Key prefix for AI call counters
const LIMITER_PREFIX: &str = "ai_calls:";

/// Fixed-window per-user call limiter
#[derive(Clone)]
pub struct FixedWindowLimiter {
    pool: RedisPool,
    max_calls: u32,
    window_secs: i64,
}

impl FixedWindowLimiter {
    /// Create a limiter allowing `max_calls` per `window_secs` window
    #[must_use]
    pub fn new(pool: RedisPool, max_calls: u32, window_secs: i64) -> Self {
        Self {
            pool,
            max_calls,
            window_secs: window_secs.max(1),
        }
    }

    fn key(&self, user_id: Snowflake) -> String {
        let window = chrono::Utc::now().timestamp() / self.window_secs;
        format!("{LIMITER_PREFIX}{user_id}:{window}")
    }

    /// Register one call and check it against the limit.
    ///
    /// Returns false when the user has exhausted the current window. The
    /// call is counted either way, so hammering a closed window does not
    /// reopen it early.
    pub async fn check(&self, user_id: Snowflake) -> RedisResult<bool> {
        let key = self.key(user_id);
        // TTL twice the window covers counters created near a boundary
        let count = self.pool.incr_with_ttl(&key, self.window_secs * 2).await?;

        let allowed = count <= i64::from(self.max_calls);
        if !allowed {
            tracing::debug!(
                user_id = %user_id,
                count = count,
                max_calls = self.max_calls,
                "AI call rate limit hit"
            );
        }

        Ok(allowed)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_floor() {
        // Windows shorter than a second are clamped
        let pool = RedisPool::new(crate::pool::RedisPoolConfig::default());
        if let Ok(pool) = pool {
            let limiter = FixedWindowLimiter::new(pool, 6, 0);
            assert_eq!(limiter.window_secs, 1);
        }
    }
}
