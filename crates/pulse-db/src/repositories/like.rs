//! PostgreSQL implementation of LikeRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{Like, LikeTarget};
use pulse_core::traits::{LikeRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::LikeModel;

use super::error::map_db_error;

/// PostgreSQL implementation of LikeRepository.
///
/// One table serves posts, comments, and reels; the unique index on
/// (target_kind, target_id, user_id) makes repeated likes a no-op.
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    /// Create a new PgLikeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        target: LikeTarget,
        target_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Like>> {
        let result = sqlx::query_as::<_, LikeModel>(
            r"
            SELECT id, user_id, target_kind, target_id, created_at
            FROM likes
            WHERE target_kind = $1 AND target_id = $2 AND user_id = $3
            ",
        )
        .bind(target.as_str())
        .bind(target_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Like::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, like: &Like) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO likes (id, user_id, target_kind, target_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (target_kind, target_id, user_id) DO NOTHING
            ",
        )
        .bind(like.id.into_inner())
        .bind(like.user_id.into_inner())
        .bind(like.target.as_str())
        .bind(like.target_id.into_inner())
        .bind(like.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(
        &self,
        target: LikeTarget,
        target_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            DELETE FROM likes
            WHERE target_kind = $1 AND target_id = $2 AND user_id = $3
            ",
        )
        .bind(target.as_str())
        .bind(target_id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self, target: LikeTarget, target_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM likes WHERE target_kind = $1 AND target_id = $2
            ",
        )
        .bind(target.as_str())
        .bind(target_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgLikeRepository>();
    }
}
