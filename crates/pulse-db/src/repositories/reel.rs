//! PostgreSQL implementation of ReelRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::Reel;
use pulse_core::traits::{FeedQuery, ReelRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::ReelModel;

use super::error::{map_db_error, reel_not_found};

const REEL_COLUMNS: &str =
    "id, author_id, video_url, caption, duration_secs, created_at, deleted_at";

/// PostgreSQL implementation of ReelRepository
#[derive(Clone)]
pub struct PgReelRepository {
    pool: PgPool,
}

impl PgReelRepository {
    /// Create a new PgReelRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReelRepository for PgReelRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Reel>> {
        let result = sqlx::query_as::<_, ReelModel>(&format!(
            "SELECT {REEL_COLUMNS} FROM reels WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Reel::from))
    }

    #[instrument(skip(self, reel))]
    async fn create(&self, reel: &Reel) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO reels (id, author_id, video_url, caption, duration_secs, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(reel.id.into_inner())
        .bind(reel.author_id.into_inner())
        .bind(&reel.video_url)
        .bind(&reel.caption)
        .bind(reel.duration_secs)
        .bind(reel.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE reels SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(reel_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_recent(&self, query: FeedQuery) -> RepoResult<Vec<Reel>> {
        let result = sqlx::query_as::<_, ReelModel>(&format!(
            r"
            SELECT {REEL_COLUMNS} FROM reels
            WHERE deleted_at IS NULL
              AND ($1::BIGINT IS NULL OR id < $1)
            ORDER BY id DESC
            LIMIT $2
            "
        ))
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Reel::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_author(
        &self,
        author_id: Snowflake,
        query: FeedQuery,
    ) -> RepoResult<Vec<Reel>> {
        let result = sqlx::query_as::<_, ReelModel>(&format!(
            r"
            SELECT {REEL_COLUMNS} FROM reels
            WHERE author_id = $1 AND deleted_at IS NULL
              AND ($2::BIGINT IS NULL OR id < $2)
            ORDER BY id DESC
            LIMIT $3
            "
        ))
        .bind(author_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Reel::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReelRepository>();
    }
}
