//! PostgreSQL implementation of FollowRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{Follow, User};
use pulse_core::error::DomainError;
use pulse_core::traits::{FeedQuery, FollowRepository, RepoResult};
use pulse_core::value_objects::{FollowStatus, Snowflake};

use crate::models::{FollowModel, UserModel};

use super::error::{follow_not_found, map_db_error, map_unique_violation};

/// PostgreSQL implementation of FollowRepository
#[derive(Clone)]
pub struct PgFollowRepository {
    pool: PgPool,
}

impl PgFollowRepository {
    /// Create a new PgFollowRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn find(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
    ) -> RepoResult<Option<Follow>> {
        let result = sqlx::query_as::<_, FollowModel>(
            r"
            SELECT follower_id, followee_id, status, created_at, updated_at
            FROM follows
            WHERE follower_id = $1 AND followee_id = $2
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followee_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Follow::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, follow: &Follow) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO follows (follower_id, followee_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(follow.follower_id.into_inner())
        .bind(follow.followee_id.into_inner())
        .bind(follow.status.as_str())
        .bind(follow.created_at)
        .bind(follow.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyFollowing))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
        status: FollowStatus,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE follows
            SET status = $3, updated_at = NOW()
            WHERE follower_id = $1 AND followee_id = $2
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followee_id.into_inner())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(follow_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, follower_id: Snowflake, followee_id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM follows WHERE follower_id = $1 AND followee_id = $2
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followee_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(follow_not_found());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn followers(&self, user_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.handle, u.display_name, u.email, u.password_hash, u.bio, u.avatar_url,
                   u.default_visibility, u.created_at, u.updated_at, u.deleted_at
            FROM users u
            JOIN follows f ON f.follower_id = u.id
            WHERE f.followee_id = $1 AND f.status = 'accepted' AND u.deleted_at IS NULL
              AND ($2::BIGINT IS NULL OR u.id < $2)
            ORDER BY u.id DESC
            LIMIT $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn following(&self, user_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT u.id, u.handle, u.display_name, u.email, u.password_hash, u.bio, u.avatar_url,
                   u.default_visibility, u.created_at, u.updated_at, u.deleted_at
            FROM users u
            JOIN follows f ON f.followee_id = u.id
            WHERE f.follower_id = $1 AND f.status = 'accepted' AND u.deleted_at IS NULL
              AND ($2::BIGINT IS NULL OR u.id < $2)
            ORDER BY u.id DESC
            LIMIT $3
            ",
        )
        .bind(user_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn pending_requests(&self, user_id: Snowflake) -> RepoResult<Vec<Follow>> {
        let result = sqlx::query_as::<_, FollowModel>(
            r"
            SELECT follower_id, followee_id, status, created_at, updated_at
            FROM follows
            WHERE followee_id = $1 AND status = 'pending'
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Follow::from).collect())
    }

    #[instrument(skip(self))]
    async fn is_accepted(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
    ) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM follows
                WHERE follower_id = $1 AND followee_id = $2 AND status = 'accepted'
            )
            ",
        )
        .bind(follower_id.into_inner())
        .bind(followee_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn is_blocked_either_way(&self, a: Snowflake, b: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM follows
                WHERE ((follower_id = $1 AND followee_id = $2)
                    OR (follower_id = $2 AND followee_id = $1))
                  AND status = 'blocked'
            )
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn counts(&self, user_id: Snowflake) -> RepoResult<(i64, i64)> {
        let result = sqlx::query_as::<_, (i64, i64)>(
            r"
            SELECT
                (SELECT COUNT(*) FROM follows WHERE followee_id = $1 AND status = 'accepted'),
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1 AND status = 'accepted')
            ",
        )
        .bind(user_id.into_inner())
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
        assert_send_sync::<PgFollowRepository>();
    }
}
