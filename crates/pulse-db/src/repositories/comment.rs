//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::Comment;
use pulse_core::traits::{CommentRepository, FeedQuery, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::CommentModel;

use super::error::{comment_not_found, map_db_error};

const COMMENT_COLUMNS: &str =
    "id, post_id, author_id, parent_id, content, created_at, edited_at, deleted_at";

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO comments (id, post_id, author_id, parent_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.post_id.into_inner())
        .bind(comment.author_id.into_inner())
        .bind(comment.parent_id.map(Snowflake::into_inner))
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, comment))]
    async fn update(&self, comment: &Comment) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE comments
            SET content = $2, edited_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(comment.id.into_inner())
        .bind(&comment.content)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE comments SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_top_level(
        &self,
        post_id: Snowflake,
        query: FeedQuery,
    ) -> RepoResult<Vec<Comment>> {
        let result = sqlx::query_as::<_, CommentModel>(&format!(
            r"
            SELECT {COMMENT_COLUMNS} FROM comments
            WHERE post_id = $1 AND parent_id IS NULL AND deleted_at IS NULL
              AND ($2::BIGINT IS NULL OR id < $2)
            ORDER BY id DESC
            LIMIT $3
            "
        ))
        .bind(post_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_replies(
        &self,
        parent_id: Snowflake,
        query: FeedQuery,
    ) -> RepoResult<Vec<Comment>> {
        // Replies read oldest first; the cursor walks forward
        let result = sqlx::query_as::<_, CommentModel>(&format!(
            r"
            SELECT {COMMENT_COLUMNS} FROM comments
            WHERE parent_id = $1 AND deleted_at IS NULL
              AND ($2::BIGINT IS NULL OR id > $2)
            ORDER BY id ASC
            LIMIT $3
            "
        ))
        .bind(parent_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn reply_count(&self, parent_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM comments WHERE parent_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(parent_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn count_by_post(&self, post_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM comments WHERE post_id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(post_id.into_inner())
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
        assert_send_sync::<PgCommentRepository>();
    }
}
