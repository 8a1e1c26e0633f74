//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::Post;
use pulse_core::traits::{FeedQuery, PostRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::PostModel;

use super::error::{map_db_error, post_not_found};

const POST_COLUMNS: &str =
    "id, author_id, content, media_urls, visibility, created_at, edited_at, deleted_at";

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1 AND deleted_at IS NULL"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self, post))]
    async fn create(&self, post: &Post) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO posts (id, author_id, content, media_urls, visibility, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(post.id.into_inner())
        .bind(post.author_id.into_inner())
        .bind(&post.content)
        .bind(&post.media_urls)
        .bind(post.visibility.as_str())
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, post))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET content = $2, media_urls = $3, visibility = $4, edited_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.content)
        .bind(&post.media_urls)
        .bind(post.visibility.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(post.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(post_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn feed(&self, viewer_id: Snowflake, query: FeedQuery) -> RepoResult<Vec<Post>> {
        // Own posts always appear; followee posts appear unless private
        let result = sqlx::query_as::<_, PostModel>(&format!(
            r"
            SELECT {POST_COLUMNS} FROM posts p
            WHERE p.deleted_at IS NULL
              AND (p.author_id = $1
                   OR (p.visibility IN ('public', 'followers')
                       AND EXISTS(
                           SELECT 1 FROM follows f
                           WHERE f.follower_id = $1
                             AND f.followee_id = p.author_id
                             AND f.status = 'accepted'
                       )))
              AND ($2::BIGINT IS NULL OR p.id < $2)
            ORDER BY p.id DESC
            LIMIT $3
            "
        ))
        .bind(viewer_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_author(
        &self,
        author_id: Snowflake,
        viewer_can_see_followers: bool,
        is_author: bool,
        query: FeedQuery,
    ) -> RepoResult<Vec<Post>> {
        let result = sqlx::query_as::<_, PostModel>(&format!(
            r"
            SELECT {POST_COLUMNS} FROM posts p
            WHERE p.author_id = $1 AND p.deleted_at IS NULL
              AND ($2
                   OR p.visibility = 'public'
                   OR ($3 AND p.visibility = 'followers'))
              AND ($4::BIGINT IS NULL OR p.id < $4)
            ORDER BY p.id DESC
            LIMIT $5
            "
        ))
        .bind(author_id.into_inner())
        .bind(is_author)
        .bind(viewer_can_see_followers)
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Post::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgPostRepository>();
    }
}
