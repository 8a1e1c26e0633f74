//! PostgreSQL implementation of StoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{Story, StoryView};
use pulse_core::error::DomainError;
use pulse_core::traits::{RepoResult, SliderStats, StoryRepository};
use pulse_core::value_objects::Snowflake;

use crate::models::{StoryModel, StoryViewModel};

use super::error::{map_db_error, story_not_found};

const STORY_COLUMNS: &str =
    "id, author_id, media_url, caption, attachment, created_at, expires_at";

/// PostgreSQL implementation of StoryRepository
#[derive(Clone)]
pub struct PgStoryRepository {
    pool: PgPool,
}

impl PgStoryRepository {
    /// Create a new PgStoryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoryRepository for PgStoryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Story>> {
        let result = sqlx::query_as::<_, StoryModel>(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Story::from))
    }

    #[instrument(skip(self, story))]
    async fn create(&self, story: &Story) -> RepoResult<()> {
        let attachment = story
            .attachment
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| DomainError::Database(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO stories (id, author_id, media_url, caption, attachment,
                                 created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(story.id.into_inner())
        .bind(story.author_id.into_inner())
        .bind(&story.media_url)
        .bind(&story.caption)
        .bind(attachment)
        .bind(story.created_at)
        .bind(story.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM stories WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(story_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn active_by_authors(&self, author_ids: &[Snowflake]) -> RepoResult<Vec<Story>> {
        let ids: Vec<i64> = author_ids.iter().map(|id| id.into_inner()).collect();

        let result = sqlx::query_as::<_, StoryModel>(&format!(
            r"
            SELECT {STORY_COLUMNS} FROM stories
            WHERE author_id = ANY($1) AND expires_at > NOW()
            ORDER BY author_id, id ASC
            "
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Story::from).collect())
    }

    #[instrument(skip(self))]
    async fn record_view(&self, view: &StoryView) -> RepoResult<()> {
        // One row per viewer; repeat views keep the first timestamp
        sqlx::query(
            r"
            INSERT INTO story_views (story_id, viewer_id, viewed_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (story_id, viewer_id) DO NOTHING
            ",
        )
        .bind(view.story_id.into_inner())
        .bind(view.viewer_id.into_inner())
        .bind(view.viewed_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn has_viewed(&self, story_id: Snowflake, viewer_id: Snowflake) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM story_views WHERE story_id = $1 AND viewer_id = $2
            )
            ",
        )
        .bind(story_id.into_inner())
        .bind(viewer_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn list_viewers(&self, story_id: Snowflake) -> RepoResult<Vec<StoryView>> {
        let result = sqlx::query_as::<_, StoryViewModel>(
            r"
            SELECT story_id, viewer_id, viewed_at
            FROM story_views
            WHERE story_id = $1
            ORDER BY viewed_at DESC
            ",
        )
        .bind(story_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(StoryView::from).collect())
    }

    #[instrument(skip(self))]
    async fn view_count(&self, story_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM story_views WHERE story_id = $1
            ",
        )
        .bind(story_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn upsert_poll_vote(
        &self,
        story_id: Snowflake,
        user_id: Snowflake,
        option_index: i16,
    ) -> RepoResult<()> {
        // Re-voting moves the vote to the new option
        sqlx::query(
            r"
            INSERT INTO story_poll_votes (story_id, user_id, option_index, voted_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (story_id, user_id) DO UPDATE
            SET option_index = EXCLUDED.option_index, voted_at = NOW()
            ",
        )
        .bind(story_id.into_inner())
        .bind(user_id.into_inner())
        .bind(option_index)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_poll_vote(
        &self,
        story_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<i16>> {
        let result = sqlx::query_scalar::<_, i16>(
            r"
            SELECT option_index FROM story_poll_votes
            WHERE story_id = $1 AND user_id = $2
            ",
        )
        .bind(story_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn poll_counts(&self, story_id: Snowflake) -> RepoResult<Vec<(i16, i64)>> {
        let result = sqlx::query_as::<_, (i16, i64)>(
            r"
            SELECT option_index, COUNT(*) FROM story_poll_votes
            WHERE story_id = $1
            GROUP BY option_index
            ORDER BY option_index
            ",
        )
        .bind(story_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn upsert_slider_value(
        &self,
        story_id: Snowflake,
        user_id: Snowflake,
        value: i16,
    ) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO story_slider_votes (story_id, user_id, value, voted_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (story_id, user_id) DO UPDATE
            SET value = EXCLUDED.value, voted_at = NOW()
            ",
        )
        .bind(story_id.into_inner())
        .bind(user_id.into_inner())
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_slider_value(
        &self,
        story_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<i16>> {
        let result = sqlx::query_scalar::<_, i16>(
            r"
            SELECT value FROM story_slider_votes
            WHERE story_id = $1 AND user_id = $2
            ",
        )
        .bind(story_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn slider_stats(&self, story_id: Snowflake) -> RepoResult<SliderStats> {
        let (count, average) = sqlx::query_as::<_, (i64, f64)>(
            r"
            SELECT COUNT(*), COALESCE(AVG(value), 0)::DOUBLE PRECISION
            FROM story_slider_votes
            WHERE story_id = $1
            ",
        )
        .bind(story_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(SliderStats { count, average })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgStoryRepository>();
    }
}
