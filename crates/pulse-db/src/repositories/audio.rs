//! PostgreSQL implementation of AudioRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::AudioMessage;
use pulse_core::traits::{AudioRepository, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::AudioMessageModel;

use super::error::{audio_not_found, map_db_error};

const AUDIO_COLUMNS: &str =
    "id, conversation_id, sender_id, url, duration_secs, status, transcript, created_at";

/// PostgreSQL implementation of AudioRepository
#[derive(Clone)]
pub struct PgAudioRepository {
    pool: PgPool,
}

impl PgAudioRepository {
    /// Create a new PgAudioRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AudioRepository for PgAudioRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<AudioMessage>> {
        let result = sqlx::query_as::<_, AudioMessageModel>(&format!(
            "SELECT {AUDIO_COLUMNS} FROM audio_messages WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(AudioMessage::from))
    }

    #[instrument(skip(self, audio))]
    async fn create(&self, audio: &AudioMessage) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO audio_messages (id, conversation_id, sender_id, url, duration_secs,
                                        status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(audio.id.into_inner())
        .bind(audio.conversation_id.into_inner())
        .bind(audio.sender_id.into_inner())
        .bind(&audio.url)
        .bind(audio.duration_secs)
        .bind(audio.status.as_str())
        .bind(audio.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, transcript))]
    async fn complete_transcription(&self, id: Snowflake, transcript: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE audio_messages
            SET status = 'complete', transcript = $2
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .bind(transcript)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(audio_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn fail_transcription(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE audio_messages
            SET status = 'failed'
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(audio_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgAudioRepository>();
    }
}
