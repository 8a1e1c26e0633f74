//! PostgreSQL implementation of ConversationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use pulse_core::entities::{Conversation, Message};
use pulse_core::traits::{ConversationRepository, FeedQuery, RepoResult};
use pulse_core::value_objects::Snowflake;

use crate::models::{ConversationModel, MessageModel};

use super::error::map_db_error;

const MESSAGE_COLUMNS: &str = "id, conversation_id, sender_id, content, audio_id, created_at";

/// PostgreSQL implementation of ConversationRepository
#[derive(Clone)]
pub struct PgConversationRepository {
    pool: PgPool,
}

impl PgConversationRepository {
    /// Create a new PgConversationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationRepository for PgConversationRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Conversation>> {
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, user_a, user_b, created_at FROM conversations WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn find_pair(&self, a: Snowflake, b: Snowflake) -> RepoResult<Option<Conversation>> {
        // Rows store the pair in canonical order
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT id, user_a, user_b, created_at
            FROM conversations
            WHERE user_a = LEAST($1, $2) AND user_b = GREATEST($1, $2)
            ",
        )
        .bind(a.into_inner())
        .bind(b.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Conversation::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, conversation: &Conversation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO conversations (id, user_a, user_b, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(conversation.id.into_inner())
        .bind(conversation.user_a.into_inner())
        .bind(conversation.user_b.into_inner())
        .bind(conversation.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Snowflake) -> RepoResult<Vec<Conversation>> {
        // Most recent activity first; a conversation without messages
        // sorts by its own id
        let result = sqlx::query_as::<_, ConversationModel>(
            r"
            SELECT c.id, c.user_a, c.user_b, c.created_at
            FROM conversations c
            WHERE c.user_a = $1 OR c.user_b = $1
            ORDER BY (
                SELECT COALESCE(MAX(m.id), c.id) FROM messages m WHERE m.conversation_id = c.id
            ) DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Conversation::from).collect())
    }

    #[instrument(skip(self, message))]
    async fn create_message(&self, message: &Message) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO messages (id, conversation_id, sender_id, content, audio_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(message.id.into_inner())
        .bind(message.conversation_id.into_inner())
        .bind(message.sender_id.into_inner())
        .bind(&message.content)
        .bind(message.audio_id.map(Snowflake::into_inner))
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_message(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn find_messages(
        &self,
        conversation_id: Snowflake,
        query: FeedQuery,
    ) -> RepoResult<Vec<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE conversation_id = $1
              AND ($2::BIGINT IS NULL OR id < $2)
            ORDER BY id DESC
            LIMIT $3
            "
        ))
        .bind(conversation_id.into_inner())
        .bind(query.before.map(Snowflake::into_inner))
        .bind(query.limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn last_message(&self, conversation_id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE conversation_id = $1
            ORDER BY id DESC
            LIMIT 1
            "
        ))
        .bind(conversation_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn mark_read(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
        message_id: Snowflake,
    ) -> RepoResult<()> {
        // High-water mark only moves forward
        sqlx::query(
            r"
            INSERT INTO conversation_reads (conversation_id, user_id, last_read_message_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (conversation_id, user_id) DO UPDATE
            SET last_read_message_id = GREATEST(
                conversation_reads.last_read_message_id,
                EXCLUDED.last_read_message_id
            )
            ",
        )
        .bind(conversation_id.into_inner())
        .bind(user_id.into_inner())
        .bind(message_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn unread_count(
        &self,
        conversation_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM messages
            WHERE conversation_id = $1
              AND sender_id <> $2
              AND id > COALESCE(
                  (SELECT last_read_message_id FROM conversation_reads
                   WHERE conversation_id = $1 AND user_id = $2),
                  0
              )
            ",
        )
        .bind(conversation_id.into_inner())
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
        assert_send_sync::<PgConversationRepository>();
    }
}
