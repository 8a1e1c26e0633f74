//! Messaging service
//!
//! 1:1 conversations: opening, sending, listing, and read markers.

use pulse_core::entities::{Conversation, Message};
use pulse_core::{DomainError, DomainEvent, FeedQuery, NotificationKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    AudioResponse, ConversationResponse, MessageResponse, SendMessageRequest, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// Load a conversation and check the caller participates
pub(crate) async fn find_participating(
    ctx: &ServiceContext,
    user_id: Snowflake,
    conversation_id: Snowflake,
) -> ServiceResult<Conversation> {
    let conversation = ctx
        .conversation_repo()
        .find_by_id(conversation_id)
        .await?
        .ok_or(ServiceError::Domain(DomainError::ConversationNotFound(
            conversation_id,
        )))?;

    if !conversation.has_participant(user_id) {
        return Err(ServiceError::Domain(DomainError::NotParticipant));
    }

    Ok(conversation)
}

/// Messaging service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Open (or return the existing) conversation with another user
    #[instrument(skip(self))]
    pub async fn open_conversation(
        &self,
        user_id: Snowflake,
        other_id: Snowflake,
    ) -> ServiceResult<ConversationResponse> {
        if user_id == other_id {
            return Err(ServiceError::validation("Cannot message yourself"));
        }

        let other = self
            .ctx
            .user_repo()
            .find_by_id(other_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", other_id.to_string()))?;

        if self
            .ctx
            .follow_repo()
            .is_blocked_either_way(user_id, other_id)
            .await?
        {
            return Err(ServiceError::Domain(DomainError::Blocked));
        }

        let conversation = match self
            .ctx
            .conversation_repo()
            .find_pair(user_id, other_id)
            .await?
        {
            Some(existing) => existing,
            None => {
                let conversation = Conversation::new(self.ctx.generate_id(), user_id, other_id);
                self.ctx.conversation_repo().create(&conversation).await?;
                info!(conversation_id = %conversation.id, "Conversation opened");
                conversation
            }
        };

        self.to_conversation_response(user_id, &conversation, Some(&other))
            .await
    }

    /// The caller's inbox, most recent activity first
    #[instrument(skip(self))]
    pub async fn list_conversations(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ConversationResponse>> {
        let conversations = self.ctx.conversation_repo().find_by_user(user_id).await?;

        let mut out = Vec::with_capacity(conversations.len());
        for conversation in &conversations {
            out.push(
                self.to_conversation_response(user_id, conversation, None)
                    .await?,
            );
        }
        Ok(out)
    }

    /// Send a text message
    #[instrument(skip(self, request))]
    pub async fn send(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let conversation = find_participating(self.ctx, user_id, conversation_id).await?;
        let other_id = conversation
            .other_participant(user_id)
            .ok_or(ServiceError::Domain(DomainError::NotParticipant))?;

        // A block placed after the conversation opened still stops delivery
        if self
            .ctx
            .follow_repo()
            .is_blocked_either_way(user_id, other_id)
            .await?
        {
            return Err(ServiceError::Domain(DomainError::Blocked));
        }

        let message = Message::new_text(
            self.ctx.generate_id(),
            conversation_id,
            user_id,
            request.content,
        );
        self.ctx.conversation_repo().create_message(&message).await?;

        NotificationService::new(self.ctx)
            .deliver(
                other_id,
                user_id,
                NotificationKind::Message,
                Some(conversation_id),
            )
            .await?;

        super::emit(&DomainEvent::MessageSent {
            message_id: message.id,
            conversation_id,
            sender_id: user_id,
        });

        Ok(MessageResponse::from_message(&message, None))
    }

    /// Messages in a conversation, newest first
    #[instrument(skip(self))]
    pub async fn messages(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<MessageResponse>> {
        let _ = find_participating(self.ctx, user_id, conversation_id).await?;

        let messages = self
            .ctx
            .conversation_repo()
            .find_messages(conversation_id, query)
            .await?;

        let mut out = Vec::with_capacity(messages.len());
        for message in &messages {
            out.push(self.to_message_response(message).await?);
        }
        Ok(out)
    }

    /// Advance the caller's read marker to `message_id`
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        user_id: Snowflake,
        conversation_id: Snowflake,
        message_id: Snowflake,
    ) -> ServiceResult<()> {
        let _ = find_participating(self.ctx, user_id, conversation_id).await?;

        let message = self
            .ctx
            .conversation_repo()
            .find_message(message_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::MessageNotFound(message_id)))?;

        if message.conversation_id != conversation_id {
            return Err(ServiceError::validation(
                "Message belongs to a different conversation",
            ));
        }

        self.ctx
            .conversation_repo()
            .mark_read(conversation_id, user_id, message_id)
            .await?;

        Ok(())
    }

    /// Assemble the inbox view of one conversation
    async fn to_conversation_response(
        &self,
        user_id: Snowflake,
        conversation: &Conversation,
        other: Option<&pulse_core::User>,
    ) -> ServiceResult<ConversationResponse> {
        let other_id = conversation
            .other_participant(user_id)
            .ok_or(ServiceError::Domain(DomainError::NotParticipant))?;

        let other_user = match other {
            Some(user) => UserResponse::from(user),
            None => {
                let user = self
                    .ctx
                    .user_repo()
                    .find_by_id(other_id)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("User", other_id.to_string()))?;
                UserResponse::from(&user)
            }
        };

        let last_message = match self
            .ctx
            .conversation_repo()
            .last_message(conversation.id)
            .await?
        {
            Some(message) => Some(self.to_message_response(&message).await?),
            None => None,
        };

        let unread_count = self
            .ctx
            .conversation_repo()
            .unread_count(conversation.id, user_id)
            .await?;

        Ok(ConversationResponse {
            id: conversation.id.to_string(),
            other_user,
            last_message,
            unread_count,
            created_at: conversation.created_at,
        })
    }

    /// Attach the audio aggregate when the message references one
    async fn to_message_response(&self, message: &Message) -> ServiceResult<MessageResponse> {
        let audio = match message.audio_id {
            Some(audio_id) => self
                .ctx
                .audio_repo()
                .find_by_id(audio_id)
                .await?
                .map(|a| AudioResponse::from(&a)),
            None => None,
        };

        Ok(MessageResponse::from_message(message, audio))
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here with mocked dependencies
}
