//! Conversation and message entity <-> model mappers

use pulse_core::entities::{Conversation, Message};
use pulse_core::value_objects::Snowflake;

use crate::models::{ConversationModel, MessageModel};

impl From<ConversationModel> for Conversation {
    fn from(model: ConversationModel) -> Self {
        Conversation {
            id: Snowflake::new(model.id),
            user_a: Snowflake::new(model.user_a),
            user_b: Snowflake::new(model.user_b),
            created_at: model.created_at,
        }
    }
}

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            conversation_id: Snowflake::new(model.conversation_id),
            sender_id: Snowflake::new(model.sender_id),
            content: model.content,
            audio_id: model.audio_id.map(Snowflake::new),
            created_at: model.created_at,
        }
    }
}
