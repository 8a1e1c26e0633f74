//! Conversation and Message entities - 1:1 direct messaging

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A 1:1 conversation between two users.
///
/// Participants are stored in canonical order (`user_a < user_b`) so the
/// pair is unique regardless of who opened the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    pub id: Snowflake,
    pub user_a: Snowflake,
    pub user_b: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new Conversation, normalizing participant order
    pub fn new(id: Snowflake, first: Snowflake, second: Snowflake) -> Self {
        let (user_a, user_b) = if first <= second {
            (first, second)
        } else {
            (second, first)
        };
        Self {
            id,
            user_a,
            user_b,
            created_at: Utc::now(),
        }
    }

    /// Check whether a user participates in this conversation
    #[inline]
    pub fn has_participant(&self, user_id: Snowflake) -> bool {
        self.user_a == user_id || self.user_b == user_id
    }

    /// The other participant, if `user_id` is one of the two
    pub fn other_participant(&self, user_id: Snowflake) -> Option<Snowflake> {
        if self.user_a == user_id {
            Some(self.user_b)
        } else if self.user_b == user_id {
            Some(self.user_a)
        } else {
            None
        }
    }
}

/// A message inside a conversation.
///
/// Either text content or an audio message reference; audio messages are
/// stored as a separate aggregate with their transcription state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub conversation_id: Snowflake,
    pub sender_id: Snowflake,
    pub content: Option<String>,
    pub audio_id: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new text message
    pub fn new_text(
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            content: Some(content),
            audio_id: None,
            created_at: Utc::now(),
        }
    }

    /// Create a new audio message reference
    pub fn new_audio(
        id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
        audio_id: Snowflake,
    ) -> Self {
        Self {
            id,
            conversation_id,
            sender_id,
            content: None,
            audio_id: Some(audio_id),
            created_at: Utc::now(),
        }
    }

    /// Check if this is an audio message
    #[inline]
    pub fn is_audio(&self) -> bool {
        self.audio_id.is_some()
    }

    /// Get a truncated preview of the message (for notifications)
    pub fn preview(&self, max_len: usize) -> &str {
        let content = match &self.content {
            Some(c) => c.as_str(),
            None => return "[audio]",
        };
        if content.len() <= max_len {
            content
        } else {
            let mut end = max_len;
            while !content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &content[..end]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participants_are_canonical() {
        let a = Conversation::new(Snowflake::new(1), Snowflake::new(9), Snowflake::new(3));
        let b = Conversation::new(Snowflake::new(2), Snowflake::new(3), Snowflake::new(9));
        assert_eq!((a.user_a, a.user_b), (b.user_a, b.user_b));
    }

    #[test]
    fn test_other_participant() {
        let conv = Conversation::new(Snowflake::new(1), Snowflake::new(3), Snowflake::new(9));
        assert_eq!(conv.other_participant(Snowflake::new(3)), Some(Snowflake::new(9)));
        assert_eq!(conv.other_participant(Snowflake::new(9)), Some(Snowflake::new(3)));
        assert_eq!(conv.other_participant(Snowflake::new(7)), None);
    }

    #[test]
    fn test_message_preview() {
        let msg = Message::new_text(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "Hello, world!".to_string(),
        );
        assert_eq!(msg.preview(5), "Hello");
        assert_eq!(msg.preview(100), "Hello, world!");
    }

    #[test]
    fn test_audio_message_preview() {
        let msg = Message::new_audio(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            Snowflake::new(4),
        );
        assert!(msg.is_audio());
        assert_eq!(msg.preview(50), "[audio]");
    }
}
