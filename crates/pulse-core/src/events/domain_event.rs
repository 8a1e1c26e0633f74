//! Domain events - events emitted when domain state changes
//!
//! These events describe the state changes that drive notification
//! fan-out and audit logging.

use serde::{Deserialize, Serialize};

use crate::entities::NotificationKind;
use crate::value_objects::Snowflake;

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    PostCreated {
        post_id: Snowflake,
        author_id: Snowflake,
    },
    PostDeleted {
        post_id: Snowflake,
    },
    CommentCreated {
        comment_id: Snowflake,
        post_id: Snowflake,
        author_id: Snowflake,
    },
    LikeToggled {
        target_id: Snowflake,
        user_id: Snowflake,
        liked: bool,
    },
    FollowRequested {
        follower_id: Snowflake,
        followee_id: Snowflake,
    },
    FollowAccepted {
        follower_id: Snowflake,
        followee_id: Snowflake,
    },
    MessageSent {
        message_id: Snowflake,
        conversation_id: Snowflake,
        sender_id: Snowflake,
    },
    StoryPosted {
        story_id: Snowflake,
        author_id: Snowflake,
    },
    TranscriptionFinished {
        audio_id: Snowflake,
        succeeded: bool,
    },
    PlanGenerated {
        plan_id: Snowflake,
        user_id: Snowflake,
    },
    NotificationDelivered {
        notification_id: Snowflake,
        recipient_id: Snowflake,
        kind: NotificationKind,
    },
}

impl DomainEvent {
    /// Event name used in structured logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::PostCreated { .. } => "POST_CREATED",
            Self::PostDeleted { .. } => "POST_DELETED",
            Self::CommentCreated { .. } => "COMMENT_CREATED",
            Self::LikeToggled { .. } => "LIKE_TOGGLED",
            Self::FollowRequested { .. } => "FOLLOW_REQUESTED",
            Self::FollowAccepted { .. } => "FOLLOW_ACCEPTED",
            Self::MessageSent { .. } => "MESSAGE_SENT",
            Self::StoryPosted { .. } => "STORY_POSTED",
            Self::TranscriptionFinished { .. } => "TRANSCRIPTION_FINISHED",
            Self::PlanGenerated { .. } => "PLAN_GENERATED",
            Self::NotificationDelivered { .. } => "NOTIFICATION_DELIVERED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization_tag() {
        let event = DomainEvent::PostCreated {
            post_id: Snowflake::new(1),
            author_id: Snowflake::new(2),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "POST_CREATED");
    }

    #[test]
    fn test_name_matches_tag() {
        let event = DomainEvent::LikeToggled {
            target_id: Snowflake::new(1),
            user_id: Snowflake::new(2),
            liked: true,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], event.name());
    }
}
