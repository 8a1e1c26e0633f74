//! Notification entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// What triggered a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    FollowRequest,
    FollowAccepted,
    Like,
    Comment,
    Reply,
    Message,
    PlanReady,
}

impl NotificationKind {
    /// Stable string form used for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FollowRequest => "follow_request",
            Self::FollowAccepted => "follow_accepted",
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Reply => "reply",
            Self::Message => "message",
            Self::PlanReady => "plan_ready",
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "follow_request" => Ok(Self::FollowRequest),
            "follow_accepted" => Ok(Self::FollowAccepted),
            "like" => Ok(Self::Like),
            "comment" => Ok(Self::Comment),
            "reply" => Ok(Self::Reply),
            "message" => Ok(Self::Message),
            "plan_ready" => Ok(Self::PlanReady),
            other => Err(format!("unknown notification kind: {other}")),
        }
    }
}

/// A notification delivered to a user.
///
/// `subject_id` points at whatever the notification is about (post,
/// comment, conversation, plan) depending on the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    pub actor_id: Snowflake,
    pub kind: NotificationKind,
    pub subject_id: Option<Snowflake>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new unread notification
    pub fn new(
        id: Snowflake,
        recipient_id: Snowflake,
        actor_id: Snowflake,
        kind: NotificationKind,
        subject_id: Option<Snowflake>,
    ) -> Self {
        Self {
            id,
            recipient_id,
            actor_id,
            kind,
            subject_id,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Check if the notification has been read
    #[inline]
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// Mark as read
    pub fn mark_read(&mut self) {
        if self.read_at.is_none() {
            self.read_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_is_unread() {
        let n = Notification::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            NotificationKind::Like,
            Some(Snowflake::new(4)),
        );
        assert!(!n.is_read());
    }

    #[test]
    fn test_mark_read_is_idempotent() {
        let mut n = Notification::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            NotificationKind::Comment,
            None,
        );
        n.mark_read();
        let first = n.read_at;
        n.mark_read();
        assert_eq!(n.read_at, first);
    }

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            NotificationKind::FollowRequest,
            NotificationKind::FollowAccepted,
            NotificationKind::Like,
            NotificationKind::Comment,
            NotificationKind::Reply,
            NotificationKind::Message,
            NotificationKind::PlanReady,
        ] {
            assert_eq!(kind.as_str().parse::<NotificationKind>().unwrap(), kind);
        }
    }
}
