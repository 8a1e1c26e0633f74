//! Notification entity <-> model mapper

use pulse_core::entities::{Notification, NotificationKind};
use pulse_core::value_objects::Snowflake;

use crate::models::NotificationModel;

use super::parse_or;

impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Snowflake::new(model.id),
            recipient_id: Snowflake::new(model.recipient_id),
            actor_id: Snowflake::new(model.actor_id),
            kind: parse_or(&model.kind, NotificationKind::Message),
            subject_id: model.subject_id.map(Snowflake::new),
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}
