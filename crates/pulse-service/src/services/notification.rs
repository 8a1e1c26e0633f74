//! Notification service
//!
//! Delivers and lists notifications.

use pulse_core::entities::Notification;
use pulse_core::{DomainEvent, FeedQuery, NotificationKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::NotificationResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Deliver a notification, skipping self-notification.
    ///
    /// Used by other services when an action touches another user.
    pub(crate) async fn deliver(
        &self,
        recipient_id: Snowflake,
        actor_id: Snowflake,
        kind: NotificationKind,
        subject_id: Option<Snowflake>,
    ) -> ServiceResult<()> {
        if recipient_id == actor_id {
            return Ok(());
        }

        let notification = Notification::new(
            self.ctx.generate_id(),
            recipient_id,
            actor_id,
            kind,
            subject_id,
        );
        self.ctx.notification_repo().create(&notification).await?;
        self.log_delivered(&notification);

        Ok(())
    }

    /// Deliver a system notification to the actor themselves (plan ready)
    pub(crate) async fn deliver_to_self(
        &self,
        user_id: Snowflake,
        kind: NotificationKind,
        subject_id: Option<Snowflake>,
    ) -> ServiceResult<()> {
        let notification =
            Notification::new(self.ctx.generate_id(), user_id, user_id, kind, subject_id);
        self.ctx.notification_repo().create(&notification).await?;
        self.log_delivered(&notification);

        Ok(())
    }

    fn log_delivered(&self, notification: &Notification) {
        super::emit(&DomainEvent::NotificationDelivered {
            notification_id: notification.id,
            recipient_id: notification.recipient_id,
            kind: notification.kind,
        });
    }

    /// The caller's notifications, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<NotificationResponse>> {
        let notifications = self
            .ctx
            .notification_repo()
            .find_by_recipient(user_id, query)
            .await?;

        Ok(notifications.iter().map(NotificationResponse::from).collect())
    }

    /// Unread notification count
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<i64> {
        Ok(self.ctx.notification_repo().unread_count(user_id).await?)
    }

    /// Mark one of the caller's notifications read
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        user_id: Snowflake,
        notification_id: Snowflake,
    ) -> ServiceResult<()> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(notification_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Notification", notification_id.to_string())
            })?;

        if notification.recipient_id != user_id {
            return Err(ServiceError::permission_denied("not the recipient"));
        }

        self.ctx.notification_repo().mark_read(notification_id).await?;

        Ok(())
    }

    /// Mark all of the caller's notifications read
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Snowflake) -> ServiceResult<u64> {
        let changed = self.ctx.notification_repo().mark_all_read(user_id).await?;
        info!(user_id = %user_id, changed = changed, "Marked all notifications read");
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here with mocked dependencies
}
