//! Like service
//!
//! One toggle endpoint covers posts, comments, and reels.

use pulse_core::entities::Like;
use pulse_core::{DomainError, DomainEvent, LikeTarget, NotificationKind, Snowflake};
use tracing::instrument;

use crate::dto::LikeToggleResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;
use super::post::ensure_post_visible;

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Toggle the caller's like on a target.
    ///
    /// A first like creates the row and notifies the author; a repeat like
    /// removes it.
    #[instrument(skip(self))]
    pub async fn toggle(
        &self,
        user_id: Snowflake,
        target: LikeTarget,
        target_id: Snowflake,
    ) -> ServiceResult<LikeToggleResponse> {
        let author_id = self.resolve_target(user_id, target, target_id).await?;

        let existing = self
            .ctx
            .like_repo()
            .find(target, target_id, user_id)
            .await?;

        let liked = if existing.is_some() {
            self.ctx
                .like_repo()
                .delete(target, target_id, user_id)
                .await?;
            false
        } else {
            let like = Like::new(self.ctx.generate_id(), user_id, target, target_id);
            self.ctx.like_repo().create(&like).await?;

            NotificationService::new(self.ctx)
                .deliver(author_id, user_id, NotificationKind::Like, Some(target_id))
                .await?;
            true
        };

        let like_count = self.ctx.like_repo().count(target, target_id).await?;

        super::emit(&DomainEvent::LikeToggled {
            target_id,
            user_id,
            liked,
        });

        Ok(LikeToggleResponse { liked, like_count })
    }

    /// Verify the target exists and is visible to the caller, returning
    /// its author
    async fn resolve_target(
        &self,
        user_id: Snowflake,
        target: LikeTarget,
        target_id: Snowflake,
    ) -> ServiceResult<Snowflake> {
        match target {
            LikeTarget::Post => {
                let post = self
                    .ctx
                    .post_repo()
                    .find_by_id(target_id)
                    .await?
                    .ok_or(ServiceError::Domain(DomainError::PostNotFound(target_id)))?;
                ensure_post_visible(self.ctx, user_id, &post).await?;
                Ok(post.author_id)
            }
            LikeTarget::Comment => {
                let comment = self
                    .ctx
                    .comment_repo()
                    .find_by_id(target_id)
                    .await?
                    .ok_or(ServiceError::Domain(DomainError::CommentNotFound(target_id)))?;
                let post = self
                    .ctx
                    .post_repo()
                    .find_by_id(comment.post_id)
                    .await?
                    .ok_or(ServiceError::Domain(DomainError::PostNotFound(
                        comment.post_id,
                    )))?;
                ensure_post_visible(self.ctx, user_id, &post).await?;
                Ok(comment.author_id)
            }
            LikeTarget::Reel => {
                let reel = self
                    .ctx
                    .reel_repo()
                    .find_by_id(target_id)
                    .await?
                    .ok_or(ServiceError::Domain(DomainError::ReelNotFound(target_id)))?;
                // Reels are public; only blocks hide them
                if self
                    .ctx
                    .follow_repo()
                    .is_blocked_either_way(user_id, reel.author_id)
                    .await?
                {
                    return Err(ServiceError::Domain(DomainError::NotVisible));
                }
                Ok(reel.author_id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here with mocked dependencies
}
