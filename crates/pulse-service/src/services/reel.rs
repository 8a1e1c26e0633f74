//! Reel service
//!
//! Short-form video: publishing and public browsing.

use pulse_core::entities::Reel;
use pulse_core::{DomainError, FeedQuery, LikeTarget, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CreateReelRequest, ReelResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reel service
pub struct ReelService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReelService<'a> {
    /// Create a new ReelService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a reel
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        request: CreateReelRequest,
    ) -> ServiceResult<ReelResponse> {
        let reel = Reel::new(
            self.ctx.generate_id(),
            author_id,
            request.video_url,
            request.caption,
            request.duration_secs,
        );
        self.ctx.reel_repo().create(&reel).await?;

        info!(reel_id = %reel.id, author_id = %author_id, "Reel published");

        self.to_response(author_id, &reel).await
    }

    /// Get a single reel. Reels are public; only blocks hide them.
    #[instrument(skip(self))]
    pub async fn get(&self, viewer_id: Snowflake, reel_id: Snowflake) -> ServiceResult<ReelResponse> {
        let reel = self.find_reel(reel_id).await?;

        if self
            .ctx
            .follow_repo()
            .is_blocked_either_way(viewer_id, reel.author_id)
            .await?
        {
            return Err(ServiceError::Domain(DomainError::NotVisible));
        }

        self.to_response(viewer_id, &reel).await
    }

    /// Delete one of the caller's reels
    #[instrument(skip(self))]
    pub async fn delete(&self, author_id: Snowflake, reel_id: Snowflake) -> ServiceResult<()> {
        let reel = self.find_reel(reel_id).await?;

        if reel.author_id != author_id {
            return Err(ServiceError::Domain(DomainError::NotAuthor));
        }

        self.ctx.reel_repo().delete(reel_id).await?;

        info!(reel_id = %reel_id, "Reel deleted");

        Ok(())
    }

    /// Recent reels across the network
    #[instrument(skip(self))]
    pub async fn explore(
        &self,
        viewer_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<ReelResponse>> {
        let reels = self.ctx.reel_repo().list_recent(query).await?;

        let mut out = Vec::with_capacity(reels.len());
        for reel in &reels {
            // Skip content from blocked pairs rather than failing the page
            if self
                .ctx
                .follow_repo()
                .is_blocked_either_way(viewer_id, reel.author_id)
                .await?
            {
                continue;
            }
            out.push(self.to_response(viewer_id, reel).await?);
        }
        Ok(out)
    }

    /// Reels by one author
    #[instrument(skip(self))]
    pub async fn by_author(
        &self,
        viewer_id: Snowflake,
        author_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<ReelResponse>> {
        if viewer_id != author_id
            && self
                .ctx
                .follow_repo()
                .is_blocked_either_way(viewer_id, author_id)
                .await?
        {
            return Err(ServiceError::Domain(DomainError::NotVisible));
        }

        let reels = self.ctx.reel_repo().find_by_author(author_id, query).await?;

        let mut out = Vec::with_capacity(reels.len());
        for reel in &reels {
            out.push(self.to_response(viewer_id, reel).await?);
        }
        Ok(out)
    }

    async fn find_reel(&self, reel_id: Snowflake) -> ServiceResult<Reel> {
        self.ctx
            .reel_repo()
            .find_by_id(reel_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::ReelNotFound(reel_id)))
    }

    async fn to_response(&self, viewer_id: Snowflake, reel: &Reel) -> ServiceResult<ReelResponse> {
        let like_count = self
            .ctx
            .like_repo()
            .count(LikeTarget::Reel, reel.id)
            .await?;
        let liked_by_viewer = self
            .ctx
            .like_repo()
            .find(LikeTarget::Reel, reel.id, viewer_id)
            .await?
            .is_some();

        Ok(ReelResponse::from_reel(reel, like_count, liked_by_viewer))
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here with mocked dependencies
}
