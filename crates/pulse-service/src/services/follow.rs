//! Follow service
//!
//! Manages the follow graph: requests, approvals, blocks, and listings.
//!
//! Edges are directed. A block is stored on the edge pointing from the
//! blocked user towards the blocker, overwriting whatever state that edge
//! was in, so the blocked user cannot re-request.

use pulse_core::entities::Follow;
use pulse_core::{DomainError, DomainEvent, FeedQuery, FollowStatus, NotificationKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::{FollowResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    /// Create a new FollowService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Follow a user. Public accounts accept immediately; private accounts
    /// get a pending request.
    #[instrument(skip(self))]
    pub async fn follow(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
    ) -> ServiceResult<FollowResponse> {
        if follower_id == followee_id {
            return Err(ServiceError::Domain(DomainError::SelfFollow));
        }

        let followee = self
            .ctx
            .user_repo()
            .find_by_id(followee_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", followee_id.to_string()))?;

        if self
            .ctx
            .follow_repo()
            .is_blocked_either_way(follower_id, followee_id)
            .await?
        {
            return Err(ServiceError::Domain(DomainError::Blocked));
        }

        if self
            .ctx
            .follow_repo()
            .find(follower_id, followee_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Domain(DomainError::AlreadyFollowing));
        }

        let status = if followee.requires_follow_approval() {
            FollowStatus::Pending
        } else {
            FollowStatus::Accepted
        };

        let follow = Follow::new(follower_id, followee_id, status);
        self.ctx.follow_repo().create(&follow).await?;

        if status == FollowStatus::Pending {
            NotificationService::new(self.ctx)
                .deliver(
                    followee_id,
                    follower_id,
                    NotificationKind::FollowRequest,
                    None,
                )
                .await?;
            super::emit(&DomainEvent::FollowRequested {
                follower_id,
                followee_id,
            });
        }

        info!(
            follower_id = %follower_id,
            followee_id = %followee_id,
            status = %status,
            "Follow edge created"
        );

        Ok(FollowResponse::from(follow))
    }

    /// Accept a pending follow request addressed to `followee_id`
    #[instrument(skip(self))]
    pub async fn accept(
        &self,
        followee_id: Snowflake,
        follower_id: Snowflake,
    ) -> ServiceResult<FollowResponse> {
        let mut follow = self
            .ctx
            .follow_repo()
            .find(follower_id, followee_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::FollowNotFound))?;

        if !follow.is_pending() {
            return Err(ServiceError::conflict("Request is not pending"));
        }

        follow.accept();
        self.ctx
            .follow_repo()
            .set_status(follower_id, followee_id, FollowStatus::Accepted)
            .await?;

        NotificationService::new(self.ctx)
            .deliver(
                follower_id,
                followee_id,
                NotificationKind::FollowAccepted,
                None,
            )
            .await?;

        super::emit(&DomainEvent::FollowAccepted {
            follower_id,
            followee_id,
        });

        Ok(FollowResponse::from(follow))
    }

    /// Decline a pending follow request addressed to `followee_id`
    #[instrument(skip(self))]
    pub async fn decline(
        &self,
        followee_id: Snowflake,
        follower_id: Snowflake,
    ) -> ServiceResult<()> {
        let follow = self
            .ctx
            .follow_repo()
            .find(follower_id, followee_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::FollowNotFound))?;

        if !follow.is_pending() {
            return Err(ServiceError::conflict("Request is not pending"));
        }

        self.ctx
            .follow_repo()
            .delete(follower_id, followee_id)
            .await?;

        Ok(())
    }

    /// Remove the caller's edge towards a user (unfollow or cancel request)
    #[instrument(skip(self))]
    pub async fn unfollow(
        &self,
        follower_id: Snowflake,
        followee_id: Snowflake,
    ) -> ServiceResult<()> {
        let follow = self
            .ctx
            .follow_repo()
            .find(follower_id, followee_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::FollowNotFound))?;

        // A blocked edge belongs to the blocker; the blocked side cannot clear it
        if follow.is_blocked() {
            return Err(ServiceError::Domain(DomainError::Blocked));
        }

        self.ctx
            .follow_repo()
            .delete(follower_id, followee_id)
            .await?;

        info!(follower_id = %follower_id, followee_id = %followee_id, "Unfollowed");

        Ok(())
    }

    /// Remove one of the caller's accepted followers
    #[instrument(skip(self))]
    pub async fn remove_follower(
        &self,
        followee_id: Snowflake,
        follower_id: Snowflake,
    ) -> ServiceResult<()> {
        let follow = self
            .ctx
            .follow_repo()
            .find(follower_id, followee_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::FollowNotFound))?;

        if !follow.is_accepted() {
            return Err(ServiceError::Domain(DomainError::FollowNotFound));
        }

        self.ctx
            .follow_repo()
            .delete(follower_id, followee_id)
            .await?;

        info!(followee_id = %followee_id, follower_id = %follower_id, "Follower removed");

        Ok(())
    }

    /// Block a user. Severs both directions and pins the blocked user's
    /// edge in the blocked state.
    #[instrument(skip(self))]
    pub async fn block(&self, blocker_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        if blocker_id == target_id {
            return Err(ServiceError::validation("Cannot block yourself"));
        }

        let _ = self
            .ctx
            .user_repo()
            .find_by_id(target_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", target_id.to_string()))?;

        // Drop the blocker's own edge towards the target
        if self
            .ctx
            .follow_repo()
            .find(blocker_id, target_id)
            .await?
            .is_some()
        {
            self.ctx.follow_repo().delete(blocker_id, target_id).await?;
        }

        // Pin the target's edge towards the blocker
        match self.ctx.follow_repo().find(target_id, blocker_id).await? {
            Some(_) => {
                self.ctx
                    .follow_repo()
                    .set_status(target_id, blocker_id, FollowStatus::Blocked)
                    .await?;
            }
            None => {
                let edge = Follow::new(target_id, blocker_id, FollowStatus::Blocked);
                self.ctx.follow_repo().create(&edge).await?;
            }
        }

        info!(blocker_id = %blocker_id, target_id = %target_id, "User blocked");

        Ok(())
    }

    /// Remove a block previously placed by `blocker_id`
    #[instrument(skip(self))]
    pub async fn unblock(&self, blocker_id: Snowflake, target_id: Snowflake) -> ServiceResult<()> {
        let edge = self
            .ctx
            .follow_repo()
            .find(target_id, blocker_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::FollowNotFound))?;

        if !edge.is_blocked() {
            return Err(ServiceError::conflict("User is not blocked"));
        }

        self.ctx.follow_repo().delete(target_id, blocker_id).await?;

        info!(blocker_id = %blocker_id, target_id = %target_id, "User unblocked");

        Ok(())
    }

    /// Accepted followers of a user
    #[instrument(skip(self))]
    pub async fn followers(
        &self,
        user_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.follow_repo().followers(user_id, query).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Users a user follows
    #[instrument(skip(self))]
    pub async fn following(
        &self,
        user_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<UserResponse>> {
        let users = self.ctx.follow_repo().following(user_id, query).await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Pending incoming requests for the caller, with requester profiles
    #[instrument(skip(self))]
    pub async fn pending_requests(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<(FollowResponse, Option<UserResponse>)>> {
        let requests = self.ctx.follow_repo().pending_requests(user_id).await?;

        let mut out = Vec::with_capacity(requests.len());
        for follow in requests {
            let requester = self
                .ctx
                .user_repo()
                .find_by_id(follow.follower_id)
                .await?
                .map(|u| UserResponse::from(&u));
            out.push((FollowResponse::from(follow), requester));
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here with mocked dependencies
}
