//! User service
//!
//! Handles user profile operations and lookup.

use pulse_core::{Snowflake, Visibility};
use tracing::{info, instrument};

use crate::dto::{CurrentUserResponse, ProfileResponse, UpdateUserRequest, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get current authenticated user (full profile)
    #[instrument(skip(self))]
    pub async fn get_current_user(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(CurrentUserResponse::from(&user))
    }

    /// Get a user's profile with social counts, as seen by `viewer_id`
    #[instrument(skip(self))]
    pub async fn get_profile(
        &self,
        viewer_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let (follower_count, following_count) = self.ctx.follow_repo().counts(user_id).await?;

        let follow_status = if viewer_id == user_id {
            None
        } else {
            self.ctx
                .follow_repo()
                .find(viewer_id, user_id)
                .await?
                .map(|f| f.status.to_string())
        };

        Ok(ProfileResponse {
            id: user.id.to_string(),
            handle: user.handle,
            display_name: user.display_name,
            bio: user.bio,
            avatar_url: user.avatar_url,
            follower_count,
            following_count,
            follow_status,
            created_at: user.created_at,
        })
    }

    /// Look up a user by handle
    #[instrument(skip(self))]
    pub async fn get_by_handle(&self, handle: &str) -> ServiceResult<UserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_handle(handle)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", handle.to_string()))?;

        Ok(UserResponse::from(&user))
    }

    /// Update current user's profile
    #[instrument(skip(self, request))]
    pub async fn update_user(
        &self,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let mut changed = false;

        if let Some(display_name) = request.display_name {
            user.set_display_name(display_name);
            changed = true;
        }

        if let Some(bio) = request.bio {
            // Empty string clears the bio
            let bio = if bio.trim().is_empty() { None } else { Some(bio) };
            user.set_bio(bio);
            changed = true;
        }

        if let Some(avatar_url) = request.avatar_url {
            let avatar = if avatar_url.trim().is_empty() {
                None
            } else {
                Some(avatar_url)
            };
            user.set_avatar(avatar);
            changed = true;
        }

        if let Some(visibility) = request.default_visibility {
            let visibility: Visibility = visibility
                .parse()
                .map_err(|_| ServiceError::validation("Unknown visibility"))?;
            user.set_default_visibility(visibility);
            changed = true;
        }

        if changed {
            self.ctx.user_repo().update(&user).await?;
            info!(user_id = %user_id, "User profile updated");
        }

        Ok(CurrentUserResponse::from(&user))
    }

    /// Search users by handle prefix
    #[instrument(skip(self))]
    pub async fn search(&self, prefix: &str, limit: i64) -> ServiceResult<Vec<UserResponse>> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let users = self
            .ctx
            .user_repo()
            .search_by_handle(prefix, limit.clamp(1, 50))
            .await?;

        Ok(users.iter().map(UserResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here with mocked dependencies
}
