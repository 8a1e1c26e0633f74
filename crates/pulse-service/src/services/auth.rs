//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout.

use pulse_cache::RefreshTokenData;
use pulse_common::auth::{hash_password, validate_password_strength, verify_password};
use pulse_core::entities::User;
use pulse_core::{DomainError, Snowflake};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, RefreshTokenRequest, RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(handle = %request.handle, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;
        validate_handle(&request.handle)?;

        // Check for taken identifiers
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::Domain(DomainError::EmailAlreadyExists));
        }
        if self.ctx.user_repo().handle_exists(&request.handle).await? {
            return Err(ServiceError::Domain(DomainError::HandleAlreadyExists));
        }

        // Hash password
        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        // Create user
        let user_id = self.ctx.generate_id();
        let display_name = request
            .display_name
            .unwrap_or_else(|| request.handle.clone());
        let user = User::new(user_id, request.handle, display_name, request.email);

        // Save to database
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "User registered successfully");

        let token_pair = self.issue_tokens(&user).await?;

        Ok(AuthResponse::new(
            token_pair.0,
            token_pair.1,
            token_pair.2,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        // Find user by email
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Login failed: user not found");
                ServiceError::App(pulse_common::AppError::InvalidCredentials)
            })?;

        // Get password hash
        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::App(pulse_common::AppError::InvalidCredentials)
            })?;

        // Verify password
        let is_valid = verify_password(&request.password, &password_hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(ServiceError::App(pulse_common::AppError::InvalidCredentials));
        }

        info!(user_id = %user.id, "User logged in successfully");

        let token_pair = self.issue_tokens(&user).await?;

        Ok(AuthResponse::new(
            token_pair.0,
            token_pair.1,
            token_pair.2,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Refresh access token using refresh token
    #[instrument(skip(self, request))]
    pub async fn refresh_tokens(
        &self,
        request: RefreshTokenRequest,
    ) -> ServiceResult<AuthResponse> {
        // Validate refresh token exists in Redis
        let refresh_data = self
            .ctx
            .refresh_token_store()
            .get(&request.refresh_token)
            .await?
            .ok_or(ServiceError::App(pulse_common::AppError::InvalidToken))?;

        // Get user
        let user = self
            .ctx
            .user_repo()
            .find_by_id(refresh_data.user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", refresh_data.user_id.to_string()))?;

        // Rotate: revoke the old refresh token before issuing new ones
        self.ctx
            .refresh_token_store()
            .revoke(&request.refresh_token)
            .await?;

        let token_pair = self.issue_tokens(&user).await?;

        info!(user_id = %user.id, "Tokens refreshed successfully");

        Ok(AuthResponse::new(
            token_pair.0,
            token_pair.1,
            token_pair.2,
            CurrentUserResponse::from(&user),
        ))
    }

    /// Logout user by revoking refresh token
    #[instrument(skip(self, refresh_token))]
    pub async fn logout(
        &self,
        user_id: Snowflake,
        refresh_token: Option<String>,
    ) -> ServiceResult<()> {
        if let Some(token) = refresh_token {
            self.ctx.refresh_token_store().revoke(&token).await?;
        } else {
            self.ctx
                .refresh_token_store()
                .revoke_all_for_user(user_id)
                .await?;
        }

        info!(user_id = %user_id, "User logged out successfully");
        Ok(())
    }

    /// Validate an access token and return the user ID
    #[instrument(skip(self, token))]
    pub async fn validate_token(&self, token: &str) -> ServiceResult<Snowflake> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_access_token(token)
            .map_err(ServiceError::from)?;

        claims.user_id().map_err(ServiceError::from)
    }

    /// Get user by access token
    #[instrument(skip(self, token))]
    pub async fn get_user_from_token(&self, token: &str) -> ServiceResult<User> {
        let user_id = self.validate_token(token).await?;

        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Generate a token pair and persist the refresh token
    async fn issue_tokens(&self, user: &User) -> ServiceResult<(String, String, i64)> {
        let token_pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let session_id = Uuid::new_v4().to_string();
        let refresh_data = RefreshTokenData::new(user.id, session_id);
        self.ctx
            .refresh_token_store()
            .store(&token_pair.refresh_token, &refresh_data)
            .await?;

        Ok((
            token_pair.access_token,
            token_pair.refresh_token,
            token_pair.expires_in,
        ))
    }
}

/// Handles must be lowercase alphanumeric with underscores, 3-32 chars
fn validate_handle(handle: &str) -> ServiceResult<()> {
    let ok_len = (3..=32).contains(&handle.len());
    let ok_chars = handle
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    let ok_start = handle
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_lowercase());

    if ok_len && ok_chars && ok_start {
        Ok(())
    } else {
        Err(ServiceError::Domain(DomainError::InvalidHandle(
            handle.to_string(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_rules() {
        assert!(validate_handle("jane_doe").is_ok());
        assert!(validate_handle("j42").is_ok());
        assert!(validate_handle("Jane").is_err());
        assert!(validate_handle("ab").is_err());
        assert!(validate_handle("2cool").is_err());
        assert!(validate_handle("has space").is_err());
    }
}
