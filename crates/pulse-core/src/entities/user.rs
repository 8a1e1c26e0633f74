//! User entity - represents an account on the network

use chrono::{DateTime, Utc};

use crate::value_objects::{Snowflake, Visibility};

/// User account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub handle: String,
    pub display_name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    /// Default visibility applied to new posts; a `Private` default also
    /// makes the account request-to-follow.
    pub default_visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, handle: String, display_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            handle,
            display_name,
            email,
            bio: None,
            avatar_url: None,
            default_visibility: Visibility::Public,
            created_at: now,
            updated_at: now,
        }
    }

    /// A private-by-default account requires follow approval
    #[inline]
    pub fn requires_follow_approval(&self) -> bool {
        self.default_visibility != Visibility::Public
    }

    /// Update the display name
    pub fn set_display_name(&mut self, display_name: String) {
        self.display_name = display_name;
        self.updated_at = Utc::now();
    }

    /// Update the bio (None clears it)
    pub fn set_bio(&mut self, bio: Option<String>) {
        self.bio = bio;
        self.updated_at = Utc::now();
    }

    /// Update the avatar (None clears it)
    pub fn set_avatar(&mut self, avatar_url: Option<String>) {
        self.avatar_url = avatar_url;
        self.updated_at = Utc::now();
    }

    /// Update the default post visibility
    pub fn set_default_visibility(&mut self, visibility: Visibility) {
        self.default_visibility = visibility;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::new(
            Snowflake::new(1),
            "jane".to_string(),
            "Jane Doe".to_string(),
            "jane@example.com".to_string(),
        )
    }

    #[test]
    fn test_new_user_is_public() {
        let user = sample();
        assert_eq!(user.default_visibility, Visibility::Public);
        assert!(!user.requires_follow_approval());
    }

    #[test]
    fn test_private_account_requires_approval() {
        let mut user = sample();
        user.set_default_visibility(Visibility::Followers);
        assert!(user.requires_follow_approval());
    }

    #[test]
    fn test_set_bio_updates_timestamp() {
        let mut user = sample();
        let before = user.updated_at;
        user.set_bio(Some("hello".to_string()));
        assert_eq!(user.bio.as_deref(), Some("hello"));
        assert!(user.updated_at >= before);
    }
}
