//! Visibility and follow-status value objects
//!
//! These two enums drive every privacy decision in the application:
//! who may see a post and what state a follow edge is in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content visibility level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Visible to everyone, including anonymous viewers
    #[default]
    Public,
    /// Visible to accepted followers only
    Followers,
    /// Visible to the author only
    Private,
}

impl Visibility {
    /// Stable string form used for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Followers => "followers",
            Self::Private => "private",
        }
    }

    /// Check whether a viewer with the given relationship may see content
    /// at this level. `is_author` wins over everything.
    #[must_use]
    pub fn allows(&self, is_author: bool, is_accepted_follower: bool) -> bool {
        if is_author {
            return true;
        }
        match self {
            Self::Public => true,
            Self::Followers => is_accepted_follower,
            Self::Private => false,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "followers" => Ok(Self::Followers),
            "private" => Ok(Self::Private),
            other => Err(format!("unknown visibility: {other}")),
        }
    }
}

/// State of a follow edge between two users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FollowStatus {
    /// Requested but not yet accepted (private accounts)
    Pending,
    /// Active follow relationship
    Accepted,
    /// The followee blocked the follower
    Blocked,
}

impl FollowStatus {
    /// Stable string form used for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Blocked => "blocked",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    #[inline]
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        matches!(self, Self::Blocked)
    }
}

impl fmt::Display for FollowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FollowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "blocked" => Ok(Self::Blocked),
            other => Err(format!("unknown follow status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_allows_author() {
        assert!(Visibility::Private.allows(true, false));
        assert!(Visibility::Followers.allows(true, false));
    }

    #[test]
    fn test_visibility_followers_requires_accept() {
        assert!(!Visibility::Followers.allows(false, false));
        assert!(Visibility::Followers.allows(false, true));
    }

    #[test]
    fn test_visibility_private_hides_from_followers() {
        assert!(!Visibility::Private.allows(false, true));
    }

    #[test]
    fn test_string_roundtrip() {
        for v in [Visibility::Public, Visibility::Followers, Visibility::Private] {
            assert_eq!(v.as_str().parse::<Visibility>().unwrap(), v);
        }
        for s in [FollowStatus::Pending, FollowStatus::Accepted, FollowStatus::Blocked] {
            assert_eq!(s.as_str().parse::<FollowStatus>().unwrap(), s);
        }
    }
}
