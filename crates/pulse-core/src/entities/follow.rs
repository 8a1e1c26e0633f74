//! Follow entity - a directed edge between two users

use chrono::{DateTime, Utc};

use crate::value_objects::{FollowStatus, Snowflake};

/// Directed follow edge.
///
/// At most one row exists per (follower, followee) pair; a block
/// overwrites whatever state the edge was in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Follow {
    pub follower_id: Snowflake,
    pub followee_id: Snowflake,
    pub status: FollowStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Follow {
    /// Create a new follow edge in the given state
    pub fn new(follower_id: Snowflake, followee_id: Snowflake, status: FollowStatus) -> Self {
        let now = Utc::now();
        Self {
            follower_id,
            followee_id,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Accept a pending request
    pub fn accept(&mut self) {
        self.status = FollowStatus::Accepted;
        self.updated_at = Utc::now();
    }

    /// Block the follower
    pub fn block(&mut self) {
        self.status = FollowStatus::Blocked;
        self.updated_at = Utc::now();
    }

    #[inline]
    pub fn is_accepted(&self) -> bool {
        self.status.is_accepted()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == FollowStatus::Pending
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.status.is_blocked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_pending() {
        let mut follow = Follow::new(Snowflake::new(1), Snowflake::new(2), FollowStatus::Pending);
        assert!(follow.is_pending());
        follow.accept();
        assert!(follow.is_accepted());
    }

    #[test]
    fn test_block_overwrites() {
        let mut follow = Follow::new(Snowflake::new(1), Snowflake::new(2), FollowStatus::Accepted);
        follow.block();
        assert!(follow.is_blocked());
        assert!(!follow.is_accepted());
    }
}
