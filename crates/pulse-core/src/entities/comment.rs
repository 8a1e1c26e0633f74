//! Comment entity - a comment on a post or a reply to another comment

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment on a post, optionally replying to a parent comment.
///
/// Replies are one level deep: a reply's parent is always a top-level
/// comment, and both belong to the same post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub author_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a new top-level comment
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        Self {
            id,
            post_id,
            author_id,
            parent_id: None,
            content,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    /// Create a reply to an existing comment
    pub fn new_reply(
        id: Snowflake,
        post_id: Snowflake,
        author_id: Snowflake,
        parent_id: Snowflake,
        content: String,
    ) -> Self {
        Self {
            id,
            post_id,
            author_id,
            parent_id: Some(parent_id),
            content,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    /// Check if this comment is a reply
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Check if comment has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    /// Edit the comment content
    pub fn edit(&mut self, content: String) {
        self.content = content;
        self.edited_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_comment() {
        let comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            "Nice post".to_string(),
        );
        assert!(!comment.is_reply());
        assert!(!comment.is_edited());
    }

    #[test]
    fn test_reply_carries_parent() {
        let reply = Comment::new_reply(
            Snowflake::new(2),
            Snowflake::new(10),
            Snowflake::new(21),
            Snowflake::new(1),
            "Agreed".to_string(),
        );
        assert!(reply.is_reply());
        assert_eq!(reply.parent_id, Some(Snowflake::new(1)));
    }

    #[test]
    fn test_edit() {
        let mut comment = Comment::new(
            Snowflake::new(1),
            Snowflake::new(10),
            Snowflake::new(20),
            "typo".to_string(),
        );
        comment.edit("fixed".to_string());
        assert!(comment.is_edited());
        assert_eq!(comment.content, "fixed");
    }
}
