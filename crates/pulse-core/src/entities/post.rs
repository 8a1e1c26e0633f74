//! Post entity - a feed post, and the Like entity shared by all likeable content

use chrono::{DateTime, Utc};

use crate::value_objects::{Snowflake, Visibility};

/// Feed post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub media_urls: Vec<String>,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new Post
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        content: String,
        media_urls: Vec<String>,
        visibility: Visibility,
    ) -> Self {
        Self {
            id,
            author_id,
            content,
            media_urls,
            visibility,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    /// Check if post has been edited
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    /// Check if post carries media
    #[inline]
    pub fn has_media(&self) -> bool {
        !self.media_urls.is_empty()
    }

    /// Edit content and visibility
    pub fn edit(&mut self, content: String, visibility: Visibility) {
        self.content = content;
        self.visibility = visibility;
        self.edited_at = Some(Utc::now());
    }

    /// Check if post content is empty (whitespace only and no media)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty() && self.media_urls.is_empty()
    }
}

/// What a like points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LikeTarget {
    Post,
    Comment,
    Reel,
}

impl LikeTarget {
    /// Stable string form used for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
            Self::Reel => "reel",
        }
    }
}

impl std::str::FromStr for LikeTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" => Ok(Self::Post),
            "comment" => Ok(Self::Comment),
            "reel" => Ok(Self::Reel),
            other => Err(format!("unknown like target: {other}")),
        }
    }
}

/// A like on a post, comment, or reel.
///
/// At most one row per (target, user); a repeated like toggles the
/// first one off instead of duplicating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Like {
    pub id: Snowflake,
    pub user_id: Snowflake,
    pub target: LikeTarget,
    pub target_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Create a new Like
    pub fn new(id: Snowflake, user_id: Snowflake, target: LikeTarget, target_id: Snowflake) -> Self {
        Self {
            id,
            user_id,
            target,
            target_id,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_edit_marks_edited() {
        let mut post = Post::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "hello".to_string(),
            vec![],
            Visibility::Public,
        );
        assert!(!post.is_edited());
        post.edit("hello again".to_string(), Visibility::Followers);
        assert!(post.is_edited());
        assert_eq!(post.visibility, Visibility::Followers);
    }

    #[test]
    fn test_post_empty_check() {
        let post = Post::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "   ".to_string(),
            vec![],
            Visibility::Public,
        );
        assert!(post.is_empty());

        let with_media = Post::new(
            Snowflake::new(1),
            Snowflake::new(2),
            String::new(),
            vec!["/media/a.jpg".to_string()],
            Visibility::Public,
        );
        assert!(!with_media.is_empty());
    }

    #[test]
    fn test_like_target_roundtrip() {
        for t in [LikeTarget::Post, LikeTarget::Comment, LikeTarget::Reel] {
            assert_eq!(t.as_str().parse::<LikeTarget>().unwrap(), t);
        }
    }
}
