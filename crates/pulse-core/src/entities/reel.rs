//! Reel entity - short-form video content

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// A short-form video. Reels are always public.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reel {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub video_url: String,
    pub caption: Option<String>,
    pub duration_secs: i32,
    pub created_at: DateTime<Utc>,
}

impl Reel {
    /// Create a new Reel
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        video_url: String,
        caption: Option<String>,
        duration_secs: i32,
    ) -> Self {
        Self {
            id,
            author_id,
            video_url,
            caption,
            duration_secs,
            created_at: Utc::now(),
        }
    }

    /// Check if the reel has a caption
    #[inline]
    pub fn has_caption(&self) -> bool {
        self.caption.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_predicate() {
        let mut reel = Reel::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "/media/reel.mp4".to_string(),
            None,
            30,
        );
        assert!(!reel.has_caption());
        reel.caption = Some("  ".to_string());
        assert!(!reel.has_caption());
        reel.caption = Some("sunset run".to_string());
        assert!(reel.has_caption());
    }
}
