//! Story entity - ephemeral content with optional poll/slider attachments

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Interactive attachment on a story
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoryAttachment {
    /// Multiple-choice poll, 2-4 options
    Poll { question: String, options: Vec<String> },
    /// Emoji slider, values 0-100
    Slider { emoji: String, prompt: String },
}

impl StoryAttachment {
    /// Number of poll options, or None for sliders
    pub fn option_count(&self) -> Option<usize> {
        match self {
            Self::Poll { options, .. } => Some(options.len()),
            Self::Slider { .. } => None,
        }
    }

    /// Check whether an option index is valid for this attachment
    pub fn has_option(&self, index: i16) -> bool {
        match self {
            Self::Poll { options, .. } => (0..options.len() as i16).contains(&index),
            Self::Slider { .. } => false,
        }
    }
}

/// An ephemeral story, visible for 24 hours after creation
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub media_url: String,
    pub caption: Option<String>,
    pub attachment: Option<StoryAttachment>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Story {
    /// Story lifetime
    pub const TTL_HOURS: i64 = 24;

    /// Create a new Story expiring [`Self::TTL_HOURS`] from now
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        media_url: String,
        caption: Option<String>,
        attachment: Option<StoryAttachment>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            author_id,
            media_url,
            caption,
            attachment,
            created_at: now,
            expires_at: now + Duration::hours(Self::TTL_HOURS),
        }
    }

    /// Check whether the story has expired
    #[inline]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// Check whether the story carries a poll
    #[inline]
    pub fn has_poll(&self) -> bool {
        matches!(self.attachment, Some(StoryAttachment::Poll { .. }))
    }

    /// Check whether the story carries a slider
    #[inline]
    pub fn has_slider(&self) -> bool {
        matches!(self.attachment, Some(StoryAttachment::Slider { .. }))
    }
}

/// A unique view of a story by a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryView {
    pub story_id: Snowflake,
    pub viewer_id: Snowflake,
    pub viewed_at: DateTime<Utc>,
}

impl StoryView {
    /// Record a view now
    pub fn new(story_id: Snowflake, viewer_id: Snowflake) -> Self {
        Self {
            story_id,
            viewer_id,
            viewed_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story_with(attachment: Option<StoryAttachment>) -> Story {
        Story::new(
            Snowflake::new(1),
            Snowflake::new(2),
            "/media/story.jpg".to_string(),
            None,
            attachment,
        )
    }

    #[test]
    fn test_fresh_story_not_expired() {
        let story = story_with(None);
        assert!(!story.is_expired());
        assert_eq!(
            (story.expires_at - story.created_at).num_hours(),
            Story::TTL_HOURS
        );
    }

    #[test]
    fn test_poll_option_bounds() {
        let poll = StoryAttachment::Poll {
            question: "Coffee or tea?".to_string(),
            options: vec!["Coffee".to_string(), "Tea".to_string()],
        };
        assert!(poll.has_option(0));
        assert!(poll.has_option(1));
        assert!(!poll.has_option(2));
        assert!(!poll.has_option(-1));
        assert_eq!(poll.option_count(), Some(2));
    }

    #[test]
    fn test_slider_has_no_options() {
        let slider = StoryAttachment::Slider {
            emoji: "🔥".to_string(),
            prompt: "How hot?".to_string(),
        };
        assert!(!slider.has_option(0));
        assert_eq!(slider.option_count(), None);
    }

    #[test]
    fn test_attachment_predicates() {
        assert!(story_with(Some(StoryAttachment::Slider {
            emoji: "🔥".to_string(),
            prompt: String::new(),
        }))
        .has_slider());
        assert!(!story_with(None).has_poll());
    }
}
