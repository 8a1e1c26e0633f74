//! Story entity <-> model mappers

use pulse_core::entities::{Story, StoryAttachment, StoryView};
use pulse_core::value_objects::Snowflake;

use crate::models::{StoryModel, StoryViewModel};

impl From<StoryModel> for Story {
    fn from(model: StoryModel) -> Self {
        // A malformed attachment payload degrades to a plain story
        let attachment = model
            .attachment
            .and_then(|v| serde_json::from_value::<StoryAttachment>(v).ok());

        Story {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            media_url: model.media_url,
            caption: model.caption,
            attachment,
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}

impl From<StoryViewModel> for StoryView {
    fn from(model: StoryViewModel) -> Self {
        StoryView {
            story_id: Snowflake::new(model.story_id),
            viewer_id: Snowflake::new(model.viewer_id),
            viewed_at: model.viewed_at,
        }
    }
}
