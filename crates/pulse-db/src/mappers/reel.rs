//! Reel entity <-> model mapper

use pulse_core::entities::Reel;
use pulse_core::value_objects::Snowflake;

use crate::models::ReelModel;

impl From<ReelModel> for Reel {
    fn from(model: ReelModel) -> Self {
        Reel {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            video_url: model.video_url,
            caption: model.caption,
            duration_secs: model.duration_secs,
            created_at: model.created_at,
        }
    }
}
