//! Post and like entity <-> model mappers

use pulse_core::entities::{Like, LikeTarget, Post};
use pulse_core::value_objects::{Snowflake, Visibility};

use crate::models::{LikeModel, PostModel};

use super::parse_or;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            content: model.content,
            media_urls: model.media_urls,
            visibility: parse_or(&model.visibility, Visibility::Private),
            created_at: model.created_at,
            edited_at: model.edited_at,
        }
    }
}

impl From<LikeModel> for Like {
    fn from(model: LikeModel) -> Self {
        Like {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            target: parse_or(&model.target_kind, LikeTarget::Post),
            target_id: Snowflake::new(model.target_id),
            created_at: model.created_at,
        }
    }
}
