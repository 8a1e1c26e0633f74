//! Comment entity <-> model mapper

use pulse_core::entities::Comment;
use pulse_core::value_objects::Snowflake;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            author_id: Snowflake::new(model.author_id),
            parent_id: model.parent_id.map(Snowflake::new),
            content: model.content,
            created_at: model.created_at,
            edited_at: model.edited_at,
        }
    }
}
