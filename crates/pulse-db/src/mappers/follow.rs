//! Follow entity <-> model mapper

use pulse_core::entities::Follow;
use pulse_core::value_objects::{FollowStatus, Snowflake};

use crate::models::FollowModel;

use super::parse_or;

impl From<FollowModel> for Follow {
    fn from(model: FollowModel) -> Self {
        Follow {
            follower_id: Snowflake::new(model.follower_id),
            followee_id: Snowflake::new(model.followee_id),
            // Unknown values degrade to Pending, which grants nothing
            status: parse_or(&model.status, FollowStatus::Pending),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
