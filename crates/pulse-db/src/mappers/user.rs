//! User entity <-> model mapper

use pulse_core::entities::User;
use pulse_core::value_objects::{Snowflake, Visibility};

use crate::models::UserModel;

use super::parse_or;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            handle: model.handle,
            display_name: model.display_name,
            email: model.email,
            bio: model.bio,
            avatar_url: model.avatar_url,
            // Unknown values degrade to Private so nothing leaks
            default_visibility: parse_or(&model.default_visibility, Visibility::Private),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
