//! Value objects - immutable domain primitives

mod snowflake;
mod visibility;

pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
pub use visibility::{FollowStatus, Visibility};
