//! Model -> entity mappers
//!
//! Conversions from database rows to domain entities. Enum columns are
//! stored as text; an unrecognized value falls back to the most
//! restrictive variant rather than failing the whole row.

mod audio;
mod comment;
mod conversation;
mod follow;
mod notification;
mod post;
mod reel;
mod story;
mod token;
mod user;
mod wellness;

use std::str::FromStr;

/// Parse a stored enum value, falling back to a default
pub(crate) fn parse_or<T: FromStr>(s: &str, default: T) -> T {
    s.parse().unwrap_or(default)
}
