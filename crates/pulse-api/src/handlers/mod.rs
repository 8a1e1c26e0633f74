//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod ai;
pub mod auth;
pub mod better_me;
pub mod comments;
pub mod follows;
pub mod health;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod reels;
pub mod stories;
pub mod users;
