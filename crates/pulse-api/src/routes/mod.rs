//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    ai, auth, better_me, comments, follows, health, messages, notifications, posts, reels,
    stories, users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        // API v1 endpoints
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(reel_routes())
        .merge(story_routes())
        .merge(message_routes())
        .merge(notification_routes())
        .merge(ai_routes())
        .merge(better_me_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
}

/// User, profile, and follow-graph routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", patch(users::update_current_user))
        .route("/users/search", get(users::search))
        .route("/users/by-handle/:handle", get(users::get_by_handle))
        .route("/users/:user_id", get(users::get_profile))
        // Follow graph
        .route("/users/:user_id/follow", post(follows::follow))
        .route("/users/:user_id/follow", delete(follows::unfollow))
        .route("/users/:user_id/block", post(follows::block))
        .route("/users/:user_id/block", delete(follows::unblock))
        .route("/users/:user_id/followers", get(follows::followers))
        .route("/users/@me/followers/:user_id", delete(follows::remove_follower))
        .route("/users/:user_id/following", get(follows::following))
        .route("/follows/requests", get(follows::pending_requests))
        .route("/follows/requests/:user_id/accept", post(follows::accept_request))
        .route("/follows/requests/:user_id/decline", post(follows::decline_request))
        // Author content
        .route("/users/:user_id/posts", get(posts::posts_by_author))
        .route("/users/:user_id/reels", get(reels::reels_by_author))
}

/// Post and comment routes
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post))
        .route("/posts/:post_id", patch(posts::update_post))
        .route("/posts/:post_id", delete(posts::delete_post))
        .route("/posts/:post_id/likes", post(posts::toggle_post_like))
        .route("/feed", get(posts::feed))
        // Comments
        .route("/posts/:post_id/comments", get(comments::list_comments))
        .route("/posts/:post_id/comments", post(comments::create_comment))
        .route("/comments/:comment_id", patch(comments::update_comment))
        .route("/comments/:comment_id", delete(comments::delete_comment))
        .route("/comments/:comment_id/replies", get(comments::list_replies))
        .route("/comments/:comment_id/likes", post(comments::toggle_comment_like))
}

/// Reel routes
fn reel_routes() -> Router<AppState> {
    Router::new()
        .route("/reels", post(reels::create_reel))
        .route("/reels", get(reels::explore))
        .route("/reels/:reel_id", get(reels::get_reel))
        .route("/reels/:reel_id", delete(reels::delete_reel))
        .route("/reels/:reel_id/likes", post(reels::toggle_reel_like))
}

/// Story routes
fn story_routes() -> Router<AppState> {
    Router::new()
        .route("/stories", post(stories::create_story))
        .route("/stories/tray", get(stories::tray))
        .route("/stories/:story_id", get(stories::get_story))
        .route("/stories/:story_id", delete(stories::delete_story))
        .route("/stories/:story_id/view", post(stories::view_story))
        .route("/stories/:story_id/viewers", get(stories::story_viewers))
        .route("/stories/:story_id/poll", post(stories::vote_poll))
        .route("/stories/:story_id/poll", get(stories::poll_results))
        .route("/stories/:story_id/slider", post(stories::submit_slider))
        .route("/stories/:story_id/slider", get(stories::slider_results))
}

/// Messaging routes
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/conversations", post(messages::open_conversation))
        .route("/conversations", get(messages::list_conversations))
        .route("/conversations/:conversation_id/messages", get(messages::list_messages))
        .route("/conversations/:conversation_id/messages", post(messages::send_message))
        .route("/conversations/:conversation_id/audio", post(messages::send_audio))
        .route("/conversations/:conversation_id/read", post(messages::mark_read))
        .route("/audio/:audio_id", get(messages::get_audio))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/unread-count", get(notifications::unread_count))
        .route("/notifications/:notification_id/read", post(notifications::mark_read))
        .route("/notifications/read-all", post(notifications::mark_all_read))
}

/// AI token accounting routes
fn ai_routes() -> Router<AppState> {
    Router::new()
        .route("/ai/tokens", get(ai::get_budget))
        .route("/ai/tokens/ledger", get(ai::get_ledger))
}

/// Better Me wellness routes
fn better_me_routes() -> Router<AppState> {
    Router::new()
        .route("/better-me/profile", get(better_me::get_profile))
        .route("/better-me/profile", put(better_me::upsert_profile))
        .route("/better-me/plans", post(better_me::generate_plan))
        .route("/better-me/plans", get(better_me::list_plans))
        .route("/better-me/plans/:plan_id", get(better_me::get_plan))
        .route("/better-me/plans/:plan_id", delete(better_me::delete_plan))
}
