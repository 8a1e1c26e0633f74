//! API integration tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, test_config, test_db_pool, TestServer,
};
use reqwest::StatusCode;

/// Register a fresh user and return its auth response
async fn register_user(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let request = RegisterRequest::unique();
    let response = server
        .post("/api/v1/auth/register", &request)
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register_user(&server).await;

    assert_eq!(auth.user.handle, request.handle);
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server
        .post("/api/v1/auth/register", &request)
        .await
        .unwrap();

    let response = server
        .post("/api/v1/auth/register", &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register_req, _) = register_user(&server).await;

    let login_req = LoginRequest::from_register(&register_req);
    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(auth.user.handle, register_req.handle);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nonexistent@example.com".to_string(),
        password: "WrongPass123".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_refresh_token_rotates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let refresh_req = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server
        .post("/api/v1/auth/refresh", &refresh_req)
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!refreshed.access_token.is_empty());

    // The old refresh token was revoked on rotation
    let response = server
        .post("/api/v1/auth/refresh", &refresh_req)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_me_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_and_update_me() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .get_auth("/api/v1/users/@me", &auth.access_token)
        .await
        .unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, auth.user.id);

    let body = serde_json::json!({ "bio": "hello there" });
    let response = server
        .patch_auth("/api/v1/users/@me", &auth.access_token, &body)
        .await
        .unwrap();
    let me: CurrentUserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.bio.as_deref(), Some("hello there"));
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let request = CreatePostRequest::public("First post!");
    let response = server
        .post_auth("/api/v1/posts", &auth.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(post.content, "First post!");
    assert_eq!(post.visibility, "public");

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &auth.access_token)
        .await
        .unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.id, post.id);
}

#[tokio::test]
async fn test_followers_only_post_hidden_from_stranger() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;
    let (_, stranger) = register_user(&server).await;

    let request = CreatePostRequest::followers_only("for followers only");
    let response = server
        .post_auth("/api/v1/posts", &author.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &stranger.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_edit_post_sets_edited_at() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let request = CreatePostRequest::public("typo here");
    let response = server
        .post_auth("/api/v1/posts", &auth.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(post.edited_at.is_none());

    let body = serde_json::json!({ "content": "typo fixed" });
    let response = server
        .patch_auth(
            &format!("/api/v1/posts/{}", post.id),
            &auth.access_token,
            &body,
        )
        .await
        .unwrap();
    let edited: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.content, "typo fixed");
    assert!(edited.edited_at.is_some());
}

#[tokio::test]
async fn test_only_author_can_delete_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;
    let (_, other) = register_user(&server).await;

    let request = CreatePostRequest::public("mine");
    let response = server
        .post_auth("/api/v1/posts", &author.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &other.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), &author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_like_toggle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let request = CreatePostRequest::public("like me");
    let response = server
        .post_auth("/api/v1/posts", &auth.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/posts/{}/likes", post.id);
    let response = server
        .post_auth_empty(&path, &auth.access_token)
        .await
        .unwrap();
    let toggled: LikeToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(toggled.liked);
    assert_eq!(toggled.like_count, 1);

    let response = server
        .post_auth_empty(&path, &auth.access_token)
        .await
        .unwrap();
    let toggled: LikeToggleResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!toggled.liked);
    assert_eq!(toggled.like_count, 0);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_and_reply() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let request = CreatePostRequest::public("discuss");
    let response = server
        .post_auth("/api/v1/posts", &auth.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let comments_path = format!("/api/v1/posts/{}/comments", post.id);
    let response = server
        .post_auth(
            &comments_path,
            &auth.access_token,
            &CreateCommentRequest::top_level("nice one"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert!(comment.parent_id.is_none());

    let response = server
        .post_auth(
            &comments_path,
            &auth.access_token,
            &CreateCommentRequest::reply("agreed", &comment.id),
        )
        .await
        .unwrap();
    let reply: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply.parent_id.as_deref(), Some(comment.id.as_str()));

    // Replies are one level deep
    let response = server
        .post_auth(
            &comments_path,
            &auth.access_token,
            &CreateCommentRequest::reply("too deep", &reply.id),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

// ============================================================================
// Follow Tests
// ============================================================================

#[tokio::test]
async fn test_follow_public_account_accepts_immediately() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, follower) = register_user(&server).await;
    let (_, followee) = register_user(&server).await;

    let response = server
        .post_auth_empty(
            &format!("/api/v1/users/{}/follow", followee.user.id),
            &follower.access_token,
        )
        .await
        .unwrap();
    let follow: FollowResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(follow.status, "accepted");

    let response = server
        .get_auth(
            &format!("/api/v1/users/{}", followee.user.id),
            &follower.access_token,
        )
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.follower_count, 1);
    assert_eq!(profile.follow_status.as_deref(), Some("accepted"));
}

#[tokio::test]
async fn test_remove_follower() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, follower) = register_user(&server).await;
    let (_, followee) = register_user(&server).await;

    server
        .post_auth_empty(
            &format!("/api/v1/users/{}/follow", followee.user.id),
            &follower.access_token,
        )
        .await
        .unwrap();

    let response = server
        .delete_auth(
            &format!("/api/v1/users/@me/followers/{}", follower.user.id),
            &followee.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/users/{}", followee.user.id),
            &follower.access_token,
        )
        .await
        .unwrap();
    let profile: ProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.follower_count, 0);
    assert!(profile.follow_status.is_none());
}

#[tokio::test]
async fn test_self_follow_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .post_auth_empty(
            &format!("/api/v1/users/{}/follow", auth.user.id),
            &auth.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_block_hides_content() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, blocker) = register_user(&server).await;
    let (_, blocked) = register_user(&server).await;

    let request = CreatePostRequest::public("visible until block");
    let response = server
        .post_auth("/api/v1/posts", &blocker.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth_empty(
            &format!("/api/v1/users/{}/block", blocked.user.id),
            &blocker.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), &blocked.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Story Tests
// ============================================================================

#[tokio::test]
async fn test_story_poll_voting() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;
    let (_, viewer) = register_user(&server).await;

    // Viewer follows the author so the story is visible
    server
        .post_auth_empty(
            &format!("/api/v1/users/{}/follow", author.user.id),
            &viewer.access_token,
        )
        .await
        .unwrap();

    let request = CreateStoryRequest::with_poll("Tea or coffee?", &["Tea", "Coffee"]);
    let response = server
        .post_auth("/api/v1/stories", &author.access_token, &request)
        .await
        .unwrap();
    let story: StoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let vote_path = format!("/api/v1/stories/{}/poll", story.id);
    let response = server
        .post_auth(&vote_path, &viewer.access_token, &PollVoteRequest { option_index: 1 })
        .await
        .unwrap();
    let results: PollResultsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(results.counts, vec![0, 1]);
    assert_eq!(results.own_vote, Some(1));

    // Re-voting moves the vote rather than adding one
    let response = server
        .post_auth(&vote_path, &viewer.access_token, &PollVoteRequest { option_index: 0 })
        .await
        .unwrap();
    let results: PollResultsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(results.counts, vec![1, 0]);
    assert_eq!(results.total_votes, 1);

    // Out-of-range option is rejected
    let response = server
        .post_auth(&vote_path, &viewer.access_token, &PollVoteRequest { option_index: 3 })
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_story_slider() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;
    let (_, viewer) = register_user(&server).await;

    server
        .post_auth_empty(
            &format!("/api/v1/users/{}/follow", author.user.id),
            &viewer.access_token,
        )
        .await
        .unwrap();

    let request = CreateStoryRequest::with_slider("🔥", "How excited are you?");
    let response = server
        .post_auth("/api/v1/stories", &author.access_token, &request)
        .await
        .unwrap();
    let story: StoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let slider_path = format!("/api/v1/stories/{}/slider", story.id);
    let response = server
        .post_auth(&slider_path, &viewer.access_token, &SliderVoteRequest { value: 80 })
        .await
        .unwrap();
    let results: SliderResultsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(results.count, 1);
    assert_eq!(results.own_value, Some(80));
}

#[tokio::test]
async fn test_story_view_recorded_once() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;
    let (_, viewer) = register_user(&server).await;

    server
        .post_auth_empty(
            &format!("/api/v1/users/{}/follow", author.user.id),
            &viewer.access_token,
        )
        .await
        .unwrap();

    let response = server
        .post_auth(
            "/api/v1/stories",
            &author.access_token,
            &CreateStoryRequest::plain(),
        )
        .await
        .unwrap();
    let story: StoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let view_path = format!("/api/v1/stories/{}/view", story.id);
    server
        .post_auth_empty(&view_path, &viewer.access_token)
        .await
        .unwrap();
    server
        .post_auth_empty(&view_path, &viewer.access_token)
        .await
        .unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/stories/{}/viewers", story.id),
            &author.access_token,
        )
        .await
        .unwrap();
    let viewers: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(viewers.len(), 1);

    // The author sees the unique viewer count on the story itself
    let response = server
        .get_auth(
            &format!("/api/v1/stories/{}", story.id),
            &author.access_token,
        )
        .await
        .unwrap();
    let story_for_author: StoryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(story_for_author.view_count, Some(1));

    // Non-authors never see the count
    let response = server
        .get_auth(
            &format!("/api/v1/stories/{}", story.id),
            &viewer.access_token,
        )
        .await
        .unwrap();
    let story_for_viewer: StoryResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(story_for_viewer.view_count, None);
}

#[tokio::test]
async fn test_expired_story_hidden_and_voting_closed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;
    let (_, viewer) = register_user(&server).await;

    server
        .post_auth_empty(
            &format!("/api/v1/users/{}/follow", author.user.id),
            &viewer.access_token,
        )
        .await
        .unwrap();

    let request = CreateStoryRequest::with_poll("Morning or night?", &["Morning", "Night"]);
    let response = server
        .post_auth("/api/v1/stories", &author.access_token, &request)
        .await
        .unwrap();
    let story: StoryResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Voting works while the story is live
    let vote_path = format!("/api/v1/stories/{}/poll", story.id);
    let response = server
        .post_auth(&vote_path, &viewer.access_token, &PollVoteRequest { option_index: 0 })
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Push the story past its 24h window
    let pool = test_db_pool().await.unwrap();
    let story_id: i64 = story.id.parse().unwrap();
    sqlx::query("UPDATE stories SET expires_at = NOW() - INTERVAL '1 minute' WHERE id = $1")
        .bind(story_id)
        .execute(&pool)
        .await
        .unwrap();

    // Followers can no longer read it
    let story_path = format!("/api/v1/stories/{}", story.id);
    let response = server
        .get_auth(&story_path, &viewer.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::GONE).await.unwrap();

    // Voting is closed for everyone, the author included
    let response = server
        .post_auth(&vote_path, &viewer.access_token, &PollVoteRequest { option_index: 1 })
        .await
        .unwrap();
    assert_status(response, StatusCode::GONE).await.unwrap();

    let response = server
        .post_auth(&vote_path, &author.access_token, &PollVoteRequest { option_index: 1 })
        .await
        .unwrap();
    assert_status(response, StatusCode::GONE).await.unwrap();

    // The author can still read their own expired story
    let response = server
        .get_auth(&story_path, &author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // And it drops out of the follower's tray
    let response = server
        .get_auth("/api/v1/stories/tray", &viewer.access_token)
        .await
        .unwrap();
    let tray: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    let tray_has_story = tray.iter().any(|entry| {
        entry["stories"]
            .as_array()
            .is_some_and(|stories| stories.iter().any(|s| s["id"] == story.id.as_str()))
    });
    assert!(!tray_has_story);
}

// ============================================================================
// Messaging Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_list_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = register_user(&server).await;
    let (_, bob) = register_user(&server).await;

    let response = server
        .post_auth(
            "/api/v1/conversations",
            &alice.access_token,
            &OpenConversationRequest {
                user_id: bob.user.id.clone(),
            },
        )
        .await
        .unwrap();
    let conversation: ConversationResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(conversation.other_user.id, bob.user.id);

    let messages_path = format!("/api/v1/conversations/{}/messages", conversation.id);
    let response = server
        .post_auth(
            &messages_path,
            &alice.access_token,
            &SendMessageRequest {
                content: "hi bob".to_string(),
            },
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(message.content.as_deref(), Some("hi bob"));

    let response = server
        .get_auth(&messages_path, &bob.access_token)
        .await
        .unwrap();
    let messages: Vec<MessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);

    // A third party cannot read the conversation
    let (_, eve) = register_user(&server).await;
    let response = server
        .get_auth(&messages_path, &eve.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_audio_message_transcription() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = register_user(&server).await;
    let (_, bob) = register_user(&server).await;

    let response = server
        .post_auth(
            "/api/v1/conversations",
            &alice.access_token,
            &OpenConversationRequest {
                user_id: bob.user.id.clone(),
            },
        )
        .await
        .unwrap();
    let conversation: ConversationResponse =
        assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/conversations/{}/audio", conversation.id),
            &alice.access_token,
            &SendAudioRequest {
                url: "https://cdn.example.com/audio/clip.ogg".to_string(),
                duration_secs: 12,
            },
        )
        .await
        .unwrap();
    let message: MessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let audio = message.audio.expect("audio message has audio payload");
    assert_eq!(audio.status, "pending");
    assert!(audio.transcript.is_none());

    // Transcription completes after the configured mock delay
    tokio::time::sleep(std::time::Duration::from_millis(2_500)).await;

    let response = server
        .get_auth(&format!("/api/v1/audio/{}", audio.id), &bob.access_token)
        .await
        .unwrap();
    let transcribed: AudioResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(transcribed.status, "completed");
    assert!(transcribed.transcript.is_some());
}

#[tokio::test]
async fn test_blocked_user_cannot_message() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, alice) = register_user(&server).await;
    let (_, bob) = register_user(&server).await;

    server
        .post_auth_empty(
            &format!("/api/v1/users/{}/block", bob.user.id),
            &alice.access_token,
        )
        .await
        .unwrap();

    let response = server
        .post_auth(
            "/api/v1/conversations",
            &bob.access_token,
            &OpenConversationRequest {
                user_id: alice.user.id.clone(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_like_produces_notification() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = register_user(&server).await;
    let (_, fan) = register_user(&server).await;

    let request = CreatePostRequest::public("notify me");
    let response = server
        .post_auth("/api/v1/posts", &author.access_token, &request)
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    server
        .post_auth_empty(
            &format!("/api/v1/posts/{}/likes", post.id),
            &fan.access_token,
        )
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/notifications/unread-count", &author.access_token)
        .await
        .unwrap();
    let unread: UnreadCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread, 1);

    let response = server
        .get_auth("/api/v1/notifications", &author.access_token)
        .await
        .unwrap();
    let notifications: Vec<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, "like");
    assert_eq!(notifications[0].actor_id, fan.user.id);

    // Mark all read
    server
        .post_auth_empty("/api/v1/notifications/read-all", &author.access_token)
        .await
        .unwrap();
    let response = server
        .get_auth("/api/v1/notifications/unread-count", &author.access_token)
        .await
        .unwrap();
    let unread: UnreadCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread, 0);
}

// ============================================================================
// AI Token and Better Me Tests
// ============================================================================

#[tokio::test]
async fn test_token_budget_opens_on_first_touch() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .get_auth("/api/v1/ai/tokens", &auth.access_token)
        .await
        .unwrap();
    let budget: TokenBudgetResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(budget.granted > 0);
    assert_eq!(budget.used, 0);
    assert_eq!(budget.remaining, budget.granted);
}

#[tokio::test]
async fn test_plan_requires_health_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .post_auth(
            "/api/v1/better-me/plans",
            &auth.access_token,
            &GeneratePlanRequest {
                kind: "meal".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_generate_plan_debits_budget() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let response = server
        .put_auth(
            "/api/v1/better-me/profile",
            &auth.access_token,
            &UpsertHealthProfileRequest::typical(),
        )
        .await
        .unwrap();
    let profile: HealthProfileResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(profile.bmi > 0.0);

    let response = server
        .post_auth(
            "/api/v1/better-me/plans",
            &auth.access_token,
            &GeneratePlanRequest {
                kind: "workout".to_string(),
            },
        )
        .await
        .unwrap();
    let plan: PlanResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(plan.kind, "workout");
    assert!(plan.tokens_spent > 0);

    let response = server
        .get_auth("/api/v1/ai/tokens", &auth.access_token)
        .await
        .unwrap();
    let budget: TokenBudgetResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(budget.used, plan.tokens_spent);
    assert_eq!(budget.remaining, budget.granted - plan.tokens_spent);

    // Plan generation delivers a notification to the requester
    let response = server
        .get_auth("/api/v1/notifications", &auth.access_token)
        .await
        .unwrap();
    let notifications: Vec<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(notifications.iter().any(|n| n.kind == "plan_ready"));
}

#[tokio::test]
async fn test_plan_rejected_when_budget_exhausted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    server
        .put_auth(
            "/api/v1/better-me/profile",
            &auth.access_token,
            &UpsertHealthProfileRequest::typical(),
        )
        .await
        .unwrap();

    // Materialize the budget row, then spend the whole grant
    let response = server
        .get_auth("/api/v1/ai/tokens", &auth.access_token)
        .await
        .unwrap();
    let budget: TokenBudgetResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(budget.granted > 0);

    let pool = test_db_pool().await.unwrap();
    let user_id: i64 = auth.user.id.parse().unwrap();
    sqlx::query("UPDATE token_budgets SET used = granted WHERE user_id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = server
        .post_auth(
            "/api/v1/better-me/plans",
            &auth.access_token,
            &GeneratePlanRequest {
                kind: "meal".to_string(),
            },
        )
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::PAYMENT_REQUIRED)
        .await
        .unwrap();
    assert_eq!(error.error.code, "TOKEN_BUDGET_EXHAUSTED");

    // The failed attempt must not have touched the ledger
    let response = server
        .get_auth("/api/v1/ai/tokens", &auth.access_token)
        .await
        .unwrap();
    let budget: TokenBudgetResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(budget.remaining, 0);
}

#[tokio::test]
async fn test_plan_calls_rate_limited_per_minute() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    server
        .put_auth(
            "/api/v1/better-me/profile",
            &auth.access_token,
            &UpsertHealthProfileRequest::typical(),
        )
        .await
        .unwrap();

    // The window is wall-clock aligned, so issue enough calls that at
    // least one window must receive more than the per-minute cap.
    let cap = test_config().unwrap().ai.calls_per_minute;
    let mut limited = false;
    for _ in 0..(2 * cap + 2) {
        let response = server
            .post_auth(
                "/api/v1/better-me/plans",
                &auth.access_token,
                &GeneratePlanRequest {
                    kind: "workout".to_string(),
                },
            )
            .await
            .unwrap();
        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => {
                limited = true;
                break;
            }
            StatusCode::CREATED => {}
            other => panic!("Unexpected status during limiter loop: {other}"),
        }
    }
    assert!(limited, "limiter never engaged");

    // The refused call leaves the budget alone; only created plans debit
    let response = server
        .get_auth("/api/v1/ai/tokens", &auth.access_token)
        .await
        .unwrap();
    let budget: TokenBudgetResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(budget.remaining > 0);
}

#[tokio::test]
async fn test_invalid_birth_date_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, auth) = register_user(&server).await;

    let mut request = UpsertHealthProfileRequest::typical();
    request.birth_date = "2999-01-01".to_string();

    let response = server
        .put_auth("/api/v1/better-me/profile", &auth.access_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
}
