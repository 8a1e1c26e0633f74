//! Post service
//!
//! Feed posts: creation, editing, visibility-checked reads, and the home
//! feed.

use pulse_core::entities::Post;
use pulse_core::{DomainError, DomainEvent, FeedQuery, LikeTarget, Snowflake, Visibility};
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Check that `viewer_id` may see `post`, returning `NotVisible` otherwise.
///
/// Blocked pairs see nothing of each other regardless of visibility.
pub(crate) async fn ensure_post_visible(
    ctx: &ServiceContext,
    viewer_id: Snowflake,
    post: &Post,
) -> ServiceResult<()> {
    let is_author = post.author_id == viewer_id;
    if is_author {
        return Ok(());
    }

    if ctx
        .follow_repo()
        .is_blocked_either_way(viewer_id, post.author_id)
        .await?
    {
        return Err(ServiceError::Domain(DomainError::NotVisible));
    }

    let is_accepted_follower = ctx
        .follow_repo()
        .is_accepted(viewer_id, post.author_id)
        .await?;

    if post.visibility.allows(is_author, is_accepted_follower) {
        Ok(())
    } else {
        Err(ServiceError::Domain(DomainError::NotVisible))
    }
}

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post. Visibility defaults to the author's profile setting.
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let visibility = match request.visibility {
            Some(v) => v
                .parse::<Visibility>()
                .map_err(|_| ServiceError::validation("Unknown visibility"))?,
            None => {
                let author = self
                    .ctx
                    .user_repo()
                    .find_by_id(author_id)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("User", author_id.to_string()))?;
                author.default_visibility
            }
        };

        let post = Post::new(
            self.ctx.generate_id(),
            author_id,
            request.content,
            request.media_urls,
            visibility,
        );

        if post.is_empty() {
            return Err(ServiceError::validation(
                "Post needs content or at least one attachment",
            ));
        }

        self.ctx.post_repo().create(&post).await?;

        super::emit(&DomainEvent::PostCreated {
            post_id: post.id,
            author_id,
        });

        self.to_response(author_id, &post).await
    }

    /// Get a single post, visibility-checked
    #[instrument(skip(self))]
    pub async fn get(&self, viewer_id: Snowflake, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let post = self.find_post(post_id).await?;
        ensure_post_visible(self.ctx, viewer_id, &post).await?;
        self.to_response(viewer_id, &post).await
    }

    /// Edit one of the caller's posts
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        author_id: Snowflake,
        post_id: Snowflake,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self.find_post(post_id).await?;

        if post.author_id != author_id {
            return Err(ServiceError::Domain(DomainError::NotAuthor));
        }

        let visibility = match request.visibility {
            Some(v) => v
                .parse::<Visibility>()
                .map_err(|_| ServiceError::validation("Unknown visibility"))?,
            None => post.visibility,
        };

        post.edit(request.content, visibility);
        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post_id, "Post edited");

        self.to_response(author_id, &post).await
    }

    /// Delete one of the caller's posts
    #[instrument(skip(self))]
    pub async fn delete(&self, author_id: Snowflake, post_id: Snowflake) -> ServiceResult<()> {
        let post = self.find_post(post_id).await?;

        if post.author_id != author_id {
            return Err(ServiceError::Domain(DomainError::NotAuthor));
        }

        self.ctx.post_repo().delete(post_id).await?;

        super::emit(&DomainEvent::PostDeleted { post_id });

        Ok(())
    }

    /// Home feed for the caller
    #[instrument(skip(self))]
    pub async fn feed(
        &self,
        viewer_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<PostResponse>> {
        let posts = self.ctx.post_repo().feed(viewer_id, query).await?;

        let mut out = Vec::with_capacity(posts.len());
        for post in &posts {
            out.push(self.to_response(viewer_id, post).await?);
        }
        Ok(out)
    }

    /// Posts by one author, filtered to what the viewer may see
    #[instrument(skip(self))]
    pub async fn by_author(
        &self,
        viewer_id: Snowflake,
        author_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<PostResponse>> {
        let is_author = viewer_id == author_id;

        if !is_author
            && self
                .ctx
                .follow_repo()
                .is_blocked_either_way(viewer_id, author_id)
                .await?
        {
            return Err(ServiceError::Domain(DomainError::NotVisible));
        }

        let viewer_can_see_followers =
            is_author || self.ctx.follow_repo().is_accepted(viewer_id, author_id).await?;

        let posts = self
            .ctx
            .post_repo()
            .find_by_author(author_id, viewer_can_see_followers, is_author, query)
            .await?;

        let mut out = Vec::with_capacity(posts.len());
        for post in &posts {
            out.push(self.to_response(viewer_id, post).await?);
        }
        Ok(out)
    }

    async fn find_post(&self, post_id: Snowflake) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::PostNotFound(post_id)))
    }

    /// Attach engagement counts and the viewer's like state
    async fn to_response(&self, viewer_id: Snowflake, post: &Post) -> ServiceResult<PostResponse> {
        let like_count = self
            .ctx
            .like_repo()
            .count(LikeTarget::Post, post.id)
            .await?;
        let comment_count = self.ctx.comment_repo().count_by_post(post.id).await?;
        let liked_by_viewer = self
            .ctx
            .like_repo()
            .find(LikeTarget::Post, post.id, viewer_id)
            .await?
            .is_some();

        Ok(PostResponse::from_post(
            post,
            like_count,
            comment_count,
            liked_by_viewer,
        ))
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here with mocked dependencies
}
