//! Comment service
//!
//! Comments on posts with one level of replies.

use pulse_core::entities::Comment;
use pulse_core::{DomainError, DomainEvent, FeedQuery, LikeTarget, NotificationKind, Snowflake};
use tracing::{info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;
use super::post::ensure_post_visible;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comment on a post, or reply to a top-level comment on it
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::PostNotFound(post_id)))?;
        ensure_post_visible(self.ctx, author_id, &post).await?;

        let comment = match request.parent_id {
            Some(parent_id) => {
                let parent = self
                    .ctx
                    .comment_repo()
                    .find_by_id(parent_id)
                    .await?
                    .ok_or(ServiceError::Domain(DomainError::CommentNotFound(parent_id)))?;

                if parent.post_id != post_id {
                    return Err(ServiceError::validation(
                        "Parent comment belongs to a different post",
                    ));
                }
                if parent.is_reply() {
                    return Err(ServiceError::validation("Replies are one level deep"));
                }

                let comment = Comment::new_reply(
                    self.ctx.generate_id(),
                    post_id,
                    author_id,
                    parent_id,
                    request.content,
                );
                self.ctx.comment_repo().create(&comment).await?;

                NotificationService::new(self.ctx)
                    .deliver(
                        parent.author_id,
                        author_id,
                        NotificationKind::Reply,
                        Some(comment.id),
                    )
                    .await?;

                comment
            }
            None => {
                let comment = Comment::new(
                    self.ctx.generate_id(),
                    post_id,
                    author_id,
                    request.content,
                );
                self.ctx.comment_repo().create(&comment).await?;

                NotificationService::new(self.ctx)
                    .deliver(
                        post.author_id,
                        author_id,
                        NotificationKind::Comment,
                        Some(comment.id),
                    )
                    .await?;

                comment
            }
        };

        super::emit(&DomainEvent::CommentCreated {
            comment_id: comment.id,
            post_id,
            author_id,
        });

        self.to_response(&comment).await
    }

    /// Edit one of the caller's comments
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        author_id: Snowflake,
        comment_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let mut comment = self.find_comment(comment_id).await?;

        if comment.author_id != author_id {
            return Err(ServiceError::Domain(DomainError::NotAuthor));
        }

        comment.edit(request.content);
        self.ctx.comment_repo().update(&comment).await?;

        self.to_response(&comment).await
    }

    /// Delete a comment. Allowed for its author and for the post author.
    #[instrument(skip(self))]
    pub async fn delete(&self, caller_id: Snowflake, comment_id: Snowflake) -> ServiceResult<()> {
        let comment = self.find_comment(comment_id).await?;

        if comment.author_id != caller_id {
            let post = self
                .ctx
                .post_repo()
                .find_by_id(comment.post_id)
                .await?
                .ok_or(ServiceError::Domain(DomainError::PostNotFound(
                    comment.post_id,
                )))?;
            if post.author_id != caller_id {
                return Err(ServiceError::Domain(DomainError::NotAuthor));
            }
        }

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, "Comment deleted");

        Ok(())
    }

    /// Top-level comments on a post, newest first
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        viewer_id: Snowflake,
        post_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<CommentResponse>> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::PostNotFound(post_id)))?;
        ensure_post_visible(self.ctx, viewer_id, &post).await?;

        let comments = self.ctx.comment_repo().find_top_level(post_id, query).await?;

        let mut out = Vec::with_capacity(comments.len());
        for comment in &comments {
            out.push(self.to_response(comment).await?);
        }
        Ok(out)
    }

    /// Replies to a top-level comment, oldest first
    #[instrument(skip(self))]
    pub async fn replies(
        &self,
        viewer_id: Snowflake,
        parent_id: Snowflake,
        query: FeedQuery,
    ) -> ServiceResult<Vec<CommentResponse>> {
        let parent = self.find_comment(parent_id).await?;

        let post = self
            .ctx
            .post_repo()
            .find_by_id(parent.post_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::PostNotFound(parent.post_id)))?;
        ensure_post_visible(self.ctx, viewer_id, &post).await?;

        let replies = self.ctx.comment_repo().find_replies(parent_id, query).await?;

        let mut out = Vec::with_capacity(replies.len());
        for reply in &replies {
            out.push(self.to_response(reply).await?);
        }
        Ok(out)
    }

    async fn find_comment(&self, comment_id: Snowflake) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::CommentNotFound(comment_id)))
    }

    async fn to_response(&self, comment: &Comment) -> ServiceResult<CommentResponse> {
        let like_count = self
            .ctx
            .like_repo()
            .count(LikeTarget::Comment, comment.id)
            .await?;
        let reply_count = if comment.is_reply() {
            0
        } else {
            self.ctx.comment_repo().reply_count(comment.id).await?
        };

        Ok(CommentResponse::from_comment(comment, like_count, reply_count))
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here with mocked dependencies
}
