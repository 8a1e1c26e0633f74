//! Story service
//!
//! Ephemeral stories: tray assembly, unique views, and poll/slider voting.

use pulse_core::entities::{Story, StoryAttachment, StoryView};
use pulse_core::{DomainError, DomainEvent, FeedQuery, Snowflake};
use tracing::{info, instrument};

use crate::dto::{
    CreateStoryRequest, PollResultsResponse, SliderResultsResponse, StoryResponse, StoryTrayEntry,
    StoryViewerResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Poll option limits
const MIN_POLL_OPTIONS: usize = 2;
const MAX_POLL_OPTIONS: usize = 4;
const MAX_POLL_TEXT_LEN: usize = 100;

/// Story service
pub struct StoryService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StoryService<'a> {
    /// Create a new StoryService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Publish a story
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        author_id: Snowflake,
        request: CreateStoryRequest,
    ) -> ServiceResult<StoryResponse> {
        if let Some(attachment) = &request.attachment {
            validate_attachment(attachment)?;
        }

        let story = Story::new(
            self.ctx.generate_id(),
            author_id,
            request.media_url,
            request.caption,
            request.attachment,
        );
        self.ctx.story_repo().create(&story).await?;

        super::emit(&DomainEvent::StoryPosted {
            story_id: story.id,
            author_id,
        });

        Ok(StoryResponse::from_story(&story, false))
    }

    /// Get a single story, visibility- and expiry-checked
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        viewer_id: Snowflake,
        story_id: Snowflake,
    ) -> ServiceResult<StoryResponse> {
        let story = self.find_visible(viewer_id, story_id).await?;
        let viewed = self.ctx.story_repo().has_viewed(story_id, viewer_id).await?;

        let response = StoryResponse::from_story(&story, viewed);
        if story.author_id == viewer_id {
            let view_count = self.ctx.story_repo().view_count(story_id).await?;
            return Ok(response.with_view_count(view_count));
        }
        Ok(response)
    }

    /// Delete one of the caller's stories
    #[instrument(skip(self))]
    pub async fn delete(&self, author_id: Snowflake, story_id: Snowflake) -> ServiceResult<()> {
        let story = self.find_story(story_id).await?;

        if story.author_id != author_id {
            return Err(ServiceError::Domain(DomainError::NotAuthor));
        }

        self.ctx.story_repo().delete(story_id).await?;

        info!(story_id = %story_id, "Story deleted");

        Ok(())
    }

    /// The caller's story tray: own active stories plus those of accepted
    /// followees, grouped per author
    #[instrument(skip(self))]
    pub async fn tray(&self, viewer_id: Snowflake) -> ServiceResult<Vec<StoryTrayEntry>> {
        let followees = self
            .ctx
            .follow_repo()
            .following(viewer_id, FeedQuery::new(None, 100))
            .await?;

        let mut author_ids: Vec<Snowflake> = Vec::with_capacity(followees.len() + 1);
        author_ids.push(viewer_id);
        author_ids.extend(followees.iter().map(|u| u.id));

        let stories = self.ctx.story_repo().active_by_authors(&author_ids).await?;

        // Stories come back grouped by author; fold them into tray entries
        let mut entries: Vec<StoryTrayEntry> = Vec::new();
        for story in &stories {
            let viewed = self
                .ctx
                .story_repo()
                .has_viewed(story.id, viewer_id)
                .await?;
            let mut response = StoryResponse::from_story(story, viewed);
            if story.author_id == viewer_id {
                let view_count = self.ctx.story_repo().view_count(story.id).await?;
                response = response.with_view_count(view_count);
            }

            match entries
                .iter_mut()
                .find(|e| e.author.id == story.author_id.to_string())
            {
                Some(entry) => entry.stories.push(response),
                None => {
                    let author = if story.author_id == viewer_id {
                        self.ctx.user_repo().find_by_id(viewer_id).await?
                    } else {
                        followees.iter().find(|u| u.id == story.author_id).cloned()
                    };
                    if let Some(author) = author {
                        entries.push(StoryTrayEntry {
                            author: UserResponse::from(&author),
                            stories: vec![response],
                        });
                    }
                }
            }
        }

        // Caller's own stories first
        entries.sort_by_key(|e| e.author.id != viewer_id.to_string());

        Ok(entries)
    }

    /// Record a unique view. Authors viewing their own story are not counted.
    #[instrument(skip(self))]
    pub async fn view(&self, viewer_id: Snowflake, story_id: Snowflake) -> ServiceResult<()> {
        let story = self.find_visible(viewer_id, story_id).await?;

        if story.author_id == viewer_id {
            return Ok(());
        }

        let view = StoryView::new(story_id, viewer_id);
        self.ctx.story_repo().record_view(&view).await?;

        Ok(())
    }

    /// Who viewed a story; author-only
    #[instrument(skip(self))]
    pub async fn viewers(
        &self,
        author_id: Snowflake,
        story_id: Snowflake,
    ) -> ServiceResult<Vec<StoryViewerResponse>> {
        let story = self.find_story(story_id).await?;

        if story.author_id != author_id {
            return Err(ServiceError::Domain(DomainError::NotAuthor));
        }

        let views = self.ctx.story_repo().list_viewers(story_id).await?;

        let mut out = Vec::with_capacity(views.len());
        for view in views {
            if let Some(user) = self.ctx.user_repo().find_by_id(view.viewer_id).await? {
                out.push(StoryViewerResponse {
                    viewer: UserResponse::from(&user),
                    viewed_at: view.viewed_at,
                });
            }
        }

        Ok(out)
    }

    /// Vote on a story poll; re-voting moves the vote
    #[instrument(skip(self))]
    pub async fn vote_poll(
        &self,
        viewer_id: Snowflake,
        story_id: Snowflake,
        option_index: i16,
    ) -> ServiceResult<PollResultsResponse> {
        let story = self.find_visible(viewer_id, story_id).await?;

        // Voting closes at expiry for everyone, the author included
        if story.is_expired() {
            return Err(ServiceError::Domain(DomainError::StoryExpired));
        }

        let attachment = story
            .attachment
            .as_ref()
            .filter(|a| matches!(a, StoryAttachment::Poll { .. }))
            .ok_or_else(|| ServiceError::validation("Story has no poll"))?;

        if !attachment.has_option(option_index) {
            return Err(ServiceError::Domain(DomainError::InvalidPollOption));
        }

        self.ctx
            .story_repo()
            .upsert_poll_vote(story_id, viewer_id, option_index)
            .await?;

        self.poll_results(viewer_id, story_id).await
    }

    /// Aggregate poll results, zero-filled per option
    #[instrument(skip(self))]
    pub async fn poll_results(
        &self,
        viewer_id: Snowflake,
        story_id: Snowflake,
    ) -> ServiceResult<PollResultsResponse> {
        let story = self.find_visible(viewer_id, story_id).await?;

        let option_count = story
            .attachment
            .as_ref()
            .and_then(StoryAttachment::option_count)
            .ok_or_else(|| ServiceError::validation("Story has no poll"))?;

        let raw = self.ctx.story_repo().poll_counts(story_id).await?;
        let mut counts = vec![0i64; option_count];
        for (index, count) in raw {
            if let Some(slot) = counts.get_mut(index as usize) {
                *slot = count;
            }
        }
        let total_votes = counts.iter().sum();

        let own_vote = self
            .ctx
            .story_repo()
            .find_poll_vote(story_id, viewer_id)
            .await?;

        Ok(PollResultsResponse {
            story_id: story_id.to_string(),
            counts,
            total_votes,
            own_vote,
        })
    }

    /// Submit a slider value; resubmission overwrites
    #[instrument(skip(self))]
    pub async fn submit_slider(
        &self,
        viewer_id: Snowflake,
        story_id: Snowflake,
        value: i16,
    ) -> ServiceResult<SliderResultsResponse> {
        if !(0..=100).contains(&value) {
            return Err(ServiceError::Domain(DomainError::SliderValueOutOfRange));
        }

        let story = self.find_visible(viewer_id, story_id).await?;

        if story.is_expired() {
            return Err(ServiceError::Domain(DomainError::StoryExpired));
        }

        if !story.has_slider() {
            return Err(ServiceError::validation("Story has no slider"));
        }

        self.ctx
            .story_repo()
            .upsert_slider_value(story_id, viewer_id, value)
            .await?;

        self.slider_results(viewer_id, story_id).await
    }

    /// Aggregate slider results
    #[instrument(skip(self))]
    pub async fn slider_results(
        &self,
        viewer_id: Snowflake,
        story_id: Snowflake,
    ) -> ServiceResult<SliderResultsResponse> {
        let story = self.find_visible(viewer_id, story_id).await?;

        if !story.has_slider() {
            return Err(ServiceError::validation("Story has no slider"));
        }

        let stats = self.ctx.story_repo().slider_stats(story_id).await?;
        let own_value = self
            .ctx
            .story_repo()
            .find_slider_value(story_id, viewer_id)
            .await?;

        Ok(SliderResultsResponse {
            story_id: story_id.to_string(),
            count: stats.count,
            average: stats.average,
            own_value,
        })
    }

    async fn find_story(&self, story_id: Snowflake) -> ServiceResult<Story> {
        self.ctx
            .story_repo()
            .find_by_id(story_id)
            .await?
            .ok_or(ServiceError::Domain(DomainError::StoryNotFound(story_id)))
    }

    /// Load a story and check the viewer may see it.
    ///
    /// Stories are visible to the author and their accepted followers.
    /// Expired stories stay accessible to the author only.
    async fn find_visible(
        &self,
        viewer_id: Snowflake,
        story_id: Snowflake,
    ) -> ServiceResult<Story> {
        let story = self.find_story(story_id).await?;

        if story.author_id == viewer_id {
            return Ok(story);
        }

        if story.is_expired() {
            return Err(ServiceError::Domain(DomainError::StoryExpired));
        }

        if self
            .ctx
            .follow_repo()
            .is_blocked_either_way(viewer_id, story.author_id)
            .await?
        {
            return Err(ServiceError::Domain(DomainError::NotVisible));
        }

        let is_follower = self
            .ctx
            .follow_repo()
            .is_accepted(viewer_id, story.author_id)
            .await?;
        if !is_follower {
            return Err(ServiceError::Domain(DomainError::NotVisible));
        }

        Ok(story)
    }
}

/// Polls carry 2-4 short options; sliders need an emoji
fn validate_attachment(attachment: &StoryAttachment) -> ServiceResult<()> {
    match attachment {
        StoryAttachment::Poll { question, options } => {
            if question.trim().is_empty() || question.len() > MAX_POLL_TEXT_LEN {
                return Err(ServiceError::validation("Poll question must be 1-100 characters"));
            }
            if !(MIN_POLL_OPTIONS..=MAX_POLL_OPTIONS).contains(&options.len()) {
                return Err(ServiceError::validation("Polls carry 2-4 options"));
            }
            if options
                .iter()
                .any(|o| o.trim().is_empty() || o.len() > MAX_POLL_TEXT_LEN)
            {
                return Err(ServiceError::validation(
                    "Poll options must be 1-100 characters",
                ));
            }
            Ok(())
        }
        StoryAttachment::Slider { emoji, prompt } => {
            if emoji.trim().is_empty() {
                return Err(ServiceError::validation("Slider needs an emoji"));
            }
            if prompt.len() > MAX_POLL_TEXT_LEN {
                return Err(ServiceError::validation("Slider prompt too long"));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_option_bounds() {
        let one_option = StoryAttachment::Poll {
            question: "Pick one".to_string(),
            options: vec!["only".to_string()],
        };
        assert!(validate_attachment(&one_option).is_err());

        let ok = StoryAttachment::Poll {
            question: "Coffee or tea?".to_string(),
            options: vec!["Coffee".to_string(), "Tea".to_string()],
        };
        assert!(validate_attachment(&ok).is_ok());

        let five = StoryAttachment::Poll {
            question: "Pick".to_string(),
            options: (0..5).map(|i| format!("opt{i}")).collect(),
        };
        assert!(validate_attachment(&five).is_err());
    }

    #[test]
    fn test_slider_needs_emoji() {
        let bad = StoryAttachment::Slider {
            emoji: " ".to_string(),
            prompt: "How much?".to_string(),
        };
        assert!(validate_attachment(&bad).is_err());

        let ok = StoryAttachment::Slider {
            emoji: "🔥".to_string(),
            prompt: "How much?".to_string(),
        };
        assert!(validate_attachment(&ok).is_ok());
    }
}
