use super::dto::{CreateCommentRequest, UpdateCommentRequest};
use crate::application::validation_error;
use crate::domain::comment::{
    entity::{Comment, CommentThread, CommentView, NewComment, build_threads},
    repository::CommentRepository,
};
use crate::domain::shared::{
    errors::DomainError,
    ownership::ensure_owner,
    reaction::{Polarity, Reactable, toggle},
};
use crate::domain::video::repository::VideoRepository;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct CommentUseCase {
    comments: Arc<dyn CommentRepository>,
    videos: Arc<dyn VideoRepository>,
}

fn not_found() -> DomainError {
    DomainError::NotFound("Comment not found".into())
}

impl CommentUseCase {
    pub fn new(comments: Arc<dyn CommentRepository>, videos: Arc<dyn VideoRepository>) -> Self {
        Self { comments, videos }
    }

    pub async fn threads_for_video(&self, video_id: Uuid) -> Result<Vec<CommentThread>, DomainError> {
        let comments = self.comments.list_for_video(video_id).await?;
        Ok(build_threads(comments))
    }

    /// Post a comment or a reply. A reply to a reply joins the thread of
    /// the top-level comment.
    pub async fn create(
        &self,
        actor: Uuid,
        request: CreateCommentRequest,
    ) -> Result<CommentView, DomainError> {
        let text = request.text.trim().to_string();
        if text.is_empty() {
            return Err(DomainError::ValidationError(
                "Please provide text and videoId".into(),
            ));
        }
        let request = CreateCommentRequest { text, ..request };
        request.validate().map_err(validation_error)?;

        if self.videos.find_by_id(request.video_id).await?.is_none() {
            return Err(DomainError::NotFound("Video not found".into()));
        }

        let parent_id = match request.parent_comment_id {
            None => None,
            Some(parent_id) => {
                let parent = self
                    .comments
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound("Parent comment not found".into()))?;
                if parent.video_id != request.video_id {
                    return Err(DomainError::ValidationError(
                        "Parent comment belongs to a different video".into(),
                    ));
                }
                Some(parent.parent_id.unwrap_or(parent.id))
            }
        };

        let comment = self
            .comments
            .create(&NewComment {
                text: request.text,
                author_id: actor,
                video_id: request.video_id,
                parent_id,
            })
            .await?;
        tracing::info!(comment_id = %comment.id, video_id = %comment.video_id, author = %actor, "comment posted");

        self.comments.find_view(comment.id).await?.ok_or_else(not_found)
    }

    pub async fn update(
        &self,
        actor: Uuid,
        id: Uuid,
        request: UpdateCommentRequest,
    ) -> Result<CommentView, DomainError> {
        let comment = self.comments.find_by_id(id).await?.ok_or_else(not_found)?;
        ensure_owner(&comment, actor, "update")?;

        let text = request.text.trim().to_string();
        if text.is_empty() {
            return Err(DomainError::ValidationError("Please provide a comment".into()));
        }
        UpdateCommentRequest { text: text.clone() }
            .validate()
            .map_err(validation_error)?;

        self.comments.update_text(id, &text).await?.ok_or_else(not_found)?;
        self.comments.find_view(id).await?.ok_or_else(not_found)
    }

    pub async fn delete(&self, actor: Uuid, id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let comment = self.comments.find_by_id(id).await?.ok_or_else(not_found)?;
        ensure_owner(&comment, actor, "delete")?;
        let removed = self.comments.delete(&comment).await?;
        tracing::info!(comment_id = %id, removed = removed.len(), "comment deleted");
        Ok(removed)
    }

    pub async fn like(&self, actor: Uuid, id: Uuid) -> Result<Comment, DomainError> {
        let mut comment = self.comments.find_by_id(id).await?.ok_or_else(not_found)?;
        let outcome = toggle(&mut comment, actor, Polarity::Positive)?;
        let saved = self
            .comments
            .save_likes(id, &comment.reactions())
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(comment_id = %id, actor = %actor, liked = outcome.active, likes = saved.likes, "comment like toggled");
        Ok(saved)
    }
}
