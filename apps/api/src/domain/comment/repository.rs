use super::entity::{Comment, CommentView, NewComment};
use crate::domain::shared::{errors::DomainError, reaction::ReactionSets};
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Inserts the comment and records it on its video (and parent, for
    /// replies) in one transaction.
    async fn create(&self, comment: &NewComment) -> Result<Comment, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DomainError>;
    async fn find_view(&self, id: Uuid) -> Result<Option<CommentView>, DomainError>;
    async fn list_for_video(&self, video_id: Uuid) -> Result<Vec<CommentView>, DomainError>;
    async fn update_text(&self, id: Uuid, text: &str) -> Result<Option<Comment>, DomainError>;
    /// Deletes the comment and its replies and pulls every deleted id from the
    /// video's and parent's lists. Returns the deleted ids.
    async fn delete(&self, comment: &Comment) -> Result<Vec<Uuid>, DomainError>;
    /// Targeted write of `liked_by` and `likes` only.
    async fn save_likes(
        &self,
        id: Uuid,
        sets: &ReactionSets,
    ) -> Result<Option<Comment>, DomainError>;
}
