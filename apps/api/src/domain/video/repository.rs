use super::entity::{NewVideo, Video, VideoQuery, VideoUpdate, VideoView};
use crate::domain::shared::{errors::DomainError, pagination::Page, reaction::ReactionSets};
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Inserts the video and appends it to the owner's video list in one transaction.
    async fn create(&self, video: &NewVideo) -> Result<Video, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>, DomainError>;
    /// Increment the view counter and return the video with its owner.
    async fn record_view(&self, id: Uuid) -> Result<Option<VideoView>, DomainError>;
    async fn list(&self, query: &VideoQuery) -> Result<Page<VideoView>, DomainError>;
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<VideoView>, DomainError>;
    async fn update(&self, id: Uuid, update: &VideoUpdate) -> Result<Option<Video>, DomainError>;
    /// Deletes the video and its comments and removes every back-reference to it.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), DomainError>;
    /// Targeted write of both reaction sets and both counters.
    async fn save_reactions(
        &self,
        id: Uuid,
        sets: &ReactionSets,
    ) -> Result<Option<Video>, DomainError>;
}
