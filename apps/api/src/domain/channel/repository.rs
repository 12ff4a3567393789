use super::entity::{Channel, ChannelUpdate, NewChannel};
use crate::domain::shared::{errors::DomainError, reaction::ReactionSets};
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChannelRepository: Send + Sync {
    /// Inserts the channel and links it to its owner in one transaction.
    async fn create(&self, channel: &NewChannel) -> Result<Channel, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Channel>, DomainError>;
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Option<Channel>, DomainError>;
    async fn update(
        &self,
        id: Uuid,
        update: &ChannelUpdate,
    ) -> Result<Option<Channel>, DomainError>;
    /// Targeted write of `subscribed_by` and `subscribers` only.
    async fn save_subscribers(
        &self,
        id: Uuid,
        sets: &ReactionSets,
    ) -> Result<Option<Channel>, DomainError>;
}
