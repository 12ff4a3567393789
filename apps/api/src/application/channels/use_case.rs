use super::dto::{CreateChannelRequest, UpdateChannelRequest};
use crate::application::{non_empty, validation_error};
use crate::domain::channel::{
    entity::{Channel, ChannelUpdate, ChannelView, NewChannel},
    repository::ChannelRepository,
};
use crate::domain::shared::{
    errors::DomainError,
    ownership::ensure_owner,
    reaction::{Polarity, Reactable, toggle},
};
use crate::domain::user::repository::UserRepository;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

pub struct ChannelUseCase {
    channels: Arc<dyn ChannelRepository>,
    users: Arc<dyn UserRepository>,
}

fn not_found() -> DomainError {
    DomainError::NotFound("Channel not found".into())
}

impl ChannelUseCase {
    pub fn new(channels: Arc<dyn ChannelRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { channels, users }
    }

    async fn view(&self, channel: Channel) -> Result<ChannelView, DomainError> {
        let owner = self
            .users
            .find_by_id(channel.owner_id)
            .await?
            .map(|u| u.account());
        Ok(ChannelView { channel, owner })
    }

    pub async fn create(
        &self,
        actor: Uuid,
        request: CreateChannelRequest,
    ) -> Result<Channel, DomainError> {
        let channel_name = non_empty(request.channel_name.clone()).ok_or_else(|| {
            DomainError::ValidationError("Please provide a channel name".into())
        })?;
        request.validate().map_err(validation_error)?;

        if self.channels.find_by_owner(actor).await?.is_some() {
            return Err(DomainError::ValidationError("User already has a channel".into()));
        }

        let channel = self
            .channels
            .create(&NewChannel {
                channel_name,
                owner_id: actor,
                description: request.description.unwrap_or_default(),
            })
            .await?;
        tracing::info!(channel_id = %channel.id, owner = %actor, "channel created");
        Ok(channel)
    }

    pub async fn get(&self, id: Uuid) -> Result<ChannelView, DomainError> {
        let channel = self.channels.find_by_id(id).await?.ok_or_else(not_found)?;
        self.view(channel).await
    }

    pub async fn get_by_owner(&self, owner_id: Uuid) -> Result<ChannelView, DomainError> {
        let channel = self
            .channels
            .find_by_owner(owner_id)
            .await?
            .ok_or_else(not_found)?;
        self.view(channel).await
    }

    pub async fn update(
        &self,
        actor: Uuid,
        id: Uuid,
        request: UpdateChannelRequest,
    ) -> Result<ChannelView, DomainError> {
        let channel = self.channels.find_by_id(id).await?.ok_or_else(not_found)?;
        ensure_owner(&channel, actor, "update")?;
        request.validate().map_err(validation_error)?;

        let update = ChannelUpdate {
            channel_name: non_empty(request.channel_name),
            description: request.description,
            channel_banner: non_empty(request.channel_banner),
            channel_avatar: non_empty(request.channel_avatar),
        };
        let updated = self
            .channels
            .update(id, &update)
            .await?
            .ok_or_else(not_found)?;
        self.view(updated).await
    }

    pub async fn toggle_subscription(
        &self,
        actor: Uuid,
        id: Uuid,
    ) -> Result<ChannelView, DomainError> {
        let mut channel = self.channels.find_by_id(id).await?.ok_or_else(not_found)?;
        let outcome = toggle(&mut channel, actor, Polarity::Positive)?;
        let saved = self
            .channels
            .save_subscribers(id, &channel.reactions())
            .await?
            .ok_or_else(not_found)?;
        tracing::info!(
            channel_id = %id,
            actor = %actor,
            subscribed = outcome.active,
            subscribers = saved.subscribers,
            "channel subscription toggled"
        );
        self.view(saved).await
    }
}
