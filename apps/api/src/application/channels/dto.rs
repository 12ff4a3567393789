use crate::domain::channel::entity::{CHANNEL_DESCRIPTION_MAX_LEN, CHANNEL_NAME_MAX_LEN};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateChannelRequest {
    #[serde(alias = "channelName")]
    #[validate(length(
        max = CHANNEL_NAME_MAX_LEN,
        message = "Channel name cannot be more than 100 characters"
    ))]
    pub channel_name: Option<String>,
    #[validate(length(
        max = CHANNEL_DESCRIPTION_MAX_LEN,
        message = "Description cannot be more than 1000 characters"
    ))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateChannelRequest {
    #[serde(alias = "channelName")]
    #[validate(length(
        max = CHANNEL_NAME_MAX_LEN,
        message = "Channel name cannot be more than 100 characters"
    ))]
    pub channel_name: Option<String>,
    #[validate(length(
        max = CHANNEL_DESCRIPTION_MAX_LEN,
        message = "Description cannot be more than 1000 characters"
    ))]
    pub description: Option<String>,
    #[serde(alias = "channelBanner")]
    pub channel_banner: Option<String>,
    #[serde(alias = "channelAvatar")]
    pub channel_avatar: Option<String>,
}
