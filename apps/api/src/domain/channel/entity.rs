use crate::domain::shared::{
    ownership::Owned,
    reaction::{Reactable, ReactionSets},
};
use crate::domain::user::entity::AccountSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

pub const CHANNEL_NAME_MAX_LEN: u64 = 100;
pub const CHANNEL_DESCRIPTION_MAX_LEN: u64 = 1000;

/// A user's public channel. Subscriptions to a channel are a positive-only
/// reaction set (`subscribed_by`) with `subscribers` as its counter.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Channel {
    pub id: Uuid,
    pub channel_name: String,
    pub owner_id: Uuid,
    pub description: String,
    pub channel_banner: Option<String>,
    pub channel_avatar: Option<String>,
    pub subscribers: i64,
    pub subscribed_by: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Channel {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn resource_name(&self) -> &'static str {
        "channel"
    }
}

impl Reactable for Channel {
    fn reactions(&self) -> ReactionSets {
        ReactionSets::positive_only(self.subscribed_by.clone())
    }

    fn apply_reactions(&mut self, sets: ReactionSets) {
        self.subscribers = sets.positive_count();
        self.subscribed_by = sets.into_parts().0;
    }
}

/// A channel together with its owner's account summary.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ChannelView {
    #[serde(flatten)]
    pub channel: Channel,
    pub owner: Option<AccountSummary>,
}

#[derive(Debug, Clone)]
pub struct NewChannel {
    pub channel_name: String,
    pub owner_id: Uuid,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelUpdate {
    pub channel_name: Option<String>,
    pub description: Option<String>,
    pub channel_banner: Option<String>,
    pub channel_avatar: Option<String>,
}
