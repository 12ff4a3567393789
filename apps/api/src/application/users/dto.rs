use crate::domain::user::entity::UserProfile;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_SEARCH_LIMIT: i64 = 10;
pub const MAX_SEARCH_LIMIT: i64 = 50;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchUsersQuery {
    pub query: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscriptionOutcome {
    pub subscribed: bool,
    pub user: UserProfile,
    pub channel: UserProfile,
}
