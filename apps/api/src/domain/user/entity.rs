use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A registered account. Every account can own at most one channel and
/// may itself be subscribed to like a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: Option<String>,
    pub bio: String,
    /// Number of accounts whose `subscribed_to` contains this account.
    pub subscribers: i64,
    pub subscribed_to: Vec<Uuid>,
    pub video_ids: Vec<Uuid>,
    pub liked_videos: Vec<Uuid>,
    pub channel_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
            bio: self.bio.clone(),
            subscribers: self.subscribers,
            subscribed_to: self.subscribed_to.clone(),
            video_ids: self.video_ids.clone(),
            liked_videos: self.liked_videos.clone(),
            channel_id: self.channel_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn account(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Public view of a [`User`]; never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: String,
    pub subscribers: i64,
    pub subscribed_to: Vec<Uuid>,
    pub video_ids: Vec<Uuid>,
    pub liked_videos: Vec<Uuid>,
    pub channel_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account fields returned alongside a freshly issued token.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct AccountSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
}
