use crate::domain::shared::{
    ownership::Owned,
    pagination::PageRequest,
    reaction::{Reactable, ReactionSets},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;

pub const TITLE_MAX_LEN: u64 = 200;
pub const DESCRIPTION_MAX_LEN: u64 = 2000;
pub const DEFAULT_CATEGORY: &str = "Other";

/// Visibility of a video. Only `Published` videos appear in the public feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum VideoStatus {
    #[default]
    Published,
    Draft,
    Unlisted,
    Private,
}

impl VideoStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Unlisted => "unlisted",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for VideoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VideoStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "published" => Ok(Self::Published),
            "draft" => Ok(Self::Draft),
            "unlisted" => Ok(Self::Unlisted),
            "private" => Ok(Self::Private),
            other => Err(format!("Unknown video status '{}'", other)),
        }
    }
}

/// An uploaded video.
///
/// `liked_by` / `disliked_by` are disjoint reaction sets; `likes` and
/// `dislikes` always equal their sizes. `duration` is in seconds, already
/// normalized from whatever legacy form the row was stored in.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub owner_id: Uuid,
    pub video_url: String,
    pub thumbnail: Option<String>,
    pub duration: i64,
    pub views: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub liked_by: Vec<Uuid>,
    pub disliked_by: Vec<Uuid>,
    pub comment_ids: Vec<Uuid>,
    pub status: VideoStatus,
    pub tags: Vec<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Owned for Video {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    fn resource_name(&self) -> &'static str {
        "video"
    }
}

impl Reactable for Video {
    fn reactions(&self) -> ReactionSets {
        ReactionSets::with_negative(self.liked_by.clone(), self.disliked_by.clone())
    }

    fn apply_reactions(&mut self, sets: ReactionSets) {
        self.likes = sets.positive_count();
        self.dislikes = sets.negative_count();
        let (liked_by, disliked_by) = sets.into_parts();
        self.liked_by = liked_by;
        self.disliked_by = disliked_by;
    }
}

/// The uploading account as shown next to a video.
#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct VideoOwner {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
    pub subscribers: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct VideoView {
    #[serde(flatten)]
    pub video: Video,
    pub channel: Option<VideoOwner>,
}

#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub owner_id: Uuid,
    pub video_url: String,
    pub thumbnail: Option<String>,
    pub duration: i64,
    pub status: VideoStatus,
    pub tags: Vec<String>,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<i64>,
    pub status: Option<VideoStatus>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

/// Filter for the public feed.
#[derive(Debug, Clone, Default)]
pub struct VideoQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub page: PageRequest,
}
