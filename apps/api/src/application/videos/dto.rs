use crate::domain::video::entity::{DESCRIPTION_MAX_LEN, TITLE_MAX_LEN, VideoStatus};
use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateVideoRequest {
    #[validate(length(max = TITLE_MAX_LEN, message = "Title cannot be more than 200 characters"))]
    pub title: String,
    #[validate(length(
        max = DESCRIPTION_MAX_LEN,
        message = "Description cannot be more than 2000 characters"
    ))]
    pub description: Option<String>,
    #[serde(alias = "videoUrl")]
    pub video_url: String,
    pub thumbnail: Option<String>,
    /// Seconds, or a `"MM:SS"` clock string.
    pub duration: Option<serde_json::Value>,
    pub status: Option<VideoStatus>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVideoRequest {
    #[validate(length(max = TITLE_MAX_LEN, message = "Title cannot be more than 200 characters"))]
    pub title: Option<String>,
    #[validate(length(
        max = DESCRIPTION_MAX_LEN,
        message = "Description cannot be more than 2000 characters"
    ))]
    pub description: Option<String>,
    #[serde(alias = "videoUrl")]
    pub video_url: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<serde_json::Value>,
    pub status: Option<VideoStatus>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListVideosQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub category: Option<String>,
}
