use crate::domain::comment::entity::COMMENT_MAX_LEN;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct CreateCommentRequest {
    #[validate(length(max = COMMENT_MAX_LEN, message = "Comment cannot be more than 500 characters"))]
    pub text: String,
    #[serde(alias = "videoId")]
    pub video_id: Uuid,
    #[serde(default, alias = "parentCommentId")]
    pub parent_comment_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, Validate)]
#[ts(export)]
pub struct UpdateCommentRequest {
    #[validate(length(max = COMMENT_MAX_LEN, message = "Comment cannot be more than 500 characters"))]
    pub text: String,
}
