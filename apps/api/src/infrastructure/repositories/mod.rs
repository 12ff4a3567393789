pub(crate) mod json_sql;
pub mod sqlx_channel_repository;
pub mod sqlx_comment_repository;
pub mod sqlx_user_repository;
pub mod sqlx_video_repository;

pub use sqlx_channel_repository::SqlxChannelRepository;
pub use sqlx_comment_repository::SqlxCommentRepository;
pub use sqlx_user_repository::SqlxUserRepository;
pub use sqlx_video_repository::SqlxVideoRepository;
