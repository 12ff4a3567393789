use crate::{
    application::{
        auth::use_case::AuthUseCase, channels::use_case::ChannelUseCase,
        comments::use_case::CommentUseCase, users::use_case::UserUseCase,
        videos::use_case::VideoUseCase,
    },
    config::Config,
    infrastructure::repositories::{
        SqlxChannelRepository, SqlxCommentRepository, SqlxUserRepository, SqlxVideoRepository,
    },
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    pub auth: Arc<AuthUseCase>,
    pub users: Arc<UserUseCase>,
    pub channels: Arc<ChannelUseCase>,
    pub videos: Arc<VideoUseCase>,
    pub comments: Arc<CommentUseCase>,
}

impl AppState {
    /// Wire the Postgres-backed repositories into the use cases.
    pub fn new(db: PgPool, config: Config) -> Self {
        let user_repo = Arc::new(SqlxUserRepository::new(db.clone()));
        let channel_repo = Arc::new(SqlxChannelRepository::new(db.clone()));
        let video_repo = Arc::new(SqlxVideoRepository::new(db.clone()));
        let comment_repo = Arc::new(SqlxCommentRepository::new(db.clone()));

        Self {
            auth: Arc::new(AuthUseCase::new(user_repo.clone(), config.bcrypt_cost)),
            users: Arc::new(UserUseCase::new(user_repo.clone())),
            channels: Arc::new(ChannelUseCase::new(channel_repo, user_repo.clone())),
            videos: Arc::new(VideoUseCase::new(video_repo.clone(), user_repo)),
            comments: Arc::new(CommentUseCase::new(comment_repo, video_repo)),
            db,
            config,
        }
    }
}
