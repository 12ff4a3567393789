use super::{
    handlers::{auth, channels, comments, health, users, videos},
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/api/health", get(health::health_check))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login_user))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/profile", put(auth::update_profile))
        // Users
        .route("/api/users/search", get(users::search_users))
        .route("/api/users/subscriptions", get(users::list_subscriptions))
        .route("/api/users/{id}", get(users::get_user))
        .route("/api/users/{id}/subscribe", put(users::subscribe_user))
        // Channels
        .route("/api/channels", post(channels::create_channel))
        .route("/api/channels/user/{user_id}", get(channels::get_user_channel))
        .route(
            "/api/channels/{id}",
            get(channels::get_channel).put(channels::update_channel),
        )
        .route("/api/channels/{id}/subscribe", put(channels::subscribe_channel))
        // Videos
        .route(
            "/api/videos",
            get(videos::list_videos).post(videos::create_video),
        )
        .route("/api/videos/user/{user_id}", get(videos::list_user_videos))
        .route(
            "/api/videos/{id}",
            get(videos::get_video)
                .put(videos::update_video)
                .delete(videos::delete_video),
        )
        .route("/api/videos/{id}/like", put(videos::like_video))
        .route("/api/videos/{id}/dislike", put(videos::dislike_video))
        // Comments
        .route("/api/comments", post(comments::create_comment))
        .route(
            "/api/comments/video/{video_id}",
            get(comments::list_video_comments),
        )
        .route(
            "/api/comments/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .route("/api/comments/{id}/like", put(comments::like_comment))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
