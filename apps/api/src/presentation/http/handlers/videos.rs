use crate::application::videos::dto::{CreateVideoRequest, ListVideosQuery, UpdateVideoRequest};
use crate::domain::shared::reaction::Polarity;
use crate::presentation::http::{
    errors::AppError,
    extractors::{ApiJson, ApiPath, ApiQuery},
    middleware::user::AuthUser,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

pub async fn list_videos(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListVideosQuery>,
) -> Result<Json<Value>, AppError> {
    let (page, result) = state.videos.list(query).await?;
    Ok(Json(json!({
        "success": true,
        "count": result.items.len(),
        "total": result.total,
        "page": page.page,
        "pages": page.pages(result.total),
        "videos": result.items,
    })))
}

pub async fn get_video(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let video = state.videos.watch(id).await?;
    let comments = state.comments.threads_for_video(id).await?;
    Ok(Json(json!({
        "success": true,
        "video": video,
        "comments": comments,
    })))
}

pub async fn list_user_videos(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let videos = state.videos.list_by_owner(user_id).await?;
    Ok(Json(json!({
        "success": true,
        "count": videos.len(),
        "videos": videos,
    })))
}

pub async fn create_video(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiJson(body): ApiJson<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let video = state.videos.create(actor, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "video": video })),
    ))
}

pub async fn update_video(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
    ApiJson(body): ApiJson<UpdateVideoRequest>,
) -> Result<Json<Value>, AppError> {
    let video = state.videos.update(actor, id, body).await?;
    Ok(Json(json!({ "success": true, "video": video })))
}

pub async fn delete_video(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Value>, AppError> {
    state.videos.delete(actor, id).await?;
    Ok(Json(json!({ "success": true, "message": "Video deleted" })))
}

async fn react(
    state: AppState,
    id: Uuid,
    actor: Uuid,
    polarity: Polarity,
) -> Result<Json<Value>, AppError> {
    let video = state.videos.react(actor, id, polarity).await?;
    Ok(Json(json!({ "success": true, "video": video })))
}

pub async fn like_video(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Value>, AppError> {
    react(state, id, actor, Polarity::Positive).await
}

pub async fn dislike_video(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Value>, AppError> {
    react(state, id, actor, Polarity::Negative).await
}
