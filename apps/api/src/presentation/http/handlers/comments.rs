use crate::application::comments::dto::{CreateCommentRequest, UpdateCommentRequest};
use crate::presentation::http::{
    errors::AppError,
    extractors::{ApiJson, ApiPath},
    middleware::user::AuthUser,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

pub async fn list_video_comments(
    State(state): State<AppState>,
    ApiPath(video_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let threads = state.comments.threads_for_video(video_id).await?;
    Ok(Json(json!({
        "success": true,
        "count": threads.len(),
        "comments": threads,
    })))
}

pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiJson(body): ApiJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let comment = state.comments.create(actor, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "comment": comment })),
    ))
}

pub async fn update_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
    ApiJson(body): ApiJson<UpdateCommentRequest>,
) -> Result<Json<Value>, AppError> {
    let comment = state.comments.update(actor, id, body).await?;
    Ok(Json(json!({ "success": true, "comment": comment })))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Value>, AppError> {
    let removed = state.comments.delete(actor, id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Comment deleted",
        "removed": removed.len(),
    })))
}

pub async fn like_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Value>, AppError> {
    let comment = state.comments.like(actor, id).await?;
    Ok(Json(json!({ "success": true, "comment": comment })))
}
