use crate::application::channels::dto::{CreateChannelRequest, UpdateChannelRequest};
use crate::presentation::http::{
    errors::AppError,
    extractors::{ApiJson, ApiPath},
    middleware::user::AuthUser,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

pub async fn create_channel(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiJson(body): ApiJson<CreateChannelRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let channel = state.channels.create(actor, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "channel": channel })),
    ))
}

pub async fn get_channel(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let channel = state.channels.get(id).await?;
    Ok(Json(json!({ "success": true, "channel": channel })))
}

pub async fn get_user_channel(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let channel = state.channels.get_by_owner(user_id).await?;
    Ok(Json(json!({ "success": true, "channel": channel })))
}

pub async fn update_channel(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
    ApiJson(body): ApiJson<UpdateChannelRequest>,
) -> Result<Json<Value>, AppError> {
    let channel = state.channels.update(actor, id, body).await?;
    Ok(Json(json!({ "success": true, "channel": channel })))
}

pub async fn subscribe_channel(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Value>, AppError> {
    let channel = state.channels.toggle_subscription(actor, id).await?;
    let subscribed = channel.channel.subscribed_by.contains(&actor);
    Ok(Json(json!({
        "success": true,
        "subscribed": subscribed,
        "channel": channel,
    })))
}
