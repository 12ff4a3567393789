use crate::application::users::dto::SearchUsersQuery;
use crate::presentation::http::{
    errors::AppError,
    extractors::{ApiPath, ApiQuery},
    middleware::user::AuthUser,
    state::AppState,
};
use axum::{Json, extract::State};
use serde_json::{Value, json};
use uuid::Uuid;

pub async fn get_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Value>, AppError> {
    let user = state.users.profile(id).await?;
    Ok(Json(json!({ "success": true, "user": user })))
}

pub async fn search_users(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SearchUsersQuery>,
) -> Result<Json<Value>, AppError> {
    let users = state.users.search(query).await?;
    Ok(Json(json!({
        "success": true,
        "count": users.len(),
        "users": users,
    })))
}

pub async fn subscribe_user(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Value>, AppError> {
    let outcome = state.users.toggle_subscription(actor, id).await?;
    Ok(Json(json!({
        "success": true,
        "message": if outcome.subscribed { "Subscribed" } else { "Unsubscribed" },
        "subscribed": outcome.subscribed,
        "user": outcome.user,
        "channel": outcome.channel,
    })))
}

pub async fn list_subscriptions(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> Result<Json<Value>, AppError> {
    let subscriptions = state.users.subscriptions(actor).await?;
    Ok(Json(json!({
        "success": true,
        "count": subscriptions.len(),
        "subscriptions": subscriptions,
    })))
}
