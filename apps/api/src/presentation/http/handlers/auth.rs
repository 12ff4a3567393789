use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::{Value, json};

use crate::application::auth::dto::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use crate::domain::user::entity::{AccountSummary, User};
use crate::presentation::http::{
    errors::AppError,
    extractors::ApiJson,
    middleware::user::{AuthUser, UserClaims, require_actor},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub user: AccountSummary,
}

fn issue_user_token(state: &AppState, user: &User) -> Result<String, AppError> {
    let exp = (chrono::Utc::now() + chrono::Duration::days(state.config.jwt_expiry_days))
        .timestamp() as usize;
    let claims = UserClaims {
        sub: user.id.to_string(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

fn auth_response(state: &AppState, user: &User) -> Result<AuthResponse, AppError> {
    Ok(AuthResponse {
        success: true,
        token: issue_user_token(state, user)?,
        user: user.account(),
    })
}

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let user = state.auth.register(body).await?;
    Ok((StatusCode::CREATED, Json(auth_response(&state, &user)?)))
}

pub async fn login_user(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user = state.auth.login(body).await?;
    Ok(Json(auth_response(&state, &user)?))
}

pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, AppError> {
    let actor = require_actor(&headers, &state.config.jwt_secret)?;
    let user = state.auth.current_user(actor).await?;
    Ok(Json(json!({ "success": true, "user": user.profile() })))
}

pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    ApiJson(body): ApiJson<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let user = state.auth.update_profile(actor, body).await?;
    Ok(Json(json!({ "success": true, "user": user.profile() })))
}
