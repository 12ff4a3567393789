use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::presentation::http::{errors::AppError, state::AppState};

/// Claims carried by an access token. `sub` is the account id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub exp: usize,
}

impl UserClaims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Unauthorized("Not authorized, token failed".to_string()))
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

pub fn decode_required_user_claims(
    headers: &HeaderMap,
    secret: &str,
) -> Result<UserClaims, AppError> {
    let token = extract_bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("Not authorized, no token".to_string()))?;

    decode::<UserClaims>(
        &token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|d| d.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        AppError::Unauthorized("Not authorized, token failed".to_string())
    })
}

/// Actor id carried by a valid bearer token. The account may no longer exist.
pub fn require_actor(headers: &HeaderMap, secret: &str) -> Result<Uuid, AppError> {
    decode_required_user_claims(headers, secret)?.user_id()
}

/// Authenticated actor whose account still exists.
///
/// Rejects with 401 for a missing or invalid token and with 404
/// "User not found" when the token outlived its account.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let actor = require_actor(&parts.headers, &state.config.jwt_secret)?;
        let user = state.auth.current_user(actor).await?;
        Ok(Self(user.id))
    }
}
