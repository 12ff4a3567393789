use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    success: bool,
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let db_up = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("Health check failed: Database unreachable: {}", e);
            false
        }
    };

    let response = HealthResponse {
        success: db_up,
        status: if db_up { "healthy" } else { "unhealthy" },
        database: if db_up { "up" } else { "down" },
        version: env!("CARGO_PKG_VERSION"),
    };

    let code = if db_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
