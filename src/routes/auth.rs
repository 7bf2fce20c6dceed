use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::auth::{issue_token, TokenResponse};
use crate::errors::AppError;
use crate::services::user_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/auth/token", post(token))
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Verifies the password, stamps `last_seen` and returns a bearer token.
pub async fn token(
    State(state): State<AppState>,
    Json(input): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let username = input.username.unwrap_or_default();
    info!("POST /auth/token - Token request for {}", username);
    let user = user_service::login(
        &state.pool,
        &username,
        input.password.as_deref().unwrap_or_default(),
    )
    .await?;
    let token = issue_token(
        &state.config.jwt_secret,
        user.username(),
        user.is_admin,
        state.config.token_ttl_hours,
    )?;
    Ok(Json(token))
}
