use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::{IdeaRepr, UpdateIdeaStatus};
use crate::services::idea_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/idea/:id",
        get(get_idea).put(update_idea_status).delete(delete_idea),
    )
}

#[derive(Debug, Deserialize)]
pub struct DeleteIdea {
    pub idea_id: Option<Uuid>,
}

pub async fn get_idea(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IdeaRepr>, AppError> {
    info!("GET /idea/{} - Fetching idea", id);
    let idea = idea_service::fetch_one(&state.pool, id).await.map_err(|e| {
        error!("Failed to fetch idea {}: {}", id, e);
        e
    })?;
    Ok(Json(idea.to_repr()))
}

pub async fn update_idea_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateIdeaStatus>,
) -> Result<Json<IdeaRepr>, AppError> {
    info!("PUT /idea/{} - Updating status", id);
    let idea = idea_service::set_finished(&state.pool, id, input.is_finished)
        .await
        .map_err(|e| {
            error!("Failed to update idea {}: {}", id, e);
            e
        })?;
    Ok(Json(idea.to_repr()))
}

pub async fn delete_idea(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(body): Json<DeleteIdea>,
) -> Result<Json<serde_json::Value>, AppError> {
    info!("DELETE /idea/{} - Deleting idea", id);
    identity.require_admin()?;
    idea_service::delete(&state.pool, id, body.idea_id)
        .await
        .map_err(|e| {
            error!("Failed to delete idea {}: {}", id, e);
            e
        })?;
    Ok(Json(serde_json::json!({})))
}
