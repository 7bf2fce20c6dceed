use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use http::StatusCode;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::{CreateIdea, CreatePortfolio, IdeaRepr, PortfolioRepr, UpdatePortfolio};
use crate::routes::users::{IdeaList, PortfolioList};
use crate::services::{idea_service, portfolio_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolios", get(list_portfolios).post(create_portfolio))
        .route(
            "/portfolio/:id",
            get(get_portfolio)
                .put(rename_portfolio)
                .post(add_portfolio_idea)
                .delete(delete_portfolio),
        )
        .route("/portfolio/:id/ideas", get(list_portfolio_ideas))
}

#[derive(Debug, Deserialize)]
pub struct DeletePortfolio {
    pub portfolio_id: Option<Uuid>,
}

pub async fn list_portfolios(
    State(state): State<AppState>,
) -> Result<Json<PortfolioList>, AppError> {
    info!("GET /portfolios - Listing portfolios");
    let portfolios = portfolio_service::fetch_all(&state.pool).await.map_err(|e| {
        error!("Failed to fetch portfolios: {}", e);
        e
    })?;
    let portfolios = portfolio_service::reprs(&state.pool, &state.links, &portfolios).await?;
    Ok(Json(PortfolioList { portfolios }))
}

/// Anonymous creation: the portfolio has no creator unless the caller sent a
/// bearer token.
pub async fn create_portfolio(
    State(state): State<AppState>,
    identity: Identity,
    Json(input): Json<CreatePortfolio>,
) -> Result<(StatusCode, Json<PortfolioRepr>), AppError> {
    info!("POST /portfolios - Creating portfolio");
    let creator = identity.username().map(str::to_string);
    let portfolio = portfolio_service::create(&state.pool, input.title, creator)
        .await
        .map_err(|e| {
            error!("Failed to create portfolio: {}", e);
            e
        })?;
    let repr = portfolio_service::repr(&state.pool, &state.links, &portfolio).await?;
    Ok((StatusCode::CREATED, Json(repr)))
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PortfolioRepr>, AppError> {
    info!("GET /portfolio/{} - Fetching portfolio", id);
    let portfolio = portfolio_service::fetch_one(&state.pool, id)
        .await
        .map_err(|e| {
            error!("Failed to fetch portfolio {}: {}", id, e);
            e
        })?;
    let repr = portfolio_service::repr(&state.pool, &state.links, &portfolio).await?;
    Ok(Json(repr))
}

pub async fn rename_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePortfolio>,
) -> Result<Json<PortfolioRepr>, AppError> {
    info!("PUT /portfolio/{} - Renaming portfolio", id);
    let portfolio = portfolio_service::rename(&state.pool, id, input.title)
        .await
        .map_err(|e| {
            error!("Failed to rename portfolio {}: {}", id, e);
            e
        })?;
    let repr = portfolio_service::repr(&state.pool, &state.links, &portfolio).await?;
    Ok(Json(repr))
}

pub async fn delete_portfolio(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(body): Json<DeletePortfolio>,
) -> Result<Json<serde_json::Value>, AppError> {
    info!("DELETE /portfolio/{} - Deleting portfolio", id);
    identity.require_admin()?;
    portfolio_service::delete(&state.pool, id, body.portfolio_id)
        .await
        .map_err(|e| {
            error!("Failed to delete portfolio {}: {}", id, e);
            e
        })?;
    Ok(Json(serde_json::json!({})))
}

pub async fn add_portfolio_idea(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateIdea>,
) -> Result<(StatusCode, Json<IdeaRepr>), AppError> {
    info!("POST /portfolio/{} - Adding idea", id);
    let creator = identity.username().map(str::to_string);
    let idea = idea_service::add_to_portfolio(&state.pool, id, input, creator)
        .await
        .map_err(|e| {
            error!("Failed to add idea to portfolio {}: {}", id, e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(idea.to_repr())))
}

pub async fn list_portfolio_ideas(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IdeaList>, AppError> {
    info!("GET /portfolio/{}/ideas - Listing ideas", id);
    let ideas = idea_service::fetch_for_portfolio(&state.pool, id)
        .await
        .map_err(|e| {
            error!("Failed to fetch ideas for portfolio {}: {}", id, e);
            e
        })?;
    Ok(Json(IdeaList {
        ideas: ideas.iter().map(|idea| idea.to_repr()).collect(),
    }))
}
