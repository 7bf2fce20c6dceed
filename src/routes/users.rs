use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::auth::Identity;
use crate::errors::AppError;
use crate::models::{CreateIdea, CreatePortfolio, CreateUser, IdeaRepr, PortfolioRepr, UserRepr};
use crate::services::{idea_service, portfolio_service, user_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/user", post(create_user))
        .route("/user/:username", get(get_user).delete(delete_user))
        .route("/user/:username/promote", post(promote_user))
        .route("/user/:username/portfolios", get(list_user_portfolios))
        .route("/user/:username/portfolio", post(create_user_portfolio))
        .route(
            "/user/:username/portfolio/:portfolio_id",
            get(get_user_portfolio).post(add_user_portfolio_idea),
        )
        .route(
            "/user/:username/portfolio/:portfolio_id/ideas",
            get(list_user_portfolio_ideas),
        )
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<UserRepr>,
}

#[derive(Debug, Serialize)]
pub struct PortfolioList {
    pub portfolios: Vec<PortfolioRepr>,
}

#[derive(Debug, Serialize)]
pub struct IdeaList {
    pub ideas: Vec<IdeaRepr>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteUser {
    pub username: Option<String>,
}

pub async fn list_users(State(state): State<AppState>) -> Result<Json<UserList>, AppError> {
    info!("GET /users - Listing users");
    let users = user_service::fetch_all(&state.pool).await.map_err(|e| {
        error!("Failed to fetch users: {}", e);
        e
    })?;
    let users = user_service::reprs(&state.pool, &state.links, &users).await?;
    Ok(Json(UserList { users }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserRepr>, AppError> {
    info!("GET /user/{} - Fetching user", username);
    let user = user_service::fetch_one(&state.pool, &username)
        .await
        .map_err(|e| {
            error!("Failed to fetch user {}: {}", username, e);
            e
        })?;
    let repr = user_service::repr(&state.pool, &state.links, &user).await?;
    Ok(Json(repr))
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserRepr>), AppError> {
    info!("POST /user - Creating user");
    let user = user_service::create(&state.pool, input).await.map_err(|e| {
        error!("Failed to create user: {}", e);
        e
    })?;
    let repr = user_service::repr(&state.pool, &state.links, &user).await?;
    Ok((StatusCode::CREATED, Json(repr)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    identity: Identity,
    Path(username): Path<String>,
    Json(body): Json<DeleteUser>,
) -> Result<Json<serde_json::Value>, AppError> {
    info!("DELETE /user/{} - Deleting user", username);
    identity.require_admin()?;
    user_service::delete(&state.pool, &username, body.username.as_deref())
        .await
        .map_err(|e| {
            error!("Failed to delete user {}: {}", username, e);
            e
        })?;
    Ok(Json(serde_json::json!({})))
}

pub async fn promote_user(
    State(state): State<AppState>,
    identity: Identity,
    Path(username): Path<String>,
) -> Result<Json<UserRepr>, AppError> {
    info!("POST /user/{}/promote - Promoting to admin", username);
    identity.require_admin()?;
    let user = user_service::promote(&state.pool, &username).await?;
    let repr = user_service::repr(&state.pool, &state.links, &user).await?;
    Ok(Json(repr))
}

pub async fn list_user_portfolios(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<PortfolioList>, AppError> {
    info!("GET /user/{}/portfolios - Listing portfolios", username);
    let portfolios = portfolio_service::fetch_for_user(&state.pool, &username)
        .await
        .map_err(|e| {
            error!("Failed to fetch portfolios for {}: {}", username, e);
            e
        })?;
    let portfolios = portfolio_service::reprs(&state.pool, &state.links, &portfolios).await?;
    Ok(Json(PortfolioList { portfolios }))
}

pub async fn get_user_portfolio(
    State(state): State<AppState>,
    Path((username, portfolio_id)): Path<(String, Uuid)>,
) -> Result<Json<PortfolioRepr>, AppError> {
    info!(
        "GET /user/{}/portfolio/{} - Fetching owned portfolio",
        username, portfolio_id
    );
    let portfolio = portfolio_service::fetch_owned(&state.pool, &username, portfolio_id)
        .await
        .map_err(|e| {
            error!(
                "Failed to fetch portfolio {} for {}: {}",
                portfolio_id, username, e
            );
            e
        })?;
    let repr = portfolio_service::repr(&state.pool, &state.links, &portfolio).await?;
    Ok(Json(repr))
}

pub async fn create_user_portfolio(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Json(input): Json<CreatePortfolio>,
) -> Result<(StatusCode, Json<PortfolioRepr>), AppError> {
    info!("POST /user/{}/portfolio - Creating portfolio", username);
    let portfolio = portfolio_service::create_for_user(&state.pool, &username, input.title)
        .await
        .map_err(|e| {
            error!("Failed to create portfolio for {}: {}", username, e);
            e
        })?;
    let repr = portfolio_service::repr(&state.pool, &state.links, &portfolio).await?;
    Ok((StatusCode::CREATED, Json(repr)))
}

pub async fn add_user_portfolio_idea(
    State(state): State<AppState>,
    Path((username, portfolio_id)): Path<(String, Uuid)>,
    Json(input): Json<CreateIdea>,
) -> Result<(StatusCode, Json<IdeaRepr>), AppError> {
    info!(
        "POST /user/{}/portfolio/{} - Adding idea",
        username, portfolio_id
    );
    let idea = idea_service::add_for_user(&state.pool, &username, portfolio_id, input)
        .await
        .map_err(|e| {
            error!("Failed to add idea to portfolio {}: {}", portfolio_id, e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(idea.to_repr())))
}

pub async fn list_user_portfolio_ideas(
    State(state): State<AppState>,
    Path((username, portfolio_id)): Path<(String, Uuid)>,
) -> Result<Json<IdeaList>, AppError> {
    info!(
        "GET /user/{}/portfolio/{}/ideas - Listing ideas",
        username, portfolio_id
    );
    let ideas = idea_service::fetch_for_owned_portfolio(&state.pool, &username, portfolio_id)
        .await
        .map_err(|e| {
            error!(
                "Failed to fetch ideas for portfolio {} of {}: {}",
                portfolio_id, username, e
            );
            e
        })?;
    Ok(Json(IdeaList {
        ideas: ideas.iter().map(|idea| idea.to_repr()).collect(),
    }))
}
