use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateIdea, Idea};

/// Adds an idea to an existing portfolio. An unknown instrument reference is
/// left to the store's FK check, which surfaces as `Constraint`.
pub async fn add_to_portfolio(
    pool: &PgPool,
    portfolio_id: Uuid,
    input: CreateIdea,
    creator: Option<String>,
) -> Result<Idea, AppError> {
    let portfolio = db::portfolio_queries::fetch_one(pool, portfolio_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let idea = Idea::new(
        input.description.as_deref().unwrap_or_default(),
        portfolio.id,
        creator,
        input.instrument_id,
    )?;
    db::idea_queries::insert(pool, &idea).await?;
    Ok(idea)
}

/// Adds an idea on behalf of an existing user; 404 when user or portfolio is
/// unknown.
pub async fn add_for_user(
    pool: &PgPool,
    username: &str,
    portfolio_id: Uuid,
    input: CreateIdea,
) -> Result<Idea, AppError> {
    let user = db::user_queries::fetch_by_username(pool, username)
        .await?
        .ok_or(AppError::NotFound)?;
    add_to_portfolio(pool, portfolio_id, input, Some(user.username().to_string())).await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Idea, AppError> {
    let idea = db::idea_queries::fetch_one(pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(idea)
}

pub async fn fetch_for_portfolio(pool: &PgPool, portfolio_id: Uuid) -> Result<Vec<Idea>, AppError> {
    let portfolio = db::portfolio_queries::fetch_one(pool, portfolio_id)
        .await?
        .ok_or(AppError::NotFound)?;
    let ideas = db::idea_queries::fetch_for_portfolio(pool, portfolio.id).await?;
    Ok(ideas)
}

/// Lists ideas of a portfolio owned by `username`; ownership mismatch is 404.
pub async fn fetch_for_owned_portfolio(
    pool: &PgPool,
    username: &str,
    portfolio_id: Uuid,
) -> Result<Vec<Idea>, AppError> {
    let portfolio = db::portfolio_queries::fetch_one(pool, portfolio_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !portfolio.is_owned_by(username) {
        return Err(AppError::NotFound);
    }
    let ideas = db::idea_queries::fetch_for_portfolio(pool, portfolio.id).await?;
    Ok(ideas)
}

/// Applies the finish/reopen transition and persists it. `is_finished` must
/// be present in the request.
pub async fn set_finished(
    pool: &PgPool,
    id: Uuid,
    is_finished: Option<bool>,
) -> Result<Idea, AppError> {
    let mut idea = fetch_one(pool, id).await?;
    match is_finished {
        Some(true) => idea.mark_finished(),
        Some(false) => idea.reopen(),
        None => {
            return Err(AppError::Validation(
                "is_finished must be provided".to_string(),
            ))
        }
    }
    db::idea_queries::update(pool, &idea).await?;
    Ok(idea)
}

/// Deletion requires the body to confirm the idea id being removed.
pub async fn delete(pool: &PgPool, id: Uuid, confirm: Option<Uuid>) -> Result<(), AppError> {
    let idea = fetch_one(pool, id).await?;
    super::confirm_matches(id, confirm, "idea_id")?;
    db::idea_queries::delete(pool, idea.id).await?;
    Ok(())
}
