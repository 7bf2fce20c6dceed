use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::links::Links;
use crate::models::{Portfolio, PortfolioRepr};

pub async fn create(
    pool: &PgPool,
    title: Option<String>,
    creator: Option<String>,
) -> Result<Portfolio, AppError> {
    let portfolio = Portfolio::new(title, creator)?;
    db::portfolio_queries::insert(pool, &portfolio).await?;
    Ok(portfolio)
}

/// Creates a portfolio owned by an existing user; 404 when the user is
/// unknown.
pub async fn create_for_user(
    pool: &PgPool,
    username: &str,
    title: Option<String>,
) -> Result<Portfolio, AppError> {
    let user = db::user_queries::fetch_by_username(pool, username)
        .await?
        .ok_or(AppError::NotFound)?;
    create(pool, title, Some(user.username().to_string())).await
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Portfolio>, AppError> {
    let portfolios = db::portfolio_queries::fetch_all(pool).await?;
    Ok(portfolios)
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Portfolio, AppError> {
    let portfolio = db::portfolio_queries::fetch_one(pool, id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(portfolio)
}

/// Ownership mismatch is indistinguishable from a missing portfolio: both
/// are 404.
pub async fn fetch_owned(pool: &PgPool, username: &str, id: Uuid) -> Result<Portfolio, AppError> {
    let user = db::user_queries::fetch_by_username(pool, username).await?;
    let portfolio = fetch_one(pool, id).await?;
    if user.is_none() || !portfolio.is_owned_by(username) {
        return Err(AppError::NotFound);
    }
    Ok(portfolio)
}

pub async fn fetch_for_user(pool: &PgPool, username: &str) -> Result<Vec<Portfolio>, AppError> {
    let user = db::user_queries::fetch_by_username(pool, username)
        .await?
        .ok_or(AppError::NotFound)?;
    let portfolios = db::portfolio_queries::fetch_for_creator(pool, user.username()).await?;
    Ok(portfolios)
}

pub async fn rename(pool: &PgPool, id: Uuid, title: Option<String>) -> Result<Portfolio, AppError> {
    let mut portfolio = fetch_one(pool, id).await?;
    portfolio.set_title(title.as_deref().unwrap_or_default())?;
    db::portfolio_queries::update(pool, &portfolio).await?;
    Ok(portfolio)
}

/// Deletion requires the body to confirm the portfolio id being removed.
pub async fn delete(pool: &PgPool, id: Uuid, confirm: Option<Uuid>) -> Result<(), AppError> {
    let portfolio = fetch_one(pool, id).await?;
    super::confirm_matches(id, confirm, "portfolio_id")?;
    db::portfolio_queries::delete(pool, portfolio.id).await?;
    Ok(())
}

pub async fn repr(
    pool: &PgPool,
    links: &Links,
    portfolio: &Portfolio,
) -> Result<PortfolioRepr, AppError> {
    let counts = db::idea_queries::counts_for_portfolio(pool, portfolio.id).await?;
    Ok(portfolio.to_repr(links, &counts))
}

pub async fn reprs(
    pool: &PgPool,
    links: &Links,
    portfolios: &[Portfolio],
) -> Result<Vec<PortfolioRepr>, AppError> {
    let mut out = Vec::with_capacity(portfolios.len());
    for portfolio in portfolios {
        out.push(repr(pool, links, portfolio).await?);
    }
    Ok(out)
}
