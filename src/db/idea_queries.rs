use sqlx::PgPool;
use uuid::Uuid;

use crate::db::write_error;
use crate::errors::AppError;
use crate::models::{Idea, IdeaCounts};

const COLUMNS: &str =
    "id, description, created_at, finished_at, is_finished, creator, portfolio_id, instrument_id";

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Idea>, sqlx::Error> {
    sqlx::query_as::<_, Idea>(&format!("SELECT {COLUMNS} FROM ideas WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn fetch_for_portfolio(pool: &PgPool, portfolio_id: Uuid) -> Result<Vec<Idea>, sqlx::Error> {
    sqlx::query_as::<_, Idea>(&format!(
        "SELECT {COLUMNS} FROM ideas WHERE portfolio_id = $1 ORDER BY created_at"
    ))
    .bind(portfolio_id)
    .fetch_all(pool)
    .await
}

/// Live aggregates for a portfolio, computed at read time.
pub async fn counts_for_portfolio(pool: &PgPool, portfolio_id: Uuid) -> Result<IdeaCounts, sqlx::Error> {
    sqlx::query_as::<_, IdeaCounts>(
        "SELECT COUNT(*) AS total,
                COUNT(*) FILTER (WHERE NOT is_finished) AS open,
                COUNT(*) FILTER (WHERE is_finished) AS finished
         FROM ideas
         WHERE portfolio_id = $1",
    )
    .bind(portfolio_id)
    .fetch_one(pool)
    .await
}

/// A dangling portfolio or instrument reference rolls back as `Constraint`.
pub async fn insert(pool: &PgPool, idea: &Idea) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO ideas
             (id, description, created_at, finished_at, is_finished, creator, portfolio_id, instrument_id)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
    )
    .bind(idea.id)
    .bind(idea.description())
    .bind(idea.created_at)
    .bind(idea.finished_at())
    .bind(idea.is_finished())
    .bind(&idea.creator)
    .bind(idea.portfolio_id)
    .bind(idea.instrument_id)
    .execute(&mut *tx)
    .await
    .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(())
}

pub async fn update(pool: &PgPool, idea: &Idea) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE ideas
         SET description = $2, finished_at = $3, is_finished = $4
         WHERE id = $1",
    )
    .bind(idea.id)
    .bind(idea.description())
    .bind(idea.finished_at())
    .bind(idea.is_finished())
    .execute(&mut *tx)
    .await
    .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(())
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM ideas WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(result.rows_affected())
}
