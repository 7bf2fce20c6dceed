use sqlx::PgPool;
use uuid::Uuid;

use crate::db::write_error;
use crate::errors::AppError;
use crate::models::Portfolio;

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        "SELECT id, title, created_at, creator
         FROM portfolios
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        "SELECT id, title, created_at, creator
         FROM portfolios
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_for_creator(pool: &PgPool, username: &str) -> Result<Vec<Portfolio>, sqlx::Error> {
    sqlx::query_as::<_, Portfolio>(
        "SELECT id, title, created_at, creator
         FROM portfolios
         WHERE creator = $1
         ORDER BY created_at DESC",
    )
    .bind(username)
    .fetch_all(pool)
    .await
}

pub async fn count_for_creator(pool: &PgPool, username: &str) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM portfolios WHERE creator = $1")
        .bind(username)
        .fetch_one(pool)
        .await
}

pub async fn insert(pool: &PgPool, portfolio: &Portfolio) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO portfolios (id, title, created_at, creator)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(portfolio.id)
    .bind(portfolio.title())
    .bind(portfolio.created_at)
    .bind(&portfolio.creator)
    .execute(&mut *tx)
    .await
    .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(())
}

pub async fn update(pool: &PgPool, portfolio: &Portfolio) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE portfolios SET title = $2 WHERE id = $1")
        .bind(portfolio.id)
        .bind(portfolio.title())
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(())
}

/// Owned ideas go with the portfolio (ON DELETE CASCADE).
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(result.rows_affected())
}
