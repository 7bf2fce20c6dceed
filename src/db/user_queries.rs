use sqlx::PgPool;

use crate::db::write_error;
use crate::errors::AppError;
use crate::models::User;

const COLUMNS: &str = "id, username, email, password_hash, member_since, last_seen, is_admin";

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {COLUMNS} FROM users ORDER BY member_since"
    ))
    .fetch_all(pool)
    .await
}

pub async fn fetch_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {COLUMNS} FROM users WHERE username = $1"))
        .bind(username)
        .fetch_optional(pool)
        .await
}

/// Inserts in its own transaction; a username/email collision rolls the write
/// back and surfaces as `Constraint`.
pub async fn insert(pool: &PgPool, user: &User) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, member_since, last_seen, is_admin)
         VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(user.id)
    .bind(user.username())
    .bind(user.email())
    .bind(user.password_hash())
    .bind(user.member_since)
    .bind(user.last_seen)
    .bind(user.is_admin)
    .execute(&mut *tx)
    .await
    .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(())
}

pub async fn update(pool: &PgPool, user: &User) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;
    sqlx::query(
        "UPDATE users
         SET username = $2, email = $3, password_hash = $4, last_seen = $5, is_admin = $6
         WHERE id = $1",
    )
    .bind(user.id)
    .bind(user.username())
    .bind(user.email())
    .bind(user.password_hash())
    .bind(user.last_seen)
    .bind(user.is_admin)
    .execute(&mut *tx)
    .await
    .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(())
}

/// Fails with `Constraint` while portfolios or ideas still reference the
/// username.
pub async fn delete(pool: &PgPool, user: &User) -> Result<u64, AppError> {
    let mut tx = pool.begin().await?;
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(write_error)?;
    tx.commit().await.map_err(write_error)?;
    Ok(result.rows_affected())
}
