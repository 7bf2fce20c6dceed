use sqlx::PgPool;

use crate::db;
use crate::errors::AppError;
use crate::links::Links;
use crate::models::{CreateUser, User, UserRepr};

pub async fn create(pool: &PgPool, input: CreateUser) -> Result<User, AppError> {
    let user = User::new(
        input.username.as_deref().unwrap_or_default(),
        input.email.as_deref().unwrap_or_default(),
        input.password.as_deref().unwrap_or_default(),
    )?;
    db::user_queries::insert(pool, &user).await?;
    Ok(user)
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let users = db::user_queries::fetch_all(pool).await?;
    Ok(users)
}

pub async fn fetch_one(pool: &PgPool, username: &str) -> Result<User, AppError> {
    let user = db::user_queries::fetch_by_username(pool, username)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(user)
}

/// Deletion requires the body to confirm the username being removed.
pub async fn delete(pool: &PgPool, username: &str, confirm: Option<&str>) -> Result<(), AppError> {
    let user = fetch_one(pool, username).await?;
    super::confirm_matches(username, confirm, "username")?;
    db::user_queries::delete(pool, &user).await?;
    Ok(())
}

pub async fn promote(pool: &PgPool, username: &str) -> Result<User, AppError> {
    let mut user = fetch_one(pool, username).await?;
    user.promote_to_admin();
    db::user_queries::update(pool, &user).await?;
    Ok(user)
}

/// Checks the password and stamps `last_seen`; any failure is a plain 401 so
/// unknown usernames are indistinguishable from wrong passwords.
pub async fn login(pool: &PgPool, username: &str, password: &str) -> Result<User, AppError> {
    let mut user = db::user_queries::fetch_by_username(pool, username)
        .await?
        .ok_or(AppError::Unauthorized)?;
    if !user.verify_password(password) {
        return Err(AppError::Unauthorized);
    }
    user.touch_seen();
    db::user_queries::update(pool, &user).await?;
    Ok(user)
}

pub async fn repr(pool: &PgPool, links: &Links, user: &User) -> Result<UserRepr, AppError> {
    let portfolio_count = db::portfolio_queries::count_for_creator(pool, user.username()).await?;
    Ok(user.to_repr(links, portfolio_count))
}

pub async fn reprs(pool: &PgPool, links: &Links, users: &[User]) -> Result<Vec<UserRepr>, AppError> {
    let mut out = Vec::with_capacity(users.len());
    for user in users {
        out.push(repr(pool, links, user).await?);
    }
    Ok(out)
}
