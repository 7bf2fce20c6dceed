use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::links::Links;
use crate::validation::{check_length, EMAIL_RE, USERNAME_RE};

/// A registered account. The password is write-only: only the argon2 hash is
/// ever stored, and nothing serializes it back out.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    pub member_since: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserRepr {
    pub username: String,
    pub user_url: String,
    pub member_since: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub portfolios: String,
    pub portfolio_count: i64,
}

impl User {
    pub fn new(username: &str, email: &str, password: &str) -> Result<Self, AppError> {
        let now = Utc::now();
        let mut user = Self {
            id: Uuid::new_v4(),
            username: String::new(),
            email: String::new(),
            password_hash: String::new(),
            member_since: now,
            last_seen: now,
            is_admin: false,
        };
        user.set_username(username)?;
        user.set_email(email)?;
        user.set_password(password)?;
        Ok(user)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn set_username(&mut self, username: &str) -> Result<(), AppError> {
        if !check_length(username, 64) || !USERNAME_RE.is_match(username) {
            return Err(AppError::Validation(format!(
                "{username} is not a valid username"
            )));
        }
        self.username = username.to_string();
        Ok(())
    }

    pub fn set_email(&mut self, email: &str) -> Result<(), AppError> {
        if !check_length(email, 64) || !EMAIL_RE.is_match(email) {
            return Err(AppError::Validation(format!(
                "{email} is not a valid email address"
            )));
        }
        self.email = email.to_string();
        Ok(())
    }

    pub fn set_password(&mut self, password: &str) -> Result<(), AppError> {
        if password.is_empty() {
            return Err(AppError::Validation("no password given".to_string()));
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?
            .to_string();
        if !check_length(&hash, 128) {
            return Err(AppError::Validation(
                "not a valid password, hash is too long".to_string(),
            ));
        }
        self.password_hash = hash;
        Ok(())
    }

    /// Argon2 verification doubles as the constant-time comparison; the hash
    /// itself never leaves this type.
    pub fn verify_password(&self, candidate: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(candidate.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    pub fn touch_seen(&mut self) {
        self.last_seen = Utc::now();
    }

    pub fn promote_to_admin(&mut self) {
        self.is_admin = true;
    }

    pub fn to_repr(&self, links: &Links, portfolio_count: i64) -> UserRepr {
        UserRepr {
            username: self.username.clone(),
            user_url: links.user(&self.username),
            member_since: self.member_since,
            last_seen: self.last_seen,
            portfolios: links.user_portfolios(&self.username),
            portfolio_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_user() -> User {
        User::new("alice", "alice@example.com", "secret123").unwrap()
    }

    #[test]
    fn test_new_user_is_not_admin() {
        let user = valid_user();
        assert!(!user.is_admin);
        assert_eq!(user.username(), "alice");
    }

    #[test]
    fn test_username_with_whitespace_rejected() {
        assert!(matches!(
            User::new("al ice", "alice@example.com", "secret123"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_username_too_long_rejected() {
        let long = "a".repeat(65);
        assert!(User::new(&long, "alice@example.com", "secret123").is_err());
        assert!(User::new(&"a".repeat(64), "alice@example.com", "secret123").is_ok());
    }

    #[test]
    fn test_bad_email_shapes_rejected() {
        for email in ["", "alice", "alice@example", "al ice@example.com"] {
            assert!(
                User::new("alice", email, "secret123").is_err(),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            User::new("alice", "alice@example.com", ""),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_setter_failure_leaves_value_unchanged() {
        let mut user = valid_user();
        assert!(user.set_username("has space").is_err());
        assert_eq!(user.username(), "alice");
        assert!(user.set_email("not-an-email").is_err());
        assert_eq!(user.email(), "alice@example.com");
    }

    #[test]
    fn test_verify_password() {
        let user = valid_user();
        assert!(user.verify_password("secret123"));
        assert!(!user.verify_password("secret124"));
        assert!(!user.verify_password(""));
    }

    #[test]
    fn test_password_is_write_only() {
        let user = valid_user();
        // the stored value is a PHC hash, not the password
        assert!(user.password_hash().starts_with("$argon2"));
        assert!(!user.password_hash().contains("secret123"));
    }

    #[test]
    fn test_repr_never_contains_password() {
        let user = valid_user();
        let repr = user.to_repr(&Links::new("http://localhost:3000"), 2);
        let json = serde_json::to_value(&repr).unwrap();
        let obj = json.as_object().unwrap();
        assert!(obj.get("password").is_none());
        assert!(obj.get("password_hash").is_none());
        assert_eq!(obj["username"], "alice");
        assert_eq!(obj["portfolio_count"], 2);
        assert_eq!(obj["user_url"], "http://localhost:3000/api/user/alice");
    }

    #[test]
    fn test_promote_to_admin() {
        let mut user = valid_user();
        user.promote_to_admin();
        assert!(user.is_admin);
    }
}
