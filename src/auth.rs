use axum::async_trait;
use axum::extract::FromRequestParts;
use chrono::{Duration, Utc};
use http::header::AUTHORIZATION;
use http::request::Parts;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;

/// Bearer token payload: the username plus the admin flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

pub fn issue_token(
    secret: &str,
    username: &str,
    is_admin: bool,
    ttl_hours: i64,
) -> Result<TokenResponse, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: username.to_string(),
        admin: is_admin,
        iat: now.timestamp(),
        exp: (now + Duration::hours(ttl_hours)).timestamp(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token encoding failed: {e}")))?;
    Ok(TokenResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: ttl_hours * 3600,
    })
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized)
}

/// The caller's identity: decoded bearer claims, or none for anonymous
/// requests. A present but malformed/expired token rejects with 401.
#[derive(Debug, Clone)]
pub struct Identity(pub Option<Claims>);

impl Identity {
    pub fn username(&self) -> Option<&str> {
        self.0.as_ref().map(|claims| claims.sub.as_str())
    }

    /// The admin predicate for destructive routes, evaluated before any
    /// mutation: anonymous callers get 401, non-admins 403.
    pub fn require_admin(&self) -> Result<&Claims, AppError> {
        match &self.0 {
            None => Err(AppError::Unauthorized),
            Some(claims) if !claims.admin => Err(AppError::AdminRequired),
            Some(claims) => Ok(claims),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Identity(None));
        };
        let value = header.to_str().map_err(|_| AppError::Unauthorized)?;
        let token = value.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;
        let claims = decode_token(&state.config.jwt_secret, token)?;
        Ok(Identity(Some(claims)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_token_roundtrip() {
        let token = issue_token(SECRET, "alice", false, 24).unwrap();
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 24 * 3600);
        let claims = decode_token(SECRET, &token.access_token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(!claims.admin);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue_token(SECRET, "alice", false, 24).unwrap();
        assert!(matches!(
            decode_token("other-secret", &token.access_token),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(decode_token(SECRET, "not.a.token").is_err());
    }

    #[test]
    fn test_require_admin() {
        let anonymous = Identity(None);
        assert!(matches!(
            anonymous.require_admin(),
            Err(AppError::Unauthorized)
        ));

        let token = issue_token(SECRET, "bob", false, 1).unwrap();
        let user = Identity(Some(decode_token(SECRET, &token.access_token).unwrap()));
        assert!(matches!(user.require_admin(), Err(AppError::AdminRequired)));

        let token = issue_token(SECRET, "root", true, 1).unwrap();
        let admin = Identity(Some(decode_token(SECRET, &token.access_token).unwrap()));
        assert_eq!(admin.require_admin().unwrap().sub, "root");
    }
}
