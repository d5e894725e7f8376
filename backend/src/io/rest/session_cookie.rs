//! # Session Cookie
//!
//! Sessions travel in an HttpOnly cookie holding an HS256 JWT signed with the
//! configured session secret. The token carries both the persisted and the
//! effective role so an admin-key elevation survives across requests without
//! touching the account.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::error::ApiError;
use crate::domain::models::{Role, Session};
use crate::AppState;

pub const SESSION_COOKIE: &str = "attendance_session";

/// How long a login stays valid
pub const SESSION_TTL_HOURS: i64 = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub jti: String,
    pub exp: i64,
    pub persisted_role: Role,
    pub effective_role: Role,
}

#[derive(Debug, Error)]
pub enum SessionTokenError {
    #[error("invalid session token: {0}")]
    Decode(String),
    #[error("encoding failed: {0}")]
    Encode(String),
}

pub fn issue_token(session: &Session, secret: &[u8]) -> Result<String, SessionTokenError> {
    let claims = SessionClaims {
        sub: session.user_id.clone(),
        jti: uuid::Uuid::new_v4().to_string(),
        exp: (Utc::now() + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        persisted_role: session.persisted_role,
        effective_role: session.effective_role,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| SessionTokenError::Encode(e.to_string()))
}

pub fn decode_token(token: &str, secret: &[u8]) -> Result<Session, SessionTokenError> {
    let validation = Validation::new(Algorithm::HS256);
    let claims = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| SessionTokenError::Decode(e.to_string()))?;

    Ok(Session {
        user_id: claims.sub,
        persisted_role: claims.persisted_role,
        effective_role: claims.effective_role,
    })
}

/// `Set-Cookie` value carrying `token`
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        token,
        SESSION_TTL_HOURS * 3600
    )
}

/// `Set-Cookie` value that removes the session
pub fn clear_session_cookie() -> String {
    format!("{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Find the session token among the request's cookies
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn session_from_parts(parts: &Parts, state: &AppState) -> Option<Session> {
    let token = token_from_headers(&parts.headers)?;
    match decode_token(&token, state.config.session_secret.as_bytes()) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(error = %e, "session: cookie rejected");
            None
        }
    }
}

/// Any logged-in user
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        session_from_parts(parts, state)
            .map(CurrentSession)
            .ok_or_else(ApiError::login_required)
    }
}

/// A session whose effective role is `admin`
pub struct AdminSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts, state).ok_or_else(ApiError::admin_only)?;
        state
            .session_service
            .require_role(&session, Role::Admin)
            .map_err(|_| ApiError::admin_only())?;
        Ok(AdminSession(session))
    }
}

/// Session if present, never rejects
pub struct MaybeSession(pub Option<Session>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(session_from_parts(parts, state)))
    }
}
