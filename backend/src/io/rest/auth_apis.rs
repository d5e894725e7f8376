//! # REST API for Accounts and Sessions
//!
//! Registration, login and logout. A successful login answers with a
//! `Set-Cookie` header carrying the signed session token.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error::{ApiError, ApiResult};
use super::mappers::user_mapper::UserMapper;
use super::session_cookie::{clear_session_cookie, issue_token, session_cookie, MaybeSession};
use crate::domain::commands::{session::LoginCommand, users::RegisterUserCommand};
use crate::AppState;
use shared::{Flash, FlashCategory, HomeResponse, LoginRequest, LoginResponse, RegisterRequest};

/// Landing page: tells the client where to go
pub async fn home(MaybeSession(session): MaybeSession) -> impl IntoResponse {
    let logged_in = session.is_some();
    let redirect = if logged_in { "/attendance" } else { "/login" };

    Json(HomeResponse {
        logged_in,
        redirect: Some(redirect.to_string()),
    })
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/register - user_id: {}", request.user_id);

    let user = state
        .credential_service
        .register(RegisterUserCommand {
            user_id: request.user_id,
            email: request.email,
            password: request.password,
            gender: request.gender,
        })
        .await?;

    let flash = Flash::new(
        FlashCategory::Success,
        format!("Registered successfully! Your ID: {}", user.id),
    )
    .redirect_to("/login");
    Ok((StatusCode::CREATED, Json(flash)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    info!("POST /api/login - user_id: {}", request.user_id);

    let session = state
        .session_service
        .login(LoginCommand {
            user_id: request.user_id,
            password: request.password,
            admin_key: request.admin_key,
        })
        .await?;

    let token = issue_token(&session, state.config.session_secret.as_bytes())
        .map_err(ApiError::internal)?;

    let response = LoginResponse {
        flash: Flash::new(
            FlashCategory::Success,
            format!("Welcome back, {}!", session.user_id),
        )
        .redirect_to("/attendance"),
        role: UserMapper::role_to_dto(session.effective_role),
        user_id: session.user_id,
    };

    Ok(([(header::SET_COOKIE, session_cookie(&token))], Json(response)))
}

pub async fn logout() -> impl IntoResponse {
    info!("POST /api/logout");

    (
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(Flash::new(FlashCategory::Info, "Logged out").redirect_to("/")),
    )
}
