//! # REST API for Administrators
//!
//! All handlers require a session whose effective role is `admin`.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use tracing::info;

use super::error::ApiResult;
use super::mappers::{attendance_mapper::AttendanceMapper, user_mapper::UserMapper};
use super::session_cookie::AdminSession;
use crate::domain::commands::users::AssignRoleCommand;
use crate::AppState;
use shared::{AssignRoleRequest, Flash, FlashCategory};

/// Every attendance event, in write order
pub async fn list_attendance(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/admin/attendance - admin: {}", session.user_id);

    let events = state.ledger_service.all().await?;
    Ok(Json(AttendanceMapper::to_list_dto(events)))
}

pub async fn list_users(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/admin/users - admin: {}", session.user_id);

    let users = state.credential_service.list_users().await?;
    Ok(Json(UserMapper::to_user_list_dto(users)))
}

pub async fn assign_role(
    State(state): State<AppState>,
    AdminSession(session): AdminSession,
    Json(request): Json<AssignRoleRequest>,
) -> ApiResult<impl IntoResponse> {
    info!(
        "POST /api/admin/assign - admin: {}, request: {:?}",
        session.user_id, request
    );

    let target = request.user_id.as_deref().unwrap_or_default().trim().to_string();
    let role = state
        .credential_service
        .set_role(AssignRoleCommand {
            user_id: request.user_id,
            role: request.role,
        })
        .await?;

    Ok(Json(
        Flash::new(
            FlashCategory::Success,
            format!("Updated role of user {} to {}", target, role),
        )
        .redirect_to("/admin/assign"),
    ))
}
