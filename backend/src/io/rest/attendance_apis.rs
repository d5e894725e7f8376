//! # REST API for the Attendance Wizard
//!
//! `GET` returns the default view; `POST` advances one step. Timestamps are
//! taken from the server's local clock.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use chrono::Local;
use tracing::info;

use super::error::ApiResult;
use super::mappers::wizard_mapper::WizardMapper;
use super::session_cookie::CurrentSession;
use crate::AppState;
use shared::AttendanceStepRequest;

pub async fn get_attendance(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> ApiResult<impl IntoResponse> {
    info!("GET /api/attendance - user: {}", session.user_id);

    let outcome = state.attendance_wizard.view(&session.user_id).await?;
    Ok(Json(WizardMapper::to_view(outcome)))
}

pub async fn post_attendance(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(request): Json<AttendanceStepRequest>,
) -> ApiResult<impl IntoResponse> {
    info!(
        "POST /api/attendance - user: {}, step: {:?}",
        session.user_id, request.step
    );

    let action = WizardMapper::to_action(request);
    let outcome = state
        .attendance_wizard
        .advance(&session.user_id, action, Local::now().naive_local())
        .await?;
    Ok(Json(WizardMapper::to_view(outcome)))
}
