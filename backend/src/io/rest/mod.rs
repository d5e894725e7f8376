//! # REST Layer
//!
//! axum handlers grouped by area. Handlers stay thin: they extract the
//! session, map DTOs to commands, call one domain service and map the result
//! back. Failures are turned into a status code plus a flash body by
//! [`error::ApiError`].

pub mod admin_apis;
pub mod attendance_apis;
pub mod auth_apis;
pub mod error;
pub mod mappers;
pub mod qr_apis;
pub mod session_cookie;
