//! Translation of domain errors into HTTP responses.
//!
//! Every failure reaches the client as a status code plus a [`Flash`] body
//! naming the page to go back to.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::{Flash, FlashCategory};
use tracing::error;

use crate::domain::DomainError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub flash: Flash,
}

impl ApiError {
    pub fn new(status: StatusCode, category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            status,
            flash: Flash::new(category, message),
        }
    }

    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.flash.redirect = Some(target.into());
        self
    }

    /// No valid session on a route that needs one
    pub fn login_required() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            FlashCategory::Warning,
            "Please log in first.",
        )
        .redirect_to("/login")
    }

    pub fn admin_only() -> Self {
        Self::new(StatusCode::FORBIDDEN, FlashCategory::Danger, "Admin access only")
            .redirect_to("/login")
    }

    pub fn internal(err: impl std::fmt::Display) -> Self {
        error!("Internal error: {}", err);
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            FlashCategory::Danger,
            "Something went wrong, please try again.",
        )
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::AlreadyExists => {
                Self::new(StatusCode::CONFLICT, FlashCategory::Danger, err.to_string())
                    .redirect_to("/register")
            }
            DomainError::NotFound(_) => {
                Self::new(StatusCode::NOT_FOUND, FlashCategory::Danger, err.to_string())
            }
            DomainError::InvalidCredentials => {
                Self::new(StatusCode::UNAUTHORIZED, FlashCategory::Danger, err.to_string())
                    .redirect_to("/login")
            }
            DomainError::Forbidden(message) => {
                Self::new(StatusCode::FORBIDDEN, FlashCategory::Danger, message)
                    .redirect_to("/login")
            }
            DomainError::InvalidInput(message) => {
                Self::new(StatusCode::BAD_REQUEST, FlashCategory::Danger, message)
            }
            DomainError::Storage(e) => Self::internal(format!("{:#}", e)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.flash)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status_codes() {
        let cases = [
            (DomainError::AlreadyExists, StatusCode::CONFLICT),
            (DomainError::NotFound("User x".into()), StatusCode::NOT_FOUND),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (DomainError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (
                DomainError::Storage(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_storage_error_message_is_generic() {
        let api = ApiError::from(DomainError::Storage(anyhow::anyhow!("/secret/path missing")));
        assert!(!api.flash.message.contains("/secret/path"));
    }

    #[test]
    fn test_duplicate_registration_points_back_to_register() {
        let api = ApiError::from(DomainError::AlreadyExists);
        assert_eq!(api.flash.message, "User ID already exists.");
        assert_eq!(api.flash.redirect.as_deref(), Some("/register"));
    }
}
