//! Error taxonomy shared by the domain services.
//!
//! Every variant is recoverable at the request boundary; none of them should
//! take the process down.

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("User ID already exists.")]
    AlreadyExists,

    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
