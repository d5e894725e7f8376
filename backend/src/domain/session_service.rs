//! # Session / Role Gate
//!
//! Turns a login attempt into a [`Session`] and answers authorization checks.
//!
//! ## Admin key elevation
//!
//! A login that also supplies the configured admin key gets an effective role
//! of `admin` for that session only. The account's stored role is left alone,
//! so the next login without the key falls back to it. This mirrors how the
//! service has always behaved; whether it is a convenience or a hole is an
//! open question, which is why the two roles are kept as separate fields.

use tracing::{info, warn};

use crate::domain::commands::session::LoginCommand;
use crate::domain::credential_service::CredentialService;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Role, Session};

#[derive(Clone)]
pub struct SessionService {
    credentials: CredentialService,
    admin_key: String,
}

impl SessionService {
    pub fn new(credentials: CredentialService, admin_key: impl Into<String>) -> Self {
        Self {
            credentials,
            admin_key: admin_key.into(),
        }
    }

    /// Check credentials and build a session carrying the stored role
    pub async fn authenticate(&self, user_id: &str, password: &str) -> DomainResult<Session> {
        let user_id = user_id.trim();

        if !self.credentials.validate_login(user_id, password).await? {
            return Err(DomainError::InvalidCredentials);
        }

        let role = self.credentials.get_role(user_id).await?;
        Ok(Session::new(user_id, role))
    }

    /// Raise the session to `admin` when `supplied_admin_key` matches the
    /// configured key. Never persisted.
    pub fn elevate(&self, mut session: Session, supplied_admin_key: &str) -> Session {
        let supplied = supplied_admin_key.trim();

        if supplied.is_empty() {
            return session;
        }

        if supplied == self.admin_key {
            info!("Session for {} elevated to admin via admin key", session.user_id);
            session.effective_role = Role::Admin;
        } else {
            warn!("Admin key mismatch for {}", session.user_id);
        }

        session
    }

    /// Authenticate, then apply the optional admin key
    pub async fn login(&self, command: LoginCommand) -> DomainResult<Session> {
        let session = self
            .authenticate(&command.user_id, &command.password)
            .await?;
        let session = self.elevate(session, &command.admin_key);

        info!(
            "User {} logged in (persisted role: {}, effective role: {})",
            session.user_id, session.persisted_role, session.effective_role
        );
        Ok(session)
    }

    pub fn require_role(&self, session: &Session, required: Role) -> DomainResult<()> {
        if session.effective_role.satisfies(required) {
            Ok(())
        } else {
            warn!(
                "Forbidden: {} has role {}, needs {}",
                session.user_id, session.effective_role, required
            );
            Err(DomainError::Forbidden("Admin access only".to_string()))
        }
    }
}
