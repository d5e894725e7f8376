//! backend/src/domain/models/session.rs

use serde::{Deserialize, Serialize};

use super::user::Role;

/// An authenticated session
///
/// `persisted_role` is the role stored on the account at login time.
/// `effective_role` is what the session is allowed to do; it only differs
/// when a matching admin key was supplied at login, and that elevation is
/// never written back to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub persisted_role: Role,
    pub effective_role: Role,
}

impl Session {
    pub fn new(user_id: impl Into<String>, persisted_role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            persisted_role,
            effective_role: persisted_role,
        }
    }

    /// True when the effective role came from the admin key rather than the account
    pub fn is_elevated(&self) -> bool {
        self.effective_role != self.persisted_role
    }
}
