//! backend/src/domain/models/user.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::storage::CsvRecord;

/// Role stored on a user account and carried by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Whether a session holding `self` may perform an action requiring `required`
    pub fn satisfies(&self, required: Role) -> bool {
        match required {
            Role::User => true,
            Role::Admin => *self == Role::Admin,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Exact match only: `user` or `admin`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// A registered account, one row of `users.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Email")]
    pub email: String,
    /// Lowercase hex SHA-256 of the password
    #[serde(rename = "PasswordHash")]
    pub password_hash: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Role")]
    pub role: Role,
}

impl CsvRecord for User {
    const FILE_NAME: &'static str = "users.csv";
    const HEADERS: &'static [&'static str] = &["ID", "Email", "PasswordHash", "Gender", "Role"];
}
