use serde::{Deserialize, Serialize};
use std::fmt;

/// Role carried by a user account or a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// Category of a user-visible message, mirrors the usual alert styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
    Success,
    Info,
    Warning,
    Danger,
}

/// User-visible message plus the page the client should move to next
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
    /// Suggested client-side redirect target, if any
    pub redirect: Option<String>,
}

impl Flash {
    pub fn new(category: FlashCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            redirect: None,
        }
    }

    pub fn redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeResponse {
    pub logged_in: bool,
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub user_id: String,
    pub email: String,
    pub password: String,
    pub gender: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_id: String,
    pub password: String,
    /// Optional admin key; a matching key elevates this session to admin
    #[serde(default)]
    pub admin_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub role: Role,
    pub flash: Flash,
}

/// A child known to the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub parent_id: String,
    pub name: String,
    pub gender: String,
}

/// One (name, gender) pair submitted in the children step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildEntry {
    pub name: String,
    #[serde(default)]
    pub gender: String,
}

/// Body of `POST /api/attendance`
///
/// `step` is one of `mark_parent` (the default), `children_response` or
/// `submit_children`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStepRequest {
    #[serde(default)]
    pub step: Option<String>,
    #[serde(default)]
    pub children: Vec<ChildEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    MarkParent,
    AskChildren,
    EnterChildren,
    ThankYou,
}

/// What the attendance page should show after a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceView {
    pub step: WizardStep,
    pub children: Vec<Child>,
    pub flash: Option<Flash>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    /// `YYYY-MM-DD HH:MM:SS`, local time
    pub timestamp: String,
    /// Empty when the parent marked their own presence
    pub child_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceListResponse {
    pub records: Vec<AttendanceRecord>,
}

/// A user account as shown to admins (no password hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub gender: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserSummary>,
}

/// Body of `POST /api/admin/assign`
///
/// Both fields are free text so that malformed input can be reported instead
/// of rejected by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignRoleRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}
