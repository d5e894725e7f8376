//! # Domain Module
//!
//! Business logic for the attendance tracker, independent of HTTP and of the
//! storage backend.
//!
//! ## Module Organization
//!
//! - **credential_service**: user accounts, login checks, role assignment
//! - **roster_service**: children known per parent
//! - **ledger_service**: the append-only attendance log
//! - **session_service**: sessions, admin key elevation, role checks
//! - **attendance_wizard**: the mark self → children → thank-you flow
//!
//! ## Business Rules
//!
//! - User IDs are unique; new accounts always start with role `user`
//! - (parent, child name) pairs are unique on the roster
//! - At most one parent-presence event per parent per calendar day, enforced
//!   by the wizard rather than the ledger
//! - Child events are recorded on every submission, even for known children

pub mod attendance_wizard;
pub mod commands;
pub mod credential_service;
pub mod errors;
pub mod ledger_service;
pub mod models;
pub mod password;
pub mod roster_service;
pub mod session_service;

pub use attendance_wizard::{AttendanceWizard, WizardOutcome, WizardStep};
pub use credential_service::CredentialService;
pub use errors::{DomainError, DomainResult};
pub use ledger_service::LedgerService;
pub use roster_service::RosterService;
pub use session_service::SessionService;
