//! # Attendance Backend
//!
//! Server side of the family attendance tracker: parents register, log in,
//! mark their own presence once a day and record which children came with
//! them. Administrators browse the log and manage roles.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, session cookie)
//!     ↓
//! Domain Layer (credentials, roster, ledger, wizard)
//!     ↓
//! Storage Layer (RecordStore port, CSV files)
//! ```
//!
//! [`initialize_backend`] wires the CSV stores under the configured data
//! directory into the services; [`create_router`] exposes them over HTTP.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::models::{AttendanceEvent, Child, User};
use crate::domain::{
    AttendanceWizard, CredentialService, LedgerService, RosterService, SessionService,
};
use crate::io::rest::{admin_apis, attendance_apis, auth_apis, qr_apis};
use crate::storage::{CsvConnection, CsvRecordStore, RecordStore};

/// Services shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub credential_service: CredentialService,
    pub session_service: SessionService,
    pub ledger_service: LedgerService,
    pub attendance_wizard: AttendanceWizard,
    pub config: Arc<AppConfig>,
}

/// Assemble the services over the given stores
///
/// Does not touch the stores; call [`initialize_stores`] first when they may
/// not exist yet.
pub fn build_state(
    users: Arc<dyn RecordStore<User>>,
    children: Arc<dyn RecordStore<Child>>,
    events: Arc<dyn RecordStore<AttendanceEvent>>,
    config: AppConfig,
) -> AppState {
    let credential_service = CredentialService::new(users);
    let session_service = SessionService::new(credential_service.clone(), config.admin_key.clone());
    let roster_service = RosterService::new(children);
    let ledger_service = LedgerService::new(events);
    let attendance_wizard = AttendanceWizard::new(roster_service, ledger_service.clone());

    AppState {
        credential_service,
        session_service,
        ledger_service,
        attendance_wizard,
        config: Arc::new(config),
    }
}

/// Create any missing collection with its header row
pub async fn initialize_stores(
    users: &dyn RecordStore<User>,
    children: &dyn RecordStore<Child>,
    events: &dyn RecordStore<AttendanceEvent>,
) -> Result<()> {
    users.initialize().await.context("initializing users")?;
    children.initialize().await.context("initializing children")?;
    events.initialize().await.context("initializing attendance")?;
    Ok(())
}

/// Initialize the backend over CSV files in `config.data_dir`
pub async fn initialize_backend(config: AppConfig) -> Result<AppState> {
    info!("Setting up data directory {}", config.data_dir.display());
    let connection = CsvConnection::new(&config.data_dir)?;

    let users = Arc::new(CsvRecordStore::<User>::new(connection.clone()));
    let children = Arc::new(CsvRecordStore::<Child>::new(connection.clone()));
    let events = Arc::new(CsvRecordStore::<AttendanceEvent>::new(connection));

    initialize_stores(users.as_ref(), children.as_ref(), events.as_ref()).await?;

    info!("Setting up application state");
    Ok(build_state(users, children, events, config))
}

/// Create the axum router with all routes configured
pub fn create_router(app_state: AppState) -> Result<Router> {
    let origin = app_state
        .config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", app_state.config.cors_origin))?;

    // Cookies cross origins in development, so headers must be listed explicitly
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let api_routes = Router::new()
        .route("/register", post(auth_apis::register))
        .route("/login", post(auth_apis::login))
        .route("/logout", post(auth_apis::logout))
        .route(
            "/attendance",
            get(attendance_apis::get_attendance).post(attendance_apis::post_attendance),
        )
        .route("/admin/attendance", get(admin_apis::list_attendance))
        .route("/admin/users", get(admin_apis::list_users))
        .route("/admin/assign", post(admin_apis::assign_role))
        .route("/qr", get(qr_apis::attendance_qr));

    Ok(Router::new()
        .route("/", get(auth_apis::home))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state))
}
