//! Runtime configuration read from the environment.
//!
//! A `.env` file in the working directory is loaded first when present. The
//! admin key and session secret have fallback values so the server starts
//! out of the box; both fallbacks are public and must be overridden in any
//! real deployment.

use anyhow::{Context, Result};
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_ADMIN_KEY: &str = "fallback_admin_key";
pub const DEFAULT_SESSION_SECRET: &str = "your_secret_key_here";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Key that elevates a login to admin for that session
    pub admin_key: String,
    /// HS256 secret used to sign session cookies
    pub session_secret: String,
    /// Directory holding users.csv, children.csv and attendance.csv
    pub data_dir: PathBuf,
    pub listen_addr: SocketAddr,
    /// Base URL of this server for the QR code; derived from the Host header when unset
    pub public_url: Option<String>,
    pub cors_origin: String,
}

/// Load `.env` from the working directory (or a parent) into the process
/// environment. Returns its path when one was found.
///
/// Run before the tracing subscriber is built so `RUST_LOG` from the file
/// takes effect.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Load a specific env file into the process environment
pub fn load_dotenv_from(path: &Path) -> Result<()> {
    dotenvy::from_path(path)
        .with_context(|| format!("Failed to load env file {}", path.display()))
}

impl AppConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let admin_key = lookup("ADMIN_KEY").unwrap_or_else(|| DEFAULT_ADMIN_KEY.to_string());
        let session_secret =
            lookup("SESSION_SECRET").unwrap_or_else(|| DEFAULT_SESSION_SECRET.to_string());
        let data_dir = lookup("ATTENDANCE_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let listen_addr = lookup("ATTENDANCE_LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .with_context(|| format!("Invalid ATTENDANCE_LISTEN_ADDR: {}", listen_addr))?;
        let public_url = lookup("ATTENDANCE_PUBLIC_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
        let cors_origin =
            lookup("ATTENDANCE_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());

        Ok(Self {
            admin_key,
            session_secret,
            data_dir,
            listen_addr,
            public_url,
            cors_origin,
        })
    }

    /// Warn about secrets still set to their public defaults
    pub fn warn_insecure_defaults(&self) {
        if self.admin_key == DEFAULT_ADMIN_KEY {
            warn!("ADMIN_KEY is not set; using the insecure default admin key");
        }
        if self.session_secret == DEFAULT_SESSION_SECRET {
            warn!("SESSION_SECRET is not set; session cookies are signed with an insecure default");
        }
    }
}
