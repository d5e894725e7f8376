use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use attendance_backend::config::{load_dotenv, AppConfig};
use attendance_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Before the subscriber, so RUST_LOG in .env applies
    let env_file = load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Some(path) = env_file {
        info!("Loaded environment from {}", path.display());
    }

    let config = AppConfig::from_env()?;
    config.warn_insecure_defaults();
    let addr = config.listen_addr;

    let app_state = initialize_backend(config).await?;
    let app = create_router(app_state)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
