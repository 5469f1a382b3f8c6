//! Feesync Sync Server
//!
//! Serves snapshot writes and reads over HTTP for the fee management app,
//! backed by the SQLite sheet store.
//!
//! # Configuration
//!
//! Environment variables:
//! - `FEESYNC_PORT`: Port to listen on (default: 8080)
//! - `FEESYNC_DATABASE_PATH`: Sheet store path (default: ~/.local/share/feesync/feesync.db)
//! - `FEESYNC_CONFIG`: Path to config file (default: ~/.config/feesync/config.yaml)
//!
//! # Config File Format
//!
//! ```yaml
//! database_path: /var/lib/feesync/feesync.db
//! port: 8080
//! ```
//!
//! # Endpoints
//!
//! - `POST /` or `POST /sync`: Replace all sheets with the posted snapshot
//! - `GET /` or `GET /sync`: Return the stored sheets as a snapshot
//! - `GET /dashboard`: Metrics computed by the last sync
//! - `GET /health`: Health check endpoint

use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feesync::config::Config;
use feesync::db::{init_db, SheetStore};
use feesync::server::{router, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feesync=info,feesync_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(None)?;

    match &config.config_file {
        Some(path) => tracing::info!("Config file: {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }
    tracing::info!("Sheet store: {}", config.database_path.value.display());

    let pool = init_db(&config.database_path.value).await?;
    let state = AppState::new(SheetStore::new(pool));
    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port.value));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
