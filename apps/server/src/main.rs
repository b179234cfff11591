//! # SmartKart Server
//!
//! HTTP JSON API for the SmartKart self-checkout.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        SmartKart Server                                 │
//! │                                                                         │
//! │  Browser ───► HTTP (5000) ───► Routes ───► smartkart-core              │
//! │                                   │                                     │
//! │                                   ├──► JsonCatalog (products.json)      │
//! │                                   └──► MemorySessionStore               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use smartkart_core::WeightValidator;
use smartkart_server::{AppState, ServerConfig};
use smartkart_store::{JsonCatalog, MemorySessionStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting SmartKart server...");

    // Load configuration
    let config = ServerConfig::load()?;
    info!(
        bind = %config.bind_addr,
        port = config.port,
        catalog = %config.catalog_path.display(),
        tolerance = %config.weight_tolerance,
        session_ttl_secs = config.session_ttl.as_secs(),
        "Configuration loaded"
    );

    // Load the catalog once; it is read-only for the life of the process
    let catalog = JsonCatalog::from_path(&config.catalog_path)?;

    let state = AppState::new(
        Arc::new(catalog),
        Arc::new(MemorySessionStore::new(config.session_ttl)),
        WeightValidator::new(config.weight_tolerance),
    );

    let addr = config.bind_address()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, smartkart_server::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to debug output for our own crates.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,smartkart=debug,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
