//! # aircared, the aircare daemon
//!
//! Composition root that wires the store, event bus and HTTP adapter
//! together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise `tracing` with the configured filter
//! - Construct the event bus and the home store, injecting the bus as the
//!   store's event publisher
//! - Build the axum router and serve it until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use aircare_adapter_http_axum::router;
use aircare_adapter_http_axum::state::AppState;
use aircare_app::event_bus::InProcessEventBus;
use aircare_app::store::HomeStore;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).context("invalid logging filter")?,
        )
        .init();

    // Event bus
    let event_bus = Arc::new(InProcessEventBus::new(config.events.capacity));

    // Store
    let store = Arc::new(HomeStore::new(Arc::clone(&event_bus)));

    // HTTP
    let state = AppState::new(store, event_bus);
    let static_dir = config.server.static_dir.as_deref();
    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "serving dashboard assets");
    }
    let app = router::build(state, static_dir);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "aircared listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("aircared stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
