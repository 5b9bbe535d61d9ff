//! # hbnbd, the HBNB API daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging
//! - Open the configured storage backend (`SQLite` or JSON file)
//! - Build the application state and the axum router on top of it
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use anyhow::Context;
use axum::ServiceExt;
use axum::extract::Request;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use hbnb_adapter_http_axum::router;
use hbnb_adapter_http_axum::state::AppState;
use hbnb_adapter_storage_file::FileStorage;
use hbnb_adapter_storage_sqlite_sqlx::pool;
use hbnb_app::ports::Storage;

use crate::config::{Config, StorageKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = config.bind_addr();
    match config.storage.kind {
        StorageKind::Db => {
            let db = pool::Config {
                database_url: config.storage.database_url.clone(),
            }
            .build()
            .await
            .context("failed to open database")?;
            tracing::info!(url = %config.storage.database_url, "using database storage");
            serve(db.storage(), &bind_addr).await
        }
        StorageKind::File => {
            let storage = FileStorage::open(&config.storage.file_path)
                .await
                .context("failed to open object file")?;
            tracing::info!(path = %config.storage.file_path, "using file storage");
            serve(storage, &bind_addr).await
        }
    }
}

async fn serve<S>(storage: S, bind_addr: &str) -> anyhow::Result<()>
where
    S: Storage + Clone + 'static,
{
    let app = router::build(AppState::new(storage));

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!("hbnbd listening on http://{bind_addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("hbnbd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
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
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
