//! WZ String Cache - game-data string lookups for the admin tools
//!
//! Serves id-to-name and id-to-description lookups over HTTP from a
//! once-a-day snapshot of the decoded string archives.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wz_string_cache::api::create_router;
use wz_string_cache::{spawn_refresh_task, AppState, Config};

/// Main entry point for the string cache service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the cache store, restoring any persisted snapshot
/// 4. Start the background refresh task (unless disabled)
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wz_string_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting WZ String Cache");

    let config = Config::from_env();
    info!(
        "Configuration loaded: archives={}, cache_dir={}, ttl={}s, refresh={}s, port={}",
        config
            .archive_base_url
            .clone()
            .unwrap_or_else(|| config.archive_dir.display().to_string()),
        config
            .cache_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "<memory>".to_string()),
        config.cache_ttl,
        config.refresh_interval,
        config.server_port
    );

    let state = AppState::from_config(&config).await;
    info!("Cache store opened (ready: {})", state.resolver.is_ready());

    let refresh_handle = if config.refresh_interval > 0 {
        let handle = spawn_refresh_task(state.loader.clone(), config.refresh_interval);
        info!("Background refresh task started");
        Some(handle)
    } else {
        info!("Background refresh disabled");
        None
    };

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(refresh_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the refresh task and allows graceful shutdown.
async fn shutdown_signal(refresh_handle: Option<tokio::task::JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = refresh_handle {
        handle.abort();
        warn!("Refresh task aborted");
    }
}
