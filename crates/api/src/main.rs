use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use strata_core::{MemoryStore, ObjectStore, Product};
use strata_db::{DbPool, PgObjectStore};
use strata_events::{EventBus, SaveLog};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use strata_api::config::{ServerConfig, StoreBackend};
use strata_api::router::build_app_router;
use strata_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "strata_api=debug,strata_core=debug,strata_events=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    tracing::info!(
        host = %config.host,
        port = %config.port,
        store = config.store_backend.as_str(),
        "Loaded server configuration"
    );

    // --- Store ---
    let (store, pool) = open_store(&config).await?;

    // --- Event bus ---
    let event_bus = Arc::new(EventBus::default());
    let save_log_handle = tokio::spawn(SaveLog::run(event_bus.subscribe()));
    tracing::info!("Event bus created, save log started");

    // --- App state ---
    let state = AppState::new(
        Arc::new(config.clone()),
        store,
        pool,
        Arc::clone(&event_bus),
    );
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    // Dropping the last bus handle closes the channel and ends the save log.
    drop(event_bus);
    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(drain, save_log_handle).await {
        Ok(Ok(logged)) => tracing::info!(logged, "Save log stopped"),
        Ok(Err(e)) => tracing::warn!(error = %e, "Save log task failed"),
        Err(_) => tracing::warn!("Save log did not stop in time"),
    }

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Open the configured store. Postgres also yields the pool for health checks.
async fn open_store(
    config: &ServerConfig,
) -> anyhow::Result<(Arc<dyn ObjectStore>, Option<DbPool>)> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data is lost on shutdown");
            let store: Arc<dyn ObjectStore> = Arc::new(MemoryStore::new());
            Ok((store, None))
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set")?;

            let pool = strata_db::create_pool(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connection pool created");

            strata_db::health_check(&pool)
                .await
                .context("Database health check failed")?;
            tracing::info!("Database health check passed");

            strata_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            let store: Arc<dyn ObjectStore> =
                Arc::new(PgObjectStore::for_payload::<Product>(pool.clone()));
            Ok((store, Some(pool)))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
