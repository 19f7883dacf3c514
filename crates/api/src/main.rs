//! API server entry point.

use std::process::ExitCode;
use std::sync::Arc;

use api::config::Config;
use api::error::StartupError;
use projections::WorkerPool;
use tokio::signal;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

async fn run(config: Config) -> Result<(), StartupError> {
    // 1. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;

    // 2. Create the projection and start ingesting the event feed
    let (state, users) = api::create_default_state();
    let pool = WorkerPool::new(config.pool(), Arc::new(users))?;
    let source = api::event_source(&config).await?;
    let (stop_tx, stop_rx) = watch::channel(false);
    let ingestion = tokio::spawn(async move { pool.run(source, stop_rx).await });

    // 3. Build the application
    let app = api::create_app(state, metrics_handle, &config);

    // 4. Start server
    let addr = config.addr();
    tracing::info!(%addr, workers = config.workers, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    // 5. Stop the workers; applies in flight finish first
    stop_tx.send_replace(true);
    match tokio::time::timeout(config.shutdown_grace, ingestion).await {
        Ok(Ok(Ok(summary))) => tracing::info!(
            delivered = summary.source.delivered,
            applied = summary.pool.applied,
            failed = summary.pool.failed,
            dropped = summary.pool.dropped,
            "event workers stopped"
        ),
        Ok(Ok(Err(e))) => tracing::error!(error = %e, "event processing failed"),
        Ok(Err(e)) => tracing::error!(error = %e, "event processing task failed"),
        Err(_) => tracing::warn!(
            grace_secs = config.shutdown_grace.as_secs(),
            "event workers did not stop within the grace period"
        ),
    }

    tracing::info!("server shut down gracefully");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
