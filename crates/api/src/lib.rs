//! HTTP query adapter for the badge projection service.
//!
//! Serves the user projection read-only over `GET /api/events`, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use projections::{EventSource, UsersView};
use tower_http::timeout::{RequestBodyTimeoutLayer, TimeoutLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use error::StartupError;
use routes::events::AppState;

/// Creates the Axum application router with all routes and shared state.
///
/// The request body must arrive within the read timeout and the whole
/// request must be answered within the write timeout.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle, config: &Config) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::ops::health))
        .route("/api/events", get(routes::events::list))
        .with_state(state)
        .merge(metrics_router)
        .layer(RequestBodyTimeoutLayer::new(config.read_timeout))
        .layer(write_timeout(config.write_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Requests not answered within `timeout` get a 408.
fn write_timeout(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Builds the event source the worker pool ingests.
///
/// Reads the configured JSON-lines feed when one is set, otherwise falls
/// back to the built-in demo sequence.
pub async fn event_source(config: &Config) -> Result<EventSource, StartupError> {
    let Some(path) = &config.events_file else {
        return Ok(EventSource::fixture());
    };

    let feed = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StartupError::EventFeed {
            path: path.clone(),
            source,
        })?;
    tracing::info!(path = %path.display(), bytes = feed.len(), "loaded event feed");
    Ok(EventSource::from_json_lines(Cursor::new(feed)))
}

/// Creates the application state around a fresh, empty projection.
///
/// Returns the projection separately so the caller can hand it to the
/// worker pool.
pub fn create_default_state() -> (Arc<AppState>, UsersView) {
    let users = UsersView::new();
    let state = Arc::new(AppState {
        users: users.clone(),
    });
    (state, users)
}
