//! Read-only view of the user projection.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use common::UserId;
use domain::{BadgeCount, BadgeStatus, User};
use projections::UsersView;
use serde::Serialize;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub users: UsersView,
}

// -- Response types --

/// One user as rendered to callers, with the derived badge tier.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub badge_count: BadgeCount,
    pub badge_status: BadgeStatus,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let badge_status = user.badge_status();
        Self {
            id: user.id.to_string(),
            full_name: user.full_name,
            email: user.email,
            badge_count: user.badge_count,
            badge_status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

impl UsersResponse {
    /// Builds the response from a projection snapshot. User order is
    /// unspecified.
    pub fn from_snapshot(snapshot: HashMap<UserId, User>) -> Self {
        Self {
            users: snapshot.into_values().map(UserResponse::from).collect(),
        }
    }
}

// -- Handlers --

/// GET /api/events — every user in the projection with their badge tier.
///
/// The body is fully encoded before the status line is chosen, so an
/// encoding failure is reported as a 500 rather than a truncated 200.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    metrics::counter!("http_requests_total", "route" => "/api/events").increment(1);

    let snapshot = state.users.snapshot().await;
    let response = UsersResponse::from_snapshot(snapshot);
    tracing::debug!(users = response.users.len(), "rendering user projection");

    let body = serde_json::to_vec(&response)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
