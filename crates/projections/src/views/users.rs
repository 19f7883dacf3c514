//! Users read model — user id to current user record.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::UserId;
use domain::{BadgeColour, User, UserEvent};
use tokio::sync::Mutex;

use crate::projection::{Projection, ProjectionPosition};
use crate::{ProjectionError, Result};

/// Internal state for the users view.
#[derive(Default)]
struct UsersState {
    users: HashMap<UserId, User>,
    position: ProjectionPosition,
}

/// Read model view mapping each user id to that user's current state.
///
/// A single mutex guards the whole map, so every event's read-modify-write
/// of one user record happens as one critical section. Callers only ever
/// see cloned records; the live map never leaves the lock.
///
/// Records are created by the first event that mentions a user, whatever
/// its kind, and are never removed.
#[derive(Clone, Default)]
pub struct UsersView {
    state: Arc<Mutex<UsersState>>,
}

impl UsersView {
    /// Creates a new empty users view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event to the projection.
    ///
    /// Unrecognized event kinds are ignored. The only rejected input is a
    /// recognized event with a blank user id; it leaves the projection
    /// untouched.
    pub async fn apply(&self, event: &UserEvent) -> Result<()> {
        if let Err(err) = validate(event) {
            metrics::counter!("projection_events_failed").increment(1);
            return Err(err);
        }

        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        match event {
            UserEvent::AccountCreated(data) => {
                // A badge event may have created the record already; its
                // name, email and badges stay as they are.
                state
                    .users
                    .entry(data.user_id.clone())
                    .or_insert_with(|| User::new(data.user_id.clone()));
            }
            UserEvent::AccountUpdated(data) => {
                state
                    .users
                    .entry(data.user_id.clone())
                    .and_modify(|user| user.update_profile(data.full_name(), data.email()))
                    .or_insert_with(|| {
                        User::with_profile(data.user_id.clone(), data.full_name(), data.email())
                    });
            }
            UserEvent::BadgeGained(data) => {
                let user = state
                    .users
                    .entry(data.user_id.clone())
                    .and_modify(|user| user.badge_count.increment(data.colour))
                    .or_insert_with(|| User::with_badge(data.user_id.clone(), data.colour, 1));
                log_badge_change(user, data.colour, "gained");
            }
            UserEvent::BadgeLost(data) => {
                let user = state
                    .users
                    .entry(data.user_id.clone())
                    .and_modify(|user| user.badge_count.decrement(data.colour))
                    .or_insert_with(|| User::with_badge(data.user_id.clone(), data.colour, -1));
                log_badge_change(user, data.colour, "lost");
            }
            UserEvent::Unrecognized => {
                tracing::debug!("ignoring unrecognized event");
            }
        }

        state.position.advance();
        metrics::counter!("projection_events_applied").increment(1);
        Ok(())
    }

    /// Returns a point-in-time copy of every user record.
    ///
    /// The copy is taken under one lock acquisition, so it is internally
    /// consistent, but other workers may apply further events as soon as it
    /// is returned.
    pub async fn snapshot(&self) -> HashMap<UserId, User> {
        self.state.lock().await.users.clone()
    }

    /// Gets a copy of one user's record.
    pub async fn get_user(&self, user_id: &UserId) -> Option<User> {
        self.state.lock().await.users.get(user_id).cloned()
    }

    /// Returns the number of users in the projection.
    pub async fn user_count(&self) -> usize {
        self.state.lock().await.users.len()
    }
}

fn log_badge_change(user: &User, colour: BadgeColour, change: &'static str) {
    tracing::debug!(
        user_id = %user.id,
        %colour,
        change,
        count = user.badge_count.get(colour),
        tier = %user.badge_status(),
        "badge count changed"
    );
}

fn validate(event: &UserEvent) -> Result<()> {
    match event.user_id() {
        Some(user_id) if user_id.is_blank() => Err(ProjectionError::InvalidEvent {
            event_type: event.event_type(),
            reason: "user id is empty".to_string(),
        }),
        _ => Ok(()),
    }
}

#[async_trait]
impl Projection for UsersView {
    fn name(&self) -> &'static str {
        "UsersView"
    }

    async fn handle(&self, event: &UserEvent) -> Result<()> {
        self.apply(event).await
    }

    async fn position(&self) -> ProjectionPosition {
        self.state.lock().await.position
    }
}
