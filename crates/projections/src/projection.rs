//! The seam between the worker pool and whatever it feeds.

use async_trait::async_trait;
use domain::UserEvent;

use crate::Result;

/// How far a projection has got through the feed.
///
/// Counts every event the projection accepted, including kinds it does not
/// recognize and therefore ignores. Rejected events are not counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionPosition {
    pub events_processed: u64,
}

impl ProjectionPosition {
    /// Records one accepted event.
    pub fn advance(&mut self) {
        self.events_processed += 1;
    }
}

/// Something a [`WorkerPool`](crate::WorkerPool) can feed events into.
///
/// The pool shares one instance between all of its workers, so `handle` is
/// called from several tasks at once and must be safe under that. Each call
/// sees one event; there is no ordering between calls from different
/// workers.
///
/// An `Err` from `handle` marks that single event as failed. The worker logs
/// it and moves on to the next event, so an implementation must leave its
/// state untouched when it rejects an event.
#[async_trait]
pub trait Projection: Send + Sync {
    /// Name used in worker log spans.
    fn name(&self) -> &'static str;

    /// Folds one event into the projection.
    async fn handle(&self, event: &UserEvent) -> Result<()>;

    async fn position(&self) -> ProjectionPosition;
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::UsersView;
    use domain::BadgeColour;

    #[test]
    fn advance_counts_in_place() {
        let mut position = ProjectionPosition::default();
        position.advance();
        position.advance();
        assert_eq!(position.events_processed, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn handle_is_safe_from_many_tasks_through_a_shared_handle() {
        let projection: Arc<dyn Projection> = Arc::new(UsersView::new());

        let tasks: Vec<_> = (0..6)
            .map(|task| {
                let projection = Arc::clone(&projection);
                tokio::spawn(async move {
                    for i in 0..100 {
                        let user = format!("u{}", (task + i) % 4);
                        projection
                            .handle(&UserEvent::badge_gained(user, BadgeColour::Red))
                            .await
                            .unwrap();
                    }
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(projection.position().await.events_processed, 600);
    }

    #[tokio::test]
    async fn unrecognized_kinds_advance_but_rejections_do_not() {
        let view = UsersView::new();
        let projection: &dyn Projection = &view;

        projection.handle(&UserEvent::Unrecognized).await.unwrap();
        projection.handle(&UserEvent::Unrecognized).await.unwrap();
        assert!(
            projection
                .handle(&UserEvent::account_created(""))
                .await
                .is_err()
        );

        assert_eq!(projection.position().await.events_processed, 2);
        assert_eq!(view.user_count().await, 0);
    }
}
