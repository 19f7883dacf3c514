//! Bounded multi-consumer event queue.

use std::sync::Arc;

use domain::UserEvent;
use tokio::sync::{Mutex, mpsc};

use crate::{ProjectionError, Result};

/// A bounded queue that hands each event to exactly one consumer.
///
/// Sending waits while the queue is full. Receiving waits while it is empty
/// and still open. Once every [`EventSender`] is dropped, consumers drain
/// what is left and then see `None`.
pub struct EventQueue;

impl EventQueue {
    /// Creates a queue holding at most `capacity` undelivered events.
    pub fn bounded(capacity: usize) -> Result<(EventSender, EventReceiver)> {
        if capacity == 0 {
            return Err(ProjectionError::InvalidConfig(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        let (tx, rx) = mpsc::channel(capacity);
        Ok((
            EventSender { tx },
            EventReceiver {
                rx: Arc::new(Mutex::new(rx)),
            },
        ))
    }
}

/// Producer side of an [`EventQueue`].
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<UserEvent>,
}

impl EventSender {
    /// Enqueues an event, waiting for space if the queue is full.
    pub async fn send(&self, event: UserEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| ProjectionError::QueueClosed)
    }

    /// Returns true once the consumer side has been closed.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side of an [`EventQueue`], shared by all workers.
///
/// Clones share one underlying receiver; each queued event is returned by
/// exactly one `recv` call across all clones.
#[derive(Clone)]
pub struct EventReceiver {
    rx: Arc<Mutex<mpsc::Receiver<UserEvent>>>,
}

impl EventReceiver {
    /// Takes the next event, or `None` once the queue is closed and empty.
    ///
    /// Cancel safe: if the future is dropped before completing, no event is
    /// lost.
    pub async fn recv(&self) -> Option<UserEvent> {
        self.rx.lock().await.recv().await
    }

    /// Stops accepting new events and removes everything still queued.
    ///
    /// Producers blocked on a full queue fail with
    /// [`ProjectionError::QueueClosed`] rather than hanging.
    pub async fn close_and_drain(&self) -> Vec<UserEvent> {
        let mut rx = self.rx.lock().await;
        rx.close();
        let mut remaining = Vec::new();
        while let Some(event) = rx.recv().await {
            remaining.push(event);
        }
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::BadgeColour;

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            EventQueue::bounded(0),
            Err(ProjectionError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_items_delivered_then_none_after_close() {
        let (tx, rx) = EventQueue::bounded(4).unwrap();
        tx.send(UserEvent::account_created("u1")).await.unwrap();
        tx.send(UserEvent::account_created("u2")).await.unwrap();
        drop(tx);

        assert_eq!(rx.recv().await, Some(UserEvent::account_created("u1")));
        assert_eq!(rx.recv().await, Some(UserEvent::account_created("u2")));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_clones_share_one_queue() {
        let (tx, rx1) = EventQueue::bounded(4).unwrap();
        let rx2 = rx1.clone();
        tx.send(UserEvent::badge_gained("u1", BadgeColour::Red))
            .await
            .unwrap();
        tx.send(UserEvent::badge_lost("u1", BadgeColour::Red))
            .await
            .unwrap();
        drop(tx);

        let first = rx1.recv().await;
        let second = rx2.recv().await;
        assert!(first.is_some() && second.is_some());
        assert_ne!(first, second);
        assert_eq!(rx1.recv().await, None);
        assert_eq!(rx2.recv().await, None);
    }

    #[tokio::test]
    async fn test_close_and_drain_returns_leftovers_and_rejects_sends() {
        let (tx, rx) = EventQueue::bounded(4).unwrap();
        tx.send(UserEvent::account_created("u1")).await.unwrap();
        tx.send(UserEvent::account_created("u2")).await.unwrap();

        let remaining = rx.close_and_drain().await;

        assert_eq!(remaining.len(), 2);
        assert!(tx.is_closed());
        assert!(matches!(
            tx.send(UserEvent::account_created("u3")).await,
            Err(ProjectionError::QueueClosed)
        ));
    }
}
