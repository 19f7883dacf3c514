//! Worker pool applying queued events to a projection.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::projection::Projection;
use crate::queue::{EventQueue, EventReceiver};
use crate::source::{EventSource, SourceReport};
use crate::{ProjectionError, Result};

/// Sizing for a [`WorkerPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of concurrent workers.
    pub workers: usize,
    /// Capacity of the queue between the source and the workers.
    pub queue_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: 3,
            queue_capacity: 3,
        }
    }
}

/// Per-pool event accounting.
///
/// Every event taken off the queue ends up in exactly one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolReport {
    /// Events the projection accepted.
    pub applied: u64,
    /// Events the projection rejected.
    pub failed: u64,
    /// Events still queued at shutdown and discarded unapplied.
    pub dropped: u64,
}

impl PoolReport {
    /// Total events accounted for.
    pub fn total(&self) -> u64 {
        self.applied + self.failed + self.dropped
    }

    fn merge(self, other: PoolReport) -> PoolReport {
        PoolReport {
            applied: self.applied + other.applied,
            failed: self.failed + other.failed,
            dropped: self.dropped + other.dropped,
        }
    }
}

/// Result of running a source through a pool to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub source: SourceReport,
    pub pool: PoolReport,
}

/// A fixed set of workers sharing one event queue.
///
/// Each worker repeatedly takes the next event off the queue and hands it to
/// the projection. Workers hold no state of their own; the projection is
/// responsible for applying concurrent events safely.
///
/// With more than one worker, events are not applied in emission order, not
/// even for a single user. Badge counts still converge to the same totals
/// because increments commute, but when two `AccountUpdated` events for the
/// same field race, either value may win.
pub struct WorkerPool {
    config: PoolConfig,
    projection: Arc<dyn Projection>,
}

impl WorkerPool {
    /// Creates a pool feeding the given projection.
    pub fn new(config: PoolConfig, projection: Arc<dyn Projection>) -> Result<Self> {
        if config.workers == 0 {
            return Err(ProjectionError::InvalidConfig(
                "worker pool needs at least one worker".to_string(),
            ));
        }
        if config.queue_capacity == 0 {
            return Err(ProjectionError::InvalidConfig(
                "queue capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self { config, projection })
    }

    /// Spawns the workers on `receiver` and returns a handle to join them.
    ///
    /// Workers exit when the queue is closed and drained, or when `shutdown`
    /// becomes `true`. A shutdown never interrupts an event that is already
    /// being applied.
    #[tracing::instrument(skip_all, fields(projection = self.projection.name(), workers = self.config.workers))]
    pub fn start(&self, receiver: EventReceiver, shutdown: watch::Receiver<bool>) -> PoolHandle {
        let workers = (0..self.config.workers)
            .map(|worker_id| {
                tokio::spawn(run_worker(
                    worker_id,
                    receiver.clone(),
                    Arc::clone(&self.projection),
                    shutdown.clone(),
                ))
            })
            .collect();

        tracing::info!("worker pool started");
        PoolHandle { workers, receiver }
    }

    /// Runs `source` through the pool until the source is exhausted and the
    /// queue drained, or until `shutdown` becomes `true`.
    pub async fn run(
        &self,
        source: EventSource,
        shutdown: watch::Receiver<bool>,
    ) -> Result<RunSummary> {
        let (sender, receiver) = EventQueue::bounded(self.config.queue_capacity)?;
        let handle = self.start(receiver, shutdown);
        let producer = tokio::spawn(source.run(sender));

        let pool = handle.join().await?;
        let source = producer
            .await
            .map_err(|e| ProjectionError::Worker(e.to_string()))?;

        tracing::info!(
            delivered = source.delivered,
            applied = pool.applied,
            failed = pool.failed,
            dropped = pool.dropped,
            "event processing finished"
        );
        Ok(RunSummary { source, pool })
    }
}

/// Handle to a running [`WorkerPool`].
pub struct PoolHandle {
    workers: Vec<JoinHandle<PoolReport>>,
    receiver: EventReceiver,
}

impl PoolHandle {
    /// Waits for every worker to exit, then closes the queue and discards
    /// whatever is left in it.
    ///
    /// Discarded events are logged and counted as dropped.
    pub async fn join(self) -> Result<PoolReport> {
        let mut report = PoolReport::default();
        let mut failure = None;

        for worker in self.workers {
            match worker.await {
                Ok(worker_report) => report = report.merge(worker_report),
                Err(e) => {
                    tracing::error!(error = %e, "worker task failed");
                    failure.get_or_insert(e.to_string());
                }
            }
        }

        let leftovers = self.receiver.close_and_drain().await;
        if !leftovers.is_empty() {
            for event in &leftovers {
                tracing::debug!(
                    event_type = event.event_type(),
                    user_id = ?event.user_id(),
                    "dropping unprocessed event"
                );
            }
            tracing::warn!(dropped = leftovers.len(), "dropped queued events on shutdown");
            metrics::counter!("worker_pool_events_dropped").increment(leftovers.len() as u64);
            report.dropped += leftovers.len() as u64;
        }

        match failure {
            Some(message) => Err(ProjectionError::Worker(message)),
            None => Ok(report),
        }
    }
}

#[tracing::instrument(skip(receiver, projection, shutdown))]
async fn run_worker(
    worker_id: usize,
    receiver: EventReceiver,
    projection: Arc<dyn Projection>,
    mut shutdown: watch::Receiver<bool>,
) -> PoolReport {
    let mut report = PoolReport::default();

    loop {
        let event = tokio::select! {
            biased;
            () = stop_requested(&mut shutdown) => {
                tracing::debug!("worker stopping on shutdown");
                break;
            }
            event = receiver.recv() => match event {
                Some(event) => event,
                None => break,
            },
        };

        match projection.handle(&event).await {
            Ok(()) => {
                tracing::debug!(event_type = event.event_type(), "event applied");
                report.applied += 1;
            }
            Err(error) => {
                tracing::warn!(
                    event_type = event.event_type(),
                    user_id = ?event.user_id(),
                    %error,
                    "failed to apply event"
                );
                report.failed += 1;
            }
        }
    }

    report
}

/// Resolves once a stop has been requested. If the signal's sender goes away
/// without requesting a stop, never resolves, leaving the worker to run until
/// the queue closes.
async fn stop_requested(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        std::future::pending::<()>().await;
    }
}
