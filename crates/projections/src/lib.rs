//! Concurrent event-processing engine for the user badge projection.
//!
//! This crate provides:
//! - [`Projection`] trait for folding events into a read model
//! - [`UsersView`], the mutex-guarded user id → user record projection
//! - [`EventQueue`], a bounded multi-consumer queue of events
//! - [`EventSource`], which feeds a sequence of events into the queue
//! - [`WorkerPool`], a fixed set of workers applying queued events to a projection

pub mod error;
pub mod pool;
pub mod projection;
pub mod queue;
pub mod source;
pub mod views;

pub use error::{ProjectionError, Result};
pub use pool::{PoolConfig, PoolHandle, PoolReport, RunSummary, WorkerPool};
pub use projection::{Projection, ProjectionPosition};
pub use queue::{EventQueue, EventReceiver, EventSender};
pub use source::{EventSource, SourceReport};
pub use views::UsersView;
