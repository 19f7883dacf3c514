//! Event source feeding the queue.

use std::io::BufRead;

use domain::{UserEvent, fixture};

use crate::queue::EventSender;

/// Outcome of one pass of an [`EventSource`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceReport {
    /// Events accepted by the queue.
    pub delivered: u64,
    /// True if the source ran out of events; false if the queue was closed
    /// before it did.
    pub exhausted: bool,
}

/// A single-pass producer of user events.
///
/// The underlying iterator may be unbounded; nothing downstream assumes the
/// sequence ends. There is no retry or replay: each event is offered to the
/// queue once.
pub struct EventSource {
    events: Box<dyn Iterator<Item = UserEvent> + Send>,
}

impl EventSource {
    /// Creates a source from any sequence of events.
    pub fn new<I>(events: I) -> Self
    where
        I: IntoIterator<Item = UserEvent>,
        I::IntoIter: Send + 'static,
    {
        Self {
            events: Box::new(events.into_iter()),
        }
    }

    /// Creates a source over the fixed startup event sequence.
    pub fn fixture() -> Self {
        Self::new(fixture::event_sequence())
    }

    /// Creates a source reading one JSON-encoded event per line.
    ///
    /// Lines are decoded lazily as the queue accepts events. Blank lines are
    /// skipped. A line that does not decode is logged and skipped; a read
    /// error ends the source.
    pub fn from_json_lines<R>(reader: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let events = reader
            .lines()
            .map_while(|line| match line {
                Ok(line) => Some(line),
                Err(error) => {
                    tracing::error!(%error, "failed to read event feed");
                    None
                }
            })
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| match UserEvent::from_json(&line) {
                Ok(event) => Some(event),
                Err(error) => {
                    tracing::warn!(line = index + 1, %error, "skipping undecodable event");
                    None
                }
            });
        Self::new(events)
    }

    /// Pushes every event into the queue, then closes the queue by dropping
    /// the sender.
    ///
    /// Waits whenever the queue is full. Stops early if the queue stops
    /// accepting events.
    #[tracing::instrument(skip_all)]
    pub async fn run(self, sender: EventSender) -> SourceReport {
        let mut report = SourceReport::default();

        for event in self.events {
            let event_type = event.event_type();
            if sender.send(event).await.is_err() {
                tracing::warn!(
                    delivered = report.delivered,
                    event_type,
                    "event queue closed before source was exhausted"
                );
                return report;
            }
            report.delivered += 1;
        }

        report.exhausted = true;
        tracing::info!(delivered = report.delivered, "event source exhausted");
        report
    }
}
