// ── Stream lifecycle reporter ──
//
// Forwards one resource stream's status transitions to an observer.
// A reporter is owned by exactly one stream task, so codes for one
// resource are emitted sequentially and never concurrently.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::handle::HandleGeneration;
use crate::model::{ResourceKind, StreamStatus};

/// Receives status codes from lifecycle reporters.
///
/// Implemented by [`StatusAggregator`](crate::StatusAggregator); any
/// `Fn(ResourceKind, HandleGeneration, StreamStatus)` closure works too.
pub trait StatusObserver: Send + Sync {
    fn on_status(&self, kind: ResourceKind, generation: HandleGeneration, status: StreamStatus);
}

impl<F> StatusObserver for F
where
    F: Fn(ResourceKind, HandleGeneration, StreamStatus) + Send + Sync,
{
    fn on_status(&self, kind: ResourceKind, generation: HandleGeneration, status: StreamStatus) {
        self(kind, generation, status);
    }
}

/// Per-stream pass-through from lifecycle events to a [`StatusObserver`].
///
/// Only transitions are forwarded: a repeated status (e.g. `Streaming` on
/// every inbound message) is collapsed, and a backwards move is dropped.
pub struct LifecycleReporter {
    kind: ResourceKind,
    generation: HandleGeneration,
    last: Option<StreamStatus>,
    observer: Arc<dyn StatusObserver>,
}

impl LifecycleReporter {
    pub fn new(
        kind: ResourceKind,
        generation: HandleGeneration,
        observer: Arc<dyn StatusObserver>,
    ) -> Self {
        Self {
            kind,
            generation,
            last: None,
            observer,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn generation(&self) -> HandleGeneration {
        self.generation
    }

    /// Last status forwarded, if any.
    pub fn last(&self) -> Option<StreamStatus> {
        self.last
    }

    /// Report a lifecycle event. Returns `true` if a code was emitted.
    pub fn report(&mut self, status: StreamStatus) -> bool {
        if let Some(last) = self.last {
            if status == last {
                return false;
            }
            if status < last {
                trace!(
                    kind = %self.kind,
                    generation = %self.generation,
                    from = %last,
                    to = %status,
                    "ignoring backwards status transition"
                );
                return false;
            }
        }

        self.last = Some(status);
        debug!(
            kind = %self.kind,
            generation = %self.generation,
            status = %status,
            code = status.code(),
            "stream status"
        );
        self.observer.on_status(self.kind, self.generation, status);
        true
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    type Log = Arc<Mutex<Vec<(ResourceKind, HandleGeneration, u8)>>>;

    fn recording_reporter(kind: ResourceKind) -> (LifecycleReporter, Log) {
        let log: Log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let observer = move |k: ResourceKind, g: HandleGeneration, s: StreamStatus| {
            sink.lock().unwrap().push((k, g, s.code()));
        };
        let generation = HandleGeneration::INITIAL.next();
        (LifecycleReporter::new(kind, generation, Arc::new(observer)), log)
    }

    fn codes(log: &Log) -> Vec<u8> {
        log.lock().unwrap().iter().map(|(_, _, c)| *c).collect()
    }

    #[test]
    fn forwards_lifecycle_in_order() {
        let (mut reporter, log) = recording_reporter(ResourceKind::Channels);

        assert!(reporter.report(StreamStatus::Connecting));
        assert!(reporter.report(StreamStatus::Streaming));

        assert_eq!(codes(&log), vec![1, 2]);
        assert_eq!(reporter.last(), Some(StreamStatus::Streaming));
    }

    #[test]
    fn repeated_streaming_is_collapsed() {
        let (mut reporter, log) = recording_reporter(ResourceKind::Adapters);

        reporter.report(StreamStatus::Connecting);
        reporter.report(StreamStatus::Streaming);
        assert!(!reporter.report(StreamStatus::Streaming));
        assert!(!reporter.report(StreamStatus::Streaming));

        assert_eq!(codes(&log), vec![1, 2]);
    }

    #[test]
    fn streaming_never_reverts_to_connecting() {
        let (mut reporter, log) = recording_reporter(ResourceKind::Channels);

        reporter.report(StreamStatus::Connecting);
        reporter.report(StreamStatus::Streaming);
        assert!(!reporter.report(StreamStatus::Connecting));

        assert_eq!(codes(&log), vec![1, 2]);
    }

    #[test]
    fn codes_carry_kind_and_generation() {
        let (mut reporter, log) = recording_reporter(ResourceKind::Adapters);
        reporter.report(StreamStatus::Idle);

        let entries = log.lock().unwrap().clone();
        assert_eq!(
            entries,
            vec![(ResourceKind::Adapters, HandleGeneration::INITIAL.next(), 0)]
        );
    }
}
