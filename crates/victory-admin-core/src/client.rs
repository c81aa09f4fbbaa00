// ── Resource stream client ──
//
// One long-lived server-streaming call per resource kind per generation.
// Every inbound message replaces the resource's snapshot wholesale. The
// stream is never retried: when it ends or fails, the last snapshot and
// status stay as they are until the next connect.

use std::marker::PhantomData;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::handle::{ConnectionHandle, HandleGeneration};
use crate::model::StreamStatus;
use crate::reporter::{LifecycleReporter, StatusObserver};
use crate::resource::Resource;
use crate::store::SnapshotStore;

/// How a client's run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// No handle was attached; no stream was opened.
    Idle,
    /// The broker closed the stream cleanly.
    Completed { messages: u64 },
    /// The stream failed to open or broke mid-way.
    Failed { messages: u64, reason: String },
    /// A newer generation took over; the stream was abandoned.
    Superseded { messages: u64 },
}

/// Streams one resource kind against one handle.
pub struct ResourceStreamClient<R: Resource> {
    target: Option<(ConnectionHandle, R::Request)>,
    reporter: LifecycleReporter,
    store: Arc<SnapshotStore>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceStreamClient<R> {
    /// Client bound to `handle`; it will open one stream with `request`.
    pub fn attached(
        handle: ConnectionHandle,
        request: R::Request,
        observer: Arc<dyn StatusObserver>,
        store: Arc<SnapshotStore>,
    ) -> Self {
        let reporter = LifecycleReporter::new(R::KIND, handle.generation(), observer);
        Self {
            target: Some((handle, request)),
            reporter,
            store,
            _resource: PhantomData,
        }
    }

    /// Client with no handle. Running it only reports `Idle`.
    pub fn detached(
        generation: HandleGeneration,
        observer: Arc<dyn StatusObserver>,
        store: Arc<SnapshotStore>,
    ) -> Self {
        Self {
            target: None,
            reporter: LifecycleReporter::new(R::KIND, generation, observer),
            store,
            _resource: PhantomData,
        }
    }

    /// Drive the stream until it ends, fails, or `cancel` fires.
    pub async fn run(mut self, cancel: CancellationToken) -> StreamOutcome {
        let kind = R::KIND;
        let Some((handle, request)) = self.target.take() else {
            self.reporter.report(StreamStatus::Idle);
            return StreamOutcome::Idle;
        };
        let generation = handle.generation();

        self.reporter.report(StreamStatus::Connecting);
        debug!(%kind, %generation, url = %handle.endpoint(), "opening stream");

        let mut stream = R::open(handle.transport(), request);
        let slot = R::slot(&self.store);
        let mut messages: u64 = 0;

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(%kind, %generation, messages, "stream cancelled");
                    return StreamOutcome::Superseded { messages };
                }
                item = stream.next() => match item {
                    Some(Ok(message)) => {
                        let records = R::decode(message);
                        let count = records.len();
                        if !slot.replace(generation, records) {
                            debug!(%kind, %generation, "dropping message from superseded stream");
                            return StreamOutcome::Superseded { messages };
                        }
                        messages += 1;
                        debug!(%kind, %generation, records = count, "snapshot replaced");
                        self.reporter.report(StreamStatus::Streaming);
                    }
                    Some(Err(e)) => {
                        if e.is_unimplemented() {
                            warn!(%kind, %generation, "broker does not serve the admin service");
                        } else {
                            warn!(%kind, %generation, error = %e, "stream failed");
                        }
                        return StreamOutcome::Failed {
                            messages,
                            reason: e.to_string(),
                        };
                    }
                    None => {
                        info!(%kind, %generation, messages, "stream ended");
                        return StreamOutcome::Completed { messages };
                    }
                },
            }
        }
    }
}
