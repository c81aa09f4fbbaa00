// ── Monitor ──
//
// Owns the current connection handle and restarts every resource stream
// whenever it changes. Each handle change opens a new generation: the old
// generation's tasks are cancelled, snapshots are cleared, and status is
// reset, so nothing from a superseded handle can reach current state.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use victory_admin_api::transport::parse_endpoint;
use victory_admin_api::{Connector, GrpcConnector};

use crate::aggregator::{AggregateStatus, StatusAggregator};
use crate::client::{ResourceStreamClient, StreamOutcome};
use crate::config::MonitorConfig;
use crate::error::CoreError;
use crate::handle::{ConnectionHandle, HandleGeneration};
use crate::model::{Adapter, Channel};
use crate::reporter::StatusObserver;
use crate::resource::{Adapters, Channels, Resource};
use crate::store::SnapshotStore;
use crate::stream::SnapshotStream;

// ── Monitor ──────────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. Holds at most one current
/// [`ConnectionHandle`] and one stream task per resource kind for it.
#[derive(Clone)]
pub struct Monitor {
    inner: Arc<MonitorInner>,
}

struct MonitorInner {
    config: MonitorConfig,
    connector: Arc<dyn Connector>,
    store: Arc<SnapshotStore>,
    aggregator: Arc<StatusAggregator>,
    session: Mutex<Session>,
}

/// State owned by the current generation.
struct Session {
    generation: HandleGeneration,
    handle: Option<ConnectionHandle>,
    cancel: CancellationToken,
    tasks: Vec<JoinHandle<StreamOutcome>>,
}

impl Monitor {
    /// Create a monitor that connects over gRPC. Does NOT connect --
    /// call [`connect()`](Self::connect) to start streaming.
    pub fn new(config: MonitorConfig) -> Self {
        let connector = Arc::new(GrpcConnector::new(config.transport.clone()));
        Self::with_connector(config, connector)
    }

    /// Create a monitor over a custom transport.
    pub fn with_connector(config: MonitorConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            inner: Arc::new(MonitorInner {
                config,
                connector,
                store: Arc::new(SnapshotStore::new()),
                aggregator: Arc::new(StatusAggregator::new()),
                session: Mutex::new(Session {
                    generation: HandleGeneration::INITIAL,
                    handle: None,
                    cancel: CancellationToken::new(),
                    tasks: Vec::new(),
                }),
            }),
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.inner.config
    }

    /// Access the underlying SnapshotStore.
    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.inner.store
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the broker admin service at `url`.
    ///
    /// The new handle supersedes any previous one and every resource
    /// stream restarts against it. The call returns once the streams are
    /// spawned; it does not wait for the broker. An invalid `url` fails
    /// with [`CoreError::InvalidEndpoint`] and leaves the current handle,
    /// streams, and status untouched.
    pub async fn connect(&self, url: &str) -> Result<ConnectionHandle, CoreError> {
        let endpoint = parse_endpoint(url)?;
        let transport = self.inner.connector.connect(&endpoint)?;

        let mut session = self.inner.session.lock().await;
        let generation = session.generation.next();
        let handle = ConnectionHandle::new(generation, endpoint, transport);

        info!(%generation, url = %handle.endpoint(), "connecting to broker");
        self.attach(&mut session, generation, Some(handle.clone()));
        Ok(handle)
    }

    /// Clear the handle and stop every stream.
    ///
    /// Every resource returns to `Idle`; `loading` and `connected` reset.
    pub async fn shutdown(&self) {
        let mut session = self.inner.session.lock().await;
        if session.handle.is_none() {
            debug!("shutdown with no handle attached");
        }
        let generation = session.generation.next();
        self.attach(&mut session, generation, None);
        info!(%generation, "monitor detached");
    }

    /// The current handle, if any.
    pub async fn current_handle(&self) -> Option<ConnectionHandle> {
        self.inner.session.lock().await.handle.clone()
    }

    /// Swap in a new generation. Must be called with the session lock held.
    fn attach(
        &self,
        session: &mut Session,
        generation: HandleGeneration,
        handle: Option<ConnectionHandle>,
    ) {
        session.cancel.cancel();
        if let Some(old) = session.handle.take() {
            debug!(generation = %old.generation(), "superseding handle");
        }
        // Their writes are rejected by generation from here on.
        for task in session.tasks.drain(..) {
            task.abort();
        }

        let store = &self.inner.store;
        store.reset(generation);
        self.inner.aggregator.begin(generation, handle.is_some());

        let cancel = CancellationToken::new();
        session.tasks = vec![
            self.spawn_client::<Channels>(generation, handle.as_ref(), cancel.clone()),
            self.spawn_client::<Adapters>(generation, handle.as_ref(), cancel.clone()),
        ];
        session.generation = generation;
        session.handle = handle;
        session.cancel = cancel;
    }

    fn spawn_client<R: Resource>(
        &self,
        generation: HandleGeneration,
        handle: Option<&ConnectionHandle>,
        cancel: CancellationToken,
    ) -> JoinHandle<StreamOutcome> {
        let observer: Arc<dyn StatusObserver> = self.inner.aggregator.clone();
        let store = Arc::clone(&self.inner.store);

        let client = match handle {
            Some(handle) => ResourceStreamClient::<R>::attached(
                handle.clone(),
                R::request(&self.inner.config),
                observer,
                store,
            ),
            None => ResourceStreamClient::<R>::detached(generation, observer, store),
        };
        tokio::spawn(client.run(cancel))
    }

    // ── Status ───────────────────────────────────────────────────

    /// Subscribe to aggregate status changes.
    pub fn status(&self) -> watch::Receiver<AggregateStatus> {
        self.inner.aggregator.subscribe()
    }

    /// The aggregate status right now.
    pub fn status_snapshot(&self) -> AggregateStatus {
        self.inner.aggregator.current()
    }

    /// Invoke `f` with the current status and then once per recomputation,
    /// in order, until the monitor is dropped or the returned task is
    /// aborted. Unlike [`status()`](Self::status), nothing is skipped.
    pub fn on_status<F>(&self, mut f: F) -> JoinHandle<()>
    where
        F: FnMut(&AggregateStatus) + Send + 'static,
    {
        let mut rx = self.inner.aggregator.listen();
        tokio::spawn(async move {
            while let Some(status) = rx.recv().await {
                f(&status);
            }
        })
    }

    // ── Entity streams ───────────────────────────────────────────

    pub fn channels(&self) -> SnapshotStream<Channel> {
        self.inner.store.subscribe_channels()
    }

    pub fn adapters(&self) -> SnapshotStream<Adapter> {
        self.inner.store.subscribe_adapters()
    }
}

impl Drop for MonitorInner {
    fn drop(&mut self) {
        let session = self.session.get_mut();
        session.cancel.cancel();
        for task in session.tasks.drain(..) {
            task.abort();
        }
    }
}
