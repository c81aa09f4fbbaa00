// ── Status aggregator ──
//
// Folds per-resource stream statuses into one overall broker status.
// Every code is applied inside `watch::Sender::send_if_modified`, which
// holds the channel's write lock: codes are applied one at a time and
// subscribers never observe a half-applied update. Listeners registered
// through `listen` are fed from inside that same lock, so they receive
// every recomputation in the order it was applied.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use strum::{Display, IntoEnumIterator};
use tokio::sync::{mpsc, watch};
use tracing::{debug, trace};

use crate::handle::HandleGeneration;
use crate::model::{ResourceKind, StreamStatus};
use crate::reporter::StatusObserver;

// ── AggregateStatus ──────────────────────────────────────────────

/// Overall broker status, as exposed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateStatus {
    /// A connect was issued and no resource has delivered data yet.
    pub loading: bool,
    /// At least one resource has delivered data since the last connect.
    pub connected: bool,
    /// Latest status per resource kind. Every kind is always present.
    pub per_resource: BTreeMap<ResourceKind, StreamStatus>,
    /// Generation these statuses belong to.
    pub generation: HandleGeneration,
}

/// Coarse connection phase, suitable for a connect/disconnect control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionPhase {
    Disconnected,
    Connecting,
    Connected,
}

impl AggregateStatus {
    /// Status with no handle attached: every resource idle, nothing loading.
    pub fn detached(generation: HandleGeneration) -> Self {
        Self {
            loading: false,
            connected: false,
            per_resource: ResourceKind::iter()
                .map(|kind| (kind, StreamStatus::Idle))
                .collect(),
            generation,
        }
    }

    pub fn status_of(&self, kind: ResourceKind) -> StreamStatus {
        self.per_resource.get(&kind).copied().unwrap_or_default()
    }

    pub fn phase(&self) -> ConnectionPhase {
        if self.loading {
            ConnectionPhase::Connecting
        } else if self.connected {
            ConnectionPhase::Connected
        } else {
            ConnectionPhase::Disconnected
        }
    }

    fn any_streaming(&self) -> bool {
        self.per_resource.values().any(|s| s.is_up())
    }

    /// Start a new generation. `attached` is false when the handle was
    /// cleared rather than replaced.
    pub(crate) fn begin(&mut self, generation: HandleGeneration, attached: bool) {
        *self = Self::detached(generation);
        self.loading = attached;
    }

    /// Apply one status code. Returns `false` if the code was stale.
    ///
    /// `connected` latches on the first `Streaming` of any resource and
    /// only a new generation clears it. Without any `Streaming` resource
    /// both flags carry over unchanged.
    pub(crate) fn apply(
        &mut self,
        kind: ResourceKind,
        generation: HandleGeneration,
        status: StreamStatus,
    ) -> bool {
        if generation != self.generation {
            return false;
        }

        self.per_resource.insert(kind, status);

        if self.any_streaming() {
            self.loading = false;
            self.connected = true;
        }
        true
    }
}

// ── StatusAggregator ─────────────────────────────────────────────

type Listener = mpsc::UnboundedSender<AggregateStatus>;

/// Owner of the per-resource status map.
///
/// Receives codes from every [`LifecycleReporter`](crate::LifecycleReporter)
/// and republishes the recomputed [`AggregateStatus`] to subscribers.
/// `subscribe` hands out a coalescing view; `listen` delivers every
/// recomputation.
pub struct StatusAggregator {
    state: watch::Sender<AggregateStatus>,
    listeners: Mutex<Vec<Listener>>,
}

impl StatusAggregator {
    pub fn new() -> Self {
        let (state, _) = watch::channel(AggregateStatus::detached(HandleGeneration::INITIAL));
        Self {
            state,
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Subscribe to the latest status. Intermediate values may be skipped.
    pub fn subscribe(&self) -> watch::Receiver<AggregateStatus> {
        self.state.subscribe()
    }

    /// Receive the current status, then every recomputation in order.
    pub fn listen(&self) -> mpsc::UnboundedReceiver<AggregateStatus> {
        let (tx, rx) = mpsc::unbounded_channel();
        // Registered under the watch lock so no recomputation slips between
        // the initial value and the first delivery.
        self.state.send_if_modified(|s| {
            if tx.send(s.clone()).is_ok() {
                self.listeners_mut().push(tx);
            }
            false
        });
        rx
    }

    fn listeners_mut(&self) -> MutexGuard<'_, Vec<Listener>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fan a recomputed status out to listeners, dropping closed ones.
    fn notify(&self, status: &AggregateStatus) {
        self.listeners_mut().retain(|tx| tx.send(status.clone()).is_ok());
    }

    /// The current status (cheap clone).
    pub fn current(&self) -> AggregateStatus {
        self.state.borrow().clone()
    }

    /// Reset for a new handle generation.
    pub(crate) fn begin(&self, generation: HandleGeneration, attached: bool) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.state.send_modify(|s| {
            s.begin(generation, attached);
            self.notify(s);
        });
        debug!(%generation, attached, "aggregate status reset");
    }
}

impl Default for StatusAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusObserver for StatusAggregator {
    fn on_status(&self, kind: ResourceKind, generation: HandleGeneration, status: StreamStatus) {
        let applied = self.state.send_if_modified(|s| {
            let applied = s.apply(kind, generation, status);
            if applied {
                self.notify(s);
            }
            applied
        });

        if !applied {
            trace!(%kind, %generation, %status, "discarding stale status code");
        }
    }
}
