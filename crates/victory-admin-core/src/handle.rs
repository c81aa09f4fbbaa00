// ── Connection handle ──
//
// One logical connection to one broker URL, stamped with the generation
// it was created in. Handles are never mutated: a new connect produces a
// new handle with a higher generation, and anything keyed by an older
// generation is stale.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;
use victory_admin_api::AdminTransport;

/// Identity epoch of a connection handle.
///
/// Generations increase monotonically per [`Monitor`](crate::Monitor).
/// `INITIAL` is the epoch before any connect, when no handle exists.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct HandleGeneration(u64);

impl HandleGeneration {
    pub const INITIAL: Self = Self(0);

    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for HandleGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Shared, read-only reference to the current broker connection.
///
/// Cheaply cloneable. Every resource stream of one generation multiplexes
/// over the same transport.
#[derive(Clone)]
pub struct ConnectionHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    generation: HandleGeneration,
    endpoint: Url,
    transport: Arc<dyn AdminTransport>,
}

impl ConnectionHandle {
    pub(crate) fn new(
        generation: HandleGeneration,
        endpoint: Url,
        transport: Arc<dyn AdminTransport>,
    ) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                generation,
                endpoint,
                transport,
            }),
        }
    }

    pub fn generation(&self) -> HandleGeneration {
        self.inner.generation
    }

    /// The broker admin URL this handle is bound to.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    pub(crate) fn transport(&self) -> &dyn AdminTransport {
        self.inner.transport.as_ref()
    }

    /// Identity comparison. Two handles to the same URL from different
    /// connects are different handles.
    pub fn is_same(&self, other: &Self) -> bool {
        self.generation() == other.generation()
    }
}

impl fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("generation", &self.inner.generation)
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}
