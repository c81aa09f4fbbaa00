// ── Adapter domain type ──

use serde::{Deserialize, Serialize};

/// A transport adapter attached to the broker (TCP server, mock, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adapter {
    /// Adapter name. Unique within a snapshot.
    pub name: String,
    pub live: bool,
    pub description: String,
    /// Free-form stat lines, in broker order.
    pub stats: Vec<String>,
}
