// ── Channel domain type ──

use serde::{Deserialize, Serialize};

/// One pub/sub topic as reported by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Topic path. Unique within a snapshot.
    pub topic: String,
    /// Client identifiers publishing to this topic, in broker order.
    pub publishers: Vec<String>,
    /// Client identifiers subscribed to this topic, in broker order.
    pub subscribers: Vec<String>,
    /// Messages queued on the topic.
    pub message_count: u32,
}
