// ── Domain model ──
//
// Canonical record types for each monitored resource kind, plus the
// tri-state stream status shared by every layer above the transport.

mod adapter;
mod channel;
mod status;

pub use adapter::Adapter;
pub use channel::Channel;
pub use status::{ResourceKind, StreamStatus};
