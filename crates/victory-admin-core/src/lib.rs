// victory-admin-core: Stream coordination between victory-admin-api and consumers (CLI).

pub mod aggregator;
pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod handle;
pub mod model;
pub mod monitor;
pub mod reporter;
pub mod resource;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregator::{AggregateStatus, ConnectionPhase, StatusAggregator};
pub use client::{ResourceStreamClient, StreamOutcome};
pub use config::{MonitorConfig, TransportConfig};
pub use error::CoreError;
pub use handle::{ConnectionHandle, HandleGeneration};
pub use monitor::Monitor;
pub use reporter::{LifecycleReporter, StatusObserver};
pub use resource::{Adapters, Channels, Resource};
pub use store::{ResourceSnapshot, SnapshotStore};
pub use stream::SnapshotStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{Adapter, Channel, ResourceKind, StreamStatus};
