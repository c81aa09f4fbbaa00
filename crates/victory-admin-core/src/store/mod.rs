// ── Reactive snapshot store ──
//
// Latest-listing storage per resource with push-based change notification.

mod slot;
mod snapshot_store;

pub use slot::{ResourceSnapshot, SnapshotSlot};
pub use snapshot_store::SnapshotStore;
