// ── Snapshot store ──
//
// One slot per resource kind. The monitor resets every slot on a new
// generation; resource stream clients are the only writers.

use crate::handle::HandleGeneration;
use crate::model::{Adapter, Channel};
use crate::stream::SnapshotStream;

use super::slot::{ResourceSnapshot, SnapshotSlot};

/// Latest listings for every monitored resource.
#[derive(Default)]
pub struct SnapshotStore {
    pub(crate) channels: SnapshotSlot<Channel>,
    pub(crate) adapters: SnapshotSlot<Adapter>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&self, generation: HandleGeneration) {
        self.channels.reset(generation);
        self.adapters.reset(generation);
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn channels_snapshot(&self) -> ResourceSnapshot<Channel> {
        self.channels.current()
    }

    pub fn adapters_snapshot(&self) -> ResourceSnapshot<Adapter> {
        self.adapters.current()
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_channels(&self) -> SnapshotStream<Channel> {
        SnapshotStream::new(self.channels.subscribe())
    }

    pub fn subscribe_adapters(&self) -> SnapshotStream<Adapter> {
        SnapshotStream::new(self.adapters.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_clears_every_slot() {
        let store = SnapshotStore::new();
        let first = HandleGeneration::INITIAL.next();
        store.reset(first);
        store.channels.replace(
            first,
            vec![Channel {
                topic: "t".into(),
                publishers: Vec::new(),
                subscribers: Vec::new(),
                message_count: 1,
            }],
        );
        assert_eq!(store.channels_snapshot().len(), 1);

        let second = first.next();
        store.reset(second);
        assert!(store.channels_snapshot().is_empty());
        assert_eq!(store.adapters_snapshot().generation(), second);
    }
}
