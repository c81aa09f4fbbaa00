// ── Per-resource snapshot slot ──
//
// Holds the most recent listing for one resource. Each inbound message
// replaces the whole listing; nothing is merged.

use std::sync::Arc;

use tokio::sync::watch;

use crate::handle::HandleGeneration;

/// One complete listing as last delivered by a resource stream.
#[derive(Debug)]
pub struct ResourceSnapshot<T> {
    generation: HandleGeneration,
    records: Arc<Vec<T>>,
    sequence: u64,
}

// Manual impl: `T` itself need not be `Clone`.
impl<T> Clone for ResourceSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            records: Arc::clone(&self.records),
            sequence: self.sequence,
        }
    }
}

impl<T> ResourceSnapshot<T> {
    fn empty(generation: HandleGeneration) -> Self {
        Self {
            generation,
            records: Arc::new(Vec::new()),
            sequence: 0,
        }
    }

    pub fn records(&self) -> &Arc<Vec<T>> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Generation of the handle whose stream produced this listing.
    pub fn generation(&self) -> HandleGeneration {
        self.generation
    }

    /// Number of messages applied in this generation. Zero means no
    /// listing has arrived yet, as opposed to an empty listing.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Single-writer, many-reader cell for one resource listing.
pub struct SnapshotSlot<T> {
    sender: watch::Sender<ResourceSnapshot<T>>,
}

impl<T> SnapshotSlot<T> {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(ResourceSnapshot::empty(HandleGeneration::INITIAL));
        Self { sender }
    }

    /// Clear the listing and adopt `generation` as the only accepted writer.
    pub(crate) fn reset(&self, generation: HandleGeneration) {
        self.sender
            .send_modify(|snap| *snap = ResourceSnapshot::empty(generation));
    }

    /// Replace the listing. Returns `false` (and changes nothing) if
    /// `generation` is not the slot's current generation.
    pub(crate) fn replace(&self, generation: HandleGeneration, records: Vec<T>) -> bool {
        self.sender.send_if_modified(move |snap| {
            if snap.generation != generation {
                return false;
            }
            snap.records = Arc::new(records);
            snap.sequence += 1;
            true
        })
    }

    /// The latest listing (cheap clone).
    pub fn current(&self) -> ResourceSnapshot<T> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ResourceSnapshot<T>> {
        self.sender.subscribe()
    }
}

impl<T> Default for SnapshotSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
