use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use sumclip_logging::sumclip_trace;

use crate::catalog::Selection;

/// Identifier of a display handle. Stays meaningful after the handle is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlobId(u64);

impl BlobId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "blob:{}", self.0)
    }
}

/// Display-ready image bytes bound to one slot.
///
/// Not `Clone`: the registry is the only owner, and releasing consumes the value.
#[derive(Debug)]
pub struct BlobHandle {
    id: BlobId,
    slot: Selection,
    bytes: Bytes,
}

impl BlobHandle {
    pub fn id(&self) -> BlobId {
        self.id
    }

    pub fn slot(&self) -> Selection {
        self.slot
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    fn release(self) -> BlobId {
        sumclip_trace!("release {} for {}", self.id, self.slot);
        self.id
    }
}

/// Owns every live [`BlobHandle`].
#[derive(Debug, Default)]
pub struct BlobRegistry {
    next_id: u64,
    live: HashMap<Selection, BlobHandle>,
}

impl BlobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new handle for `slot`, then releases every handle it supersedes.
    ///
    /// Returns the new id and the released ids in release order. The previous
    /// handle of the same slot (if any) comes first, followed by handles of other
    /// slots that were on screen before this one.
    pub fn publish(&mut self, slot: Selection, bytes: Bytes) -> (BlobId, Vec<BlobId>) {
        self.next_id += 1;
        let id = BlobId(self.next_id);
        sumclip_trace!("publish {} for {} ({} bytes)", id, slot, bytes.len());

        let previous = self.live.insert(slot, BlobHandle { id, slot, bytes });

        let mut released = Vec::new();
        if let Some(handle) = previous {
            released.push(handle.release());
        }
        let mut others: Vec<Selection> =
            self.live.keys().filter(|key| **key != slot).copied().collect();
        others.sort();
        for key in others {
            if let Some(handle) = self.live.remove(&key) {
                released.push(handle.release());
            }
        }
        (id, released)
    }

    pub fn current_for(&self, slot: Selection) -> Option<&BlobHandle> {
        self.live.get(&slot)
    }

    pub fn get(&self, id: BlobId) -> Option<&BlobHandle> {
        self.live.values().find(|handle| handle.id == id)
    }

    /// A handle is live from `publish` until it is superseded or torn down.
    pub fn is_live(&self, id: BlobId) -> bool {
        self.get(id).is_some()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Releases every outstanding handle. Ids are returned in ascending order.
    pub fn teardown(&mut self) -> Vec<BlobId> {
        let mut handles: Vec<BlobHandle> = self.live.drain().map(|(_, handle)| handle).collect();
        handles.sort_by_key(|handle| handle.id);
        handles.into_iter().map(BlobHandle::release).collect()
    }
}
