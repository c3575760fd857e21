//! Storage-instance registry
//!
//! Every live backend occupies one of [`NodeStorageId::MAX_INSTANCES`] global
//! slots; the slot index is the storage tag packed into node handles. A slot
//! is claimed with a CAS on its `claimed` flag. Publishing the instance and
//! bumping the generation both happen under the slot's write lock, so a weak
//! upgrade sees the pointer and the generation of the same registration.
//!
//! Slot 0 is pre-claimed for the lazily created default instance.

mod node_storage;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{NodeStorageBackend, NodeStorageId};

pub use node_storage::{NodeStorage, WeakNodeStorage};

const DEFAULT_SLOT: usize = 0;

pub(crate) struct RegisteredBackend {
    id: NodeStorageId,
    backend: Box<dyn NodeStorageBackend>,
}

impl Drop for RegisteredBackend {
    fn drop(&mut self) {
        slot(self.id).release();
        debug!(storage_id = self.id.value(), "unregistered node storage backend");
    }
}

struct Slot {
    claimed: AtomicBool,
    generation: AtomicU64,
    instance: RwLock<Weak<RegisteredBackend>>,
}

impl Slot {
    fn new(claimed: bool) -> Self {
        Self {
            claimed: AtomicBool::new(claimed),
            generation: AtomicU64::new(0),
            instance: RwLock::new(Weak::new()),
        }
    }

    fn try_claim(&self) -> bool {
        self.claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    fn install(&self, registered: &Arc<RegisteredBackend>) {
        let mut instance = self.instance.write();
        *instance = Arc::downgrade(registered);
        self.generation.fetch_add(1, Ordering::Release);
    }

    fn release(&self) {
        *self.instance.write() = Weak::new();
        self.claimed.store(false, Ordering::Release);
    }
}

static SLOTS: Lazy<Box<[Slot]>> = Lazy::new(|| {
    (0..NodeStorageId::MAX_INSTANCES)
        .map(|index| Slot::new(index == DEFAULT_SLOT))
        .collect()
});

static DEFAULT_INSTANCE: Lazy<RwLock<Option<NodeStorage>>> = Lazy::new(|| RwLock::new(None));

#[inline]
fn slot(id: NodeStorageId) -> &'static Slot {
    &SLOTS[id.index()]
}

/// Claims the first free slot.
fn claim_any() -> Option<NodeStorageId> {
    SLOTS
        .iter()
        .position(Slot::try_claim)
        .map(NodeStorageId::from_index)
}

/// Publishes `backend` in a slot the caller has claimed.
fn install(id: NodeStorageId, backend: Box<dyn NodeStorageBackend>) -> Arc<RegisteredBackend> {
    let discipline = backend.discipline();
    let registered = Arc::new(RegisteredBackend { id, backend });
    slot(id).install(&registered);
    debug!(
        storage_id = id.value(),
        discipline = discipline.as_str(),
        "registered node storage backend"
    );
    registered
}

/// The process-wide default storage, created on first use as a synchronized
/// reference backend in slot 0.
pub fn default_instance() -> NodeStorage {
    if let Some(storage) = DEFAULT_INSTANCE.read().as_ref() {
        return storage.clone();
    }

    let mut guard = DEFAULT_INSTANCE.write();
    if let Some(storage) = guard.as_ref() {
        return storage.clone();
    }

    let id = NodeStorageId::from_index(DEFAULT_SLOT);
    let backend = Box::new(crate::infrastructure::SyncReferenceBackend::new());
    let storage = NodeStorage::from_registered(install(id, backend));
    debug!(storage_id = id.value(), "created default node storage");
    *guard = Some(storage.clone());
    storage
}

/// Replaces the default instance and returns the previous one, if any.
/// The registry keeps one strong reference to whichever storage is the
/// default.
pub fn set_default_instance(storage: NodeStorage) -> Option<NodeStorage> {
    debug!(storage_id = storage.id().value(), "replacing default node storage");
    DEFAULT_INSTANCE.write().replace(storage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SyncReferenceBackend;

    #[test]
    fn test_default_instance_is_stable() {
        let a = default_instance();
        let b = default_instance();
        assert!(a.ptr_eq(&b));
        assert!(a.ref_count() >= 3);
    }

    #[test]
    fn test_slot_release_clears_instance() {
        let storage = NodeStorage::register_backend_at(1001, SyncReferenceBackend::new()).unwrap();
        let id = storage.id();
        assert!(slot(id).claimed.load(Ordering::Acquire));

        drop(storage);
        assert!(!slot(id).claimed.load(Ordering::Acquire));
        assert!(slot(id).instance.read().upgrade().is_none());
    }
}
