//! Per-kind storage and the shared lookup-or-insert protocol
//!
//! A [`NodeTypeStorage`] wraps one [`BiDirMap`] and decides how it is
//! guarded. The helpers below are the only code that touches a map through
//! a storage, so both disciplines run the exact same algorithm.

use std::cell::RefCell;
use std::sync::Arc;

use parking_lot::RwLock;

use super::bidir_map::BiDirMap;
use crate::domain::InternedEntry;

/// Guarded access to one interning map.
pub trait NodeTypeStorage {
    type Entry: InternedEntry;

    fn with_shared<R>(&self, f: impl FnOnce(&BiDirMap<Self::Entry>) -> R) -> R;

    fn with_exclusive<R>(&self, f: impl FnOnce(&mut BiDirMap<Self::Entry>) -> R) -> R;
}

type ViewOf<'a, S> = <<S as NodeTypeStorage>::Entry as InternedEntry>::View<'a>;

/// Shared-mutex discipline.
pub struct SyncNodeTypeStorage<E: InternedEntry> {
    mapping: RwLock<BiDirMap<E>>,
}

impl<E: InternedEntry> SyncNodeTypeStorage<E> {
    pub fn new(mapping: BiDirMap<E>) -> Self {
        Self {
            mapping: RwLock::new(mapping),
        }
    }
}

impl<E: InternedEntry> NodeTypeStorage for SyncNodeTypeStorage<E> {
    type Entry = E;

    fn with_shared<R>(&self, f: impl FnOnce(&BiDirMap<E>) -> R) -> R {
        f(&self.mapping.read())
    }

    fn with_exclusive<R>(&self, f: impl FnOnce(&mut BiDirMap<E>) -> R) -> R {
        f(&mut self.mapping.write())
    }
}

/// Single-threaded discipline: no locking, `!Sync`.
pub struct UnsyncNodeTypeStorage<E: InternedEntry> {
    mapping: RefCell<BiDirMap<E>>,
}

impl<E: InternedEntry> UnsyncNodeTypeStorage<E> {
    pub fn new(mapping: BiDirMap<E>) -> Self {
        Self {
            mapping: RefCell::new(mapping),
        }
    }
}

impl<E: InternedEntry> NodeTypeStorage for UnsyncNodeTypeStorage<E> {
    type Entry = E;

    fn with_shared<R>(&self, f: impl FnOnce(&BiDirMap<E>) -> R) -> R {
        f(&self.mapping.borrow())
    }

    fn with_exclusive<R>(&self, f: impl FnOnce(&mut BiDirMap<E>) -> R) -> R {
        f(&mut self.mapping.borrow_mut())
    }
}

/// Picks the storage type for every map of a backend.
pub trait StorageFamily: 'static {
    type Storage<E: InternedEntry>: NodeTypeStorage<Entry = E>;

    fn storage<E: InternedEntry>(mapping: BiDirMap<E>) -> Self::Storage<E>;
}

pub struct SyncFamily;

impl StorageFamily for SyncFamily {
    type Storage<E: InternedEntry> = SyncNodeTypeStorage<E>;

    fn storage<E: InternedEntry>(mapping: BiDirMap<E>) -> SyncNodeTypeStorage<E> {
        SyncNodeTypeStorage::new(mapping)
    }
}

pub struct UnsyncFamily;

impl StorageFamily for UnsyncFamily {
    type Storage<E: InternedEntry> = UnsyncNodeTypeStorage<E>;

    fn storage<E: InternedEntry>(mapping: BiDirMap<E>) -> UnsyncNodeTypeStorage<E> {
        UnsyncNodeTypeStorage::new(mapping)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Protocol
// ═══════════════════════════════════════════════════════════════════════════

/// Returns the id of `view`, interning it if needed, and whether it was
/// inserted by this call.
///
/// Looks up under shared access first. On a miss it takes exclusive access
/// and checks again before inserting: another writer may have interned the
/// same view between the two acquisitions.
pub fn lookup_or_insert<S: NodeTypeStorage>(storage: &S, view: ViewOf<'_, S>) -> (u64, bool) {
    let id = storage.with_shared(|mapping| mapping.lookup_id(view));
    if id != 0 {
        return (id, false);
    }

    storage.with_exclusive(|mapping| {
        let id = mapping.lookup_id(view);
        if id != 0 {
            return (id, false);
        }
        (mapping.insert_assume_not_present(view), true)
    })
}

/// Id of `view`, `0` when absent. Never inserts.
pub fn lookup<S: NodeTypeStorage>(storage: &S, view: ViewOf<'_, S>) -> u64 {
    storage.with_shared(|mapping| mapping.lookup_id(view))
}

pub fn resolve<S: NodeTypeStorage>(storage: &S, id: u64) -> Option<Arc<S::Entry>> {
    storage.with_shared(|mapping| mapping.lookup_value(id).cloned())
}

/// `false` when `id` is not live.
pub fn erase<S: NodeTypeStorage>(storage: &S, id: u64) -> bool {
    storage.with_exclusive(|mapping| {
        if mapping.lookup_value(id).is_none() {
            return false;
        }
        mapping.erase_assume_present(id);
        true
    })
}

pub fn len<S: NodeTypeStorage>(storage: &S) -> usize {
    storage.with_shared(BiDirMap::len)
}

pub fn shrink_to_fit<S: NodeTypeStorage>(storage: &S) {
    storage.with_exclusive(BiDirMap::shrink_to_fit)
}
