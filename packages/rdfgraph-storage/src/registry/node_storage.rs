use std::fmt;
use std::ops::Deref;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::{claim_any, install, slot, RegisteredBackend};
use crate::config::{StorageConfig, Validatable};
use crate::domain::{Discipline, NodeStorageBackend, NodeStorageId};
use crate::error::StorageError;
use crate::infrastructure::{SyncReferenceBackend, UnsyncReferenceBackend};
use crate::metrics::StorageMetrics;
use crate::Result;

/// Strong, reference-counted handle to a registered backend.
///
/// Cloning adds a reference; the backend is destroyed and its slot vacated
/// when the last clone drops.
#[derive(Clone)]
pub struct NodeStorage {
    inner: Arc<RegisteredBackend>,
}

impl NodeStorage {
    pub(super) fn from_registered(inner: Arc<RegisteredBackend>) -> Self {
        Self { inner }
    }

    /// Registers `backend` in the first free slot.
    pub fn register_backend(backend: impl NodeStorageBackend + 'static) -> Result<Self> {
        Self::register_boxed(Box::new(backend))
    }

    pub fn register_boxed(backend: Box<dyn NodeStorageBackend>) -> Result<Self> {
        let id = claim_any().ok_or_else(|| StorageError::registry_full(NodeStorageId::MAX_INSTANCES))?;
        Ok(Self::from_registered(install(id, backend)))
    }

    /// Registers `backend` under a specific storage tag.
    pub fn register_backend_at(id: u16, backend: impl NodeStorageBackend + 'static) -> Result<Self> {
        let id = NodeStorageId::new(id).ok_or_else(|| StorageError::invalid_storage_id(id))?;
        if !slot(id).try_claim() {
            return Err(StorageError::slot_occupied(id.value()));
        }
        Ok(Self::from_registered(install(id, Box::new(backend))))
    }

    pub fn new_sync() -> Result<Self> {
        Self::register_backend(SyncReferenceBackend::new())
    }

    pub fn new_unsync() -> Result<Self> {
        Self::register_backend(UnsyncReferenceBackend::new())
    }

    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        config.validate()?;
        let metrics = if config.metrics {
            Some(StorageMetrics::global()?)
        } else {
            None
        };
        Self::from_config_with_metrics(config, metrics)
    }

    /// Like [`from_config`](Self::from_config) but reporting into `metrics`
    /// regardless of `config.metrics`.
    pub fn from_config_with_metrics(
        config: &StorageConfig,
        metrics: Option<Arc<StorageMetrics>>,
    ) -> Result<Self> {
        match config.discipline {
            Discipline::Sync => {
                Self::register_backend(SyncReferenceBackend::from_config(config, metrics))
            }
            Discipline::Unsync => {
                Self::register_backend(UnsyncReferenceBackend::from_config(config, metrics))
            }
        }
    }

    /// Live instance registered under `id`, if any.
    pub fn lookup_instance(id: NodeStorageId) -> Option<Self> {
        slot(id).instance.read().upgrade().map(Self::from_registered)
    }

    pub fn id(&self) -> NodeStorageId {
        self.inner.id
    }

    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    pub fn downgrade(&self) -> WeakNodeStorage {
        WeakNodeStorage {
            id: self.inner.id,
            generation: slot(self.inner.id).generation.load(Ordering::Acquire),
        }
    }

    pub fn ptr_eq(&self, other: &NodeStorage) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn backend(&self) -> &(dyn NodeStorageBackend + 'static) {
        &*self.inner.backend
    }
}

impl Deref for NodeStorage {
    type Target = dyn NodeStorageBackend;

    fn deref(&self) -> &Self::Target {
        self.backend()
    }
}

impl PartialEq for NodeStorage {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for NodeStorage {}

impl fmt::Debug for NodeStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeStorage")
            .field("id", &self.id())
            .field("discipline", &self.inner.backend.discipline())
            .field("ref_count", &self.ref_count())
            .finish()
    }
}

/// Non-owning reference to a registered backend.
///
/// Remembers the slot generation at downgrade time: once the backend is gone
/// and its slot reused, the generation differs and upgrading fails instead of
/// reaching the new occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeakNodeStorage {
    id: NodeStorageId,
    generation: u64,
}

impl WeakNodeStorage {
    pub fn id(&self) -> NodeStorageId {
        self.id
    }

    pub fn try_upgrade(&self) -> Option<NodeStorage> {
        let slot = slot(self.id);
        let instance = slot.instance.read();
        if slot.generation.load(Ordering::Acquire) != self.generation {
            return None;
        }
        instance.upgrade().map(NodeStorage::from_registered)
    }

    pub fn upgrade(&self) -> Result<NodeStorage> {
        self.try_upgrade().ok_or_else(StorageError::weak_expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IriView;
    use crate::error::ErrorKind;

    #[test]
    fn test_refcount_lifecycle() {
        let storage = NodeStorage::new_sync().unwrap();
        let id = storage.id();
        assert_eq!(storage.ref_count(), 1);

        let copy = storage.clone();
        assert_eq!(storage.ref_count(), 2);
        assert!(copy.ptr_eq(&storage));

        drop(copy);
        assert_eq!(storage.ref_count(), 1);
        assert!(NodeStorage::lookup_instance(id).is_some());

        drop(storage);
        assert!(NodeStorage::lookup_instance(id).is_none());
    }

    #[test]
    fn test_register_at_rejects_bad_ids() {
        let err = NodeStorage::register_backend_at(4096, SyncReferenceBackend::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidStorageId);

        let held = NodeStorage::register_backend_at(1002, SyncReferenceBackend::new()).unwrap();
        let err = NodeStorage::register_backend_at(1002, SyncReferenceBackend::new()).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SlotOccupied);
        drop(held);
    }

    #[test]
    fn test_weak_upgrade_after_drop() {
        let storage = NodeStorage::new_unsync().unwrap();
        let weak = storage.downgrade();
        assert!(weak.upgrade().unwrap().ptr_eq(&storage));

        drop(storage);
        assert!(weak.try_upgrade().is_none());
        let err = weak.upgrade().unwrap_err();
        assert_eq!(err.kind, ErrorKind::WeakExpired);
    }

    #[test]
    fn test_weak_to_reused_slot_fails() {
        let first = NodeStorage::register_backend_at(1003, SyncReferenceBackend::new()).unwrap();
        let weak = first.downgrade();
        drop(first);

        let second = NodeStorage::register_backend_at(1003, SyncReferenceBackend::new()).unwrap();
        assert_eq!(second.id(), weak.id());
        assert!(weak.try_upgrade().is_none());
        assert!(second.downgrade().try_upgrade().is_some());
    }

    #[test]
    fn test_deref_reaches_backend() {
        let storage = NodeStorage::new_sync().unwrap();
        let id = storage.find_or_make_iri_id(IriView {
            identifier: "http://example.org/s",
        });
        assert_eq!(
            storage.find_iri_backend(id).unwrap().identifier(),
            "http://example.org/s"
        );
        assert_eq!(storage.discipline(), Discipline::Sync);
        assert!(format!("{:?}", storage).contains("NodeStorage"));
    }

    #[test]
    fn test_backend_and_deref_agree() {
        fn iri_count(backend: &dyn NodeStorageBackend) -> usize {
            backend.stats().iris
        }

        let storage = NodeStorage::new_unsync().unwrap();
        storage.find_or_make_iri_id(IriView {
            identifier: "http://example.org/o",
        });
        let through_deref: &dyn NodeStorageBackend = &*storage;
        assert_eq!(iri_count(storage.backend()), iri_count(through_deref));
        assert_eq!(through_deref.discipline(), Discipline::Unsync);
    }
}
