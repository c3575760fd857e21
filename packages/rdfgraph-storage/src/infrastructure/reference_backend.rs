//! Reference backends
//!
//! [`ReferenceBackend`] owns one interning map per node kind plus the
//! per-datatype literal maps, all built from the same [`StorageFamily`]:
//!
//! - [`SyncReferenceBackend`]: `RwLock`-guarded maps, usable from any thread
//! - [`UnsyncReferenceBackend`]: `RefCell` maps bound to the creating thread

use std::sync::Arc;
use std::thread::{self, ThreadId};

use tracing::trace;

use super::bidir_map::BiDirMap;
use super::node_type_storage::{self as protocol, StorageFamily, SyncFamily, UnsyncFamily};
use super::specialization::{
    has_specialized_storage, literal_map, SpecializedLiteralStorage, SPECIALIZED_DATATYPES,
};
use crate::config::{ResolvedCapacity, StorageConfig};
use crate::domain::{
    BlankNodeBackend, BlankNodeEntry, BlankNodeView, Discipline, IriBackend, IriEntry, IriView,
    LexicalLiteralEntry, LiteralBackend, LiteralId, LiteralType, LiteralView, NodeId,
    NodeStorageBackend, StorageStats, VariableBackend, VariableEntry, VariableView,
    RESERVED_DATATYPES,
};
use crate::error::StorageError;
use crate::metrics::StorageMetrics;
use crate::Result;

pub struct ReferenceBackend<F: StorageFamily> {
    iris: F::Storage<IriEntry>,
    blank_nodes: F::Storage<BlankNodeEntry>,
    variables: F::Storage<VariableEntry>,
    fallback_literals: F::Storage<LexicalLiteralEntry>,
    specialized_literals: SpecializedLiteralStorage<F>,
    metrics: Option<Arc<StorageMetrics>>,
}

impl<F: StorageFamily> ReferenceBackend<F> {
    pub fn new() -> Self {
        Self::with_capacity(ResolvedCapacity::default(), None)
    }

    pub fn from_config(config: &StorageConfig, metrics: Option<Arc<StorageMetrics>>) -> Self {
        Self::with_capacity(config.resolved_capacity(), metrics)
    }

    pub fn with_capacity(capacity: ResolvedCapacity, metrics: Option<Arc<StorageMetrics>>) -> Self {
        let mut iris = BiDirMap::default();
        iris.reserve_until(NodeId::MIN_IRI_ID.value());
        for reserved in RESERVED_DATATYPES {
            iris.insert_assume_not_present_at(
                IriView {
                    identifier: reserved.iri,
                },
                reserved.iri_id().value(),
            );
        }
        iris.reserve(capacity.iris);

        let mut blank_nodes = BiDirMap::default();
        blank_nodes.reserve_until(NodeId::MIN_BNODE_ID.value());
        blank_nodes.reserve(capacity.blank_nodes);

        let mut variables = BiDirMap::default();
        variables.reserve_until(NodeId::MIN_VARIABLE_ID.value());
        variables.reserve(capacity.variables);

        let mut fallback_literals = literal_map();
        fallback_literals.reserve(capacity.literals);

        // the literal hint is shared across the specialized maps
        let specialized_literals = SpecializedLiteralStorage::<F>::new();
        let per_datatype = capacity.literals / SPECIALIZED_DATATYPES.len();
        if per_datatype > 0 {
            for &datatype in SPECIALIZED_DATATYPES {
                specialized_literals.reserve(datatype, per_datatype);
            }
        }

        if let Some(metrics) = &metrics {
            metrics.registered_backends.inc();
        }

        Self {
            iris: F::storage(iris),
            blank_nodes: F::storage(blank_nodes),
            variables: F::storage(variables),
            fallback_literals: F::storage(fallback_literals),
            specialized_literals,
            metrics,
        }
    }

    #[inline]
    fn record_intern(&self, inserted: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_intern(inserted);
        }
    }

    #[inline]
    fn record_erase(&self, erased: bool) -> bool {
        if let Some(metrics) = &self.metrics {
            metrics.record_erase(erased);
        }
        erased
    }

    pub fn has_specialized_storage_for(&self, datatype: LiteralType) -> bool {
        has_specialized_storage(datatype)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Interning
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn find_or_make_iri_id(&self, view: IriView<'_>) -> NodeId {
        let (id, inserted) = protocol::lookup_or_insert(&self.iris, view);
        self.record_intern(inserted);
        if inserted {
            trace!(id, iri = view.identifier, "interned iri");
        }
        NodeId::new(id)
    }

    pub fn find_or_make_bnode_id(&self, view: BlankNodeView<'_>) -> NodeId {
        let (id, inserted) = protocol::lookup_or_insert(&self.blank_nodes, view);
        self.record_intern(inserted);
        if inserted {
            trace!(id, label = view.identifier, "interned blank node");
        }
        NodeId::new(id)
    }

    pub fn find_or_make_variable_id(&self, view: VariableView<'_>) -> NodeId {
        let (id, inserted) = protocol::lookup_or_insert(&self.variables, view);
        self.record_intern(inserted);
        if inserted {
            trace!(id, name = view.name, "interned variable");
        }
        NodeId::new(id)
    }

    pub fn find_or_make_literal_id(&self, view: LiteralView<'_>) -> NodeId {
        let datatype = view.literal_type();
        let (id, inserted) = match view {
            LiteralView::Value(value) => self.specialized_literals.lookup_or_insert(value),
            LiteralView::Lexical(lexical) => {
                assert!(
                    !has_specialized_storage(datatype),
                    "literal of datatype {:?} must be interned by value, not by lexical form",
                    datatype
                );
                let (id, inserted) = protocol::lookup_or_insert(&self.fallback_literals, lexical);
                (LiteralId::new(id), inserted)
            }
        };
        self.record_intern(inserted);
        if inserted {
            trace!(id = id.value(), ?datatype, "interned literal");
        }
        NodeId::from_literal(id, datatype)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Lookup
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn find_iri_id(&self, view: IriView<'_>) -> NodeId {
        NodeId::new(protocol::lookup(&self.iris, view))
    }

    pub fn find_bnode_id(&self, view: BlankNodeView<'_>) -> NodeId {
        NodeId::new(protocol::lookup(&self.blank_nodes, view))
    }

    pub fn find_variable_id(&self, view: VariableView<'_>) -> NodeId {
        NodeId::new(protocol::lookup(&self.variables, view))
    }

    pub fn find_literal_id(&self, view: LiteralView<'_>) -> NodeId {
        let id = match view {
            LiteralView::Value(value) => self.specialized_literals.lookup(value),
            LiteralView::Lexical(lexical) => {
                LiteralId::new(protocol::lookup(&self.fallback_literals, lexical))
            }
        };
        if id.value() == 0 {
            return NodeId::NULL;
        }
        NodeId::from_literal(id, view.literal_type())
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Resolution
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn find_iri_backend(&self, id: NodeId) -> Result<IriBackend> {
        protocol::resolve(&self.iris, id.value())
            .ok_or_else(|| StorageError::node_not_found("iri", id.value()))
    }

    pub fn find_bnode_backend(&self, id: NodeId) -> Result<BlankNodeBackend> {
        protocol::resolve(&self.blank_nodes, id.value())
            .ok_or_else(|| StorageError::node_not_found("blank", id.value()))
    }

    pub fn find_variable_backend(&self, id: NodeId) -> Result<VariableBackend> {
        protocol::resolve(&self.variables, id.value())
            .ok_or_else(|| StorageError::node_not_found("variable", id.value()))
    }

    pub fn find_literal_backend(&self, id: NodeId) -> Result<LiteralBackend> {
        let datatype = id.literal_type();
        let literal_id = id.literal_id();

        let backend = if has_specialized_storage(datatype) {
            self.specialized_literals
                .resolve(datatype, literal_id)
                .map(LiteralBackend::Value)
        } else {
            protocol::resolve(&self.fallback_literals, literal_id.value())
                .filter(|entry| LiteralType::from_iri_node_id(entry.datatype_id()) == datatype)
                .map(LiteralBackend::Lexical)
        };
        backend.ok_or_else(|| StorageError::node_not_found("literal", id.value()))
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Erasure
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Reserved IRIs are pinned and never erased.
    pub fn erase_iri(&self, id: NodeId) -> bool {
        if id.value() < NodeId::MIN_IRI_ID.value() {
            return false;
        }
        self.record_erase(protocol::erase(&self.iris, id.value()))
    }

    pub fn erase_bnode(&self, id: NodeId) -> bool {
        self.record_erase(protocol::erase(&self.blank_nodes, id.value()))
    }

    pub fn erase_variable(&self, id: NodeId) -> bool {
        self.record_erase(protocol::erase(&self.variables, id.value()))
    }

    pub fn erase_literal(&self, id: NodeId) -> bool {
        let datatype = id.literal_type();
        let literal_id = id.literal_id();

        let erased = if has_specialized_storage(datatype) {
            self.specialized_literals.erase(datatype, literal_id)
        } else {
            protocol::erase(&self.fallback_literals, literal_id.value())
        };
        self.record_erase(erased)
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Maintenance
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    pub fn stats(&self) -> StorageStats {
        StorageStats {
            iris: protocol::len(&self.iris),
            blank_nodes: protocol::len(&self.blank_nodes),
            variables: protocol::len(&self.variables),
            fallback_literals: protocol::len(&self.fallback_literals),
            specialized_literals: self.specialized_literals.len(),
        }
    }

    pub fn shrink_to_fit(&self) {
        protocol::shrink_to_fit(&self.iris);
        protocol::shrink_to_fit(&self.blank_nodes);
        protocol::shrink_to_fit(&self.variables);
        protocol::shrink_to_fit(&self.fallback_literals);
        self.specialized_literals.shrink_to_fit();
    }
}

impl<F: StorageFamily> Default for ReferenceBackend<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: StorageFamily> Drop for ReferenceBackend<F> {
    fn drop(&mut self) {
        if let Some(metrics) = &self.metrics {
            metrics.registered_backends.dec();
        }
    }
}

/// Backend whose maps are guarded by `RwLock`s.
pub struct SyncReferenceBackend {
    inner: ReferenceBackend<SyncFamily>,
}

impl SyncReferenceBackend {
    pub fn new() -> Self {
        Self {
            inner: ReferenceBackend::new(),
        }
    }

    pub fn from_config(config: &StorageConfig, metrics: Option<Arc<StorageMetrics>>) -> Self {
        Self {
            inner: ReferenceBackend::from_config(config, metrics),
        }
    }

    #[inline]
    fn backend(&self) -> &ReferenceBackend<SyncFamily> {
        &self.inner
    }
}

impl Default for SyncReferenceBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Backend without locking, bound to the thread that created it.
///
/// It may be registered, shared through a `NodeStorage` and dropped on any
/// thread, but every other call panics off the owning thread.
pub struct UnsyncReferenceBackend {
    owner: ThreadId,
    inner: ReferenceBackend<UnsyncFamily>,
}

// SAFETY: the `RefCell` maps in `inner` are only reached through `backend()`,
// which panics unless the caller runs on `owner`. Drop needs `&mut self`, so
// no other reference can be alive when it runs.
unsafe impl Sync for UnsyncReferenceBackend {}

impl UnsyncReferenceBackend {
    pub fn new() -> Self {
        Self::with_backend(ReferenceBackend::new())
    }

    pub fn from_config(config: &StorageConfig, metrics: Option<Arc<StorageMetrics>>) -> Self {
        Self::with_backend(ReferenceBackend::from_config(config, metrics))
    }

    fn with_backend(inner: ReferenceBackend<UnsyncFamily>) -> Self {
        Self {
            owner: thread::current().id(),
            inner,
        }
    }

    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    #[inline]
    fn backend(&self) -> &ReferenceBackend<UnsyncFamily> {
        assert_eq!(
            thread::current().id(),
            self.owner,
            "UnsyncReferenceBackend accessed outside of its owning thread"
        );
        &self.inner
    }
}

impl Default for UnsyncReferenceBackend {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_node_storage_backend {
    ($ty:ty, $discipline:expr, |$this:ident| $backend:expr) => {
        impl NodeStorageBackend for $ty {
            fn has_specialized_storage_for(&self, datatype: LiteralType) -> bool {
                let $this = self;
                $backend.has_specialized_storage_for(datatype)
            }

            fn find_or_make_iri_id(&self, view: IriView<'_>) -> NodeId {
                let $this = self;
                $backend.find_or_make_iri_id(view)
            }

            fn find_or_make_bnode_id(&self, view: BlankNodeView<'_>) -> NodeId {
                let $this = self;
                $backend.find_or_make_bnode_id(view)
            }

            fn find_or_make_variable_id(&self, view: VariableView<'_>) -> NodeId {
                let $this = self;
                $backend.find_or_make_variable_id(view)
            }

            fn find_or_make_literal_id(&self, view: LiteralView<'_>) -> NodeId {
                let $this = self;
                $backend.find_or_make_literal_id(view)
            }

            fn find_iri_id(&self, view: IriView<'_>) -> NodeId {
                let $this = self;
                $backend.find_iri_id(view)
            }

            fn find_bnode_id(&self, view: BlankNodeView<'_>) -> NodeId {
                let $this = self;
                $backend.find_bnode_id(view)
            }

            fn find_variable_id(&self, view: VariableView<'_>) -> NodeId {
                let $this = self;
                $backend.find_variable_id(view)
            }

            fn find_literal_id(&self, view: LiteralView<'_>) -> NodeId {
                let $this = self;
                $backend.find_literal_id(view)
            }

            fn find_iri_backend(&self, id: NodeId) -> Result<IriBackend> {
                let $this = self;
                $backend.find_iri_backend(id)
            }

            fn find_bnode_backend(&self, id: NodeId) -> Result<BlankNodeBackend> {
                let $this = self;
                $backend.find_bnode_backend(id)
            }

            fn find_variable_backend(&self, id: NodeId) -> Result<VariableBackend> {
                let $this = self;
                $backend.find_variable_backend(id)
            }

            fn find_literal_backend(&self, id: NodeId) -> Result<LiteralBackend> {
                let $this = self;
                $backend.find_literal_backend(id)
            }

            fn erase_iri(&self, id: NodeId) -> bool {
                let $this = self;
                $backend.erase_iri(id)
            }

            fn erase_bnode(&self, id: NodeId) -> bool {
                let $this = self;
                $backend.erase_bnode(id)
            }

            fn erase_variable(&self, id: NodeId) -> bool {
                let $this = self;
                $backend.erase_variable(id)
            }

            fn erase_literal(&self, id: NodeId) -> bool {
                let $this = self;
                $backend.erase_literal(id)
            }

            fn stats(&self) -> StorageStats {
                let $this = self;
                $backend.stats()
            }

            fn shrink_to_fit(&self) {
                let $this = self;
                $backend.shrink_to_fit()
            }

            fn discipline(&self) -> Discipline {
                $discipline
            }
        }
    };
}

impl_node_storage_backend!(SyncReferenceBackend, Discipline::Sync, |this| this.backend());
impl_node_storage_backend!(UnsyncReferenceBackend, Discipline::Unsync, |this| this.backend());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CapacityPreset;
    use crate::domain::{LexicalLiteralView, LiteralValue};

    fn lexical<'a>(datatype: NodeId, lexical_form: &'a str, language_tag: &'a str) -> LiteralView<'a> {
        LiteralView::Lexical(LexicalLiteralView {
            datatype_id: datatype,
            lexical_form,
            language_tag,
        })
    }

    #[test]
    fn test_reserved_iris_seeded() {
        let backend = SyncReferenceBackend::new();
        for reserved in RESERVED_DATATYPES {
            let view = IriView {
                identifier: reserved.iri,
            };
            assert_eq!(backend.find_iri_id(view), reserved.iri_id());
            assert_eq!(backend.find_or_make_iri_id(view), reserved.iri_id());
        }
        let fresh = backend.find_or_make_iri_id(IriView {
            identifier: "http://example.org/a",
        });
        assert_eq!(fresh, NodeId::MIN_IRI_ID);
        assert!(!backend.erase_iri(LiteralType::STRING.to_iri_node_id()));
    }

    #[test]
    fn test_literal_ids_carry_datatype() {
        let backend = SyncReferenceBackend::new();
        let string_id = LiteralType::STRING.to_iri_node_id();

        let plain = backend.find_or_make_literal_id(lexical(string_id, "hello", ""));
        assert_eq!(plain.literal_type(), LiteralType::STRING);

        let custom_iri = backend.find_or_make_iri_id(IriView {
            identifier: "http://example.org/dt",
        });
        let custom = backend.find_or_make_literal_id(lexical(custom_iri, "hello", ""));
        assert_eq!(custom.literal_type(), LiteralType::OTHER);
        assert_ne!(plain, custom);

        let value = LiteralValue::Long(42);
        let long = backend.find_or_make_literal_id(LiteralView::Value(&value));
        assert_eq!(long.literal_type(), LiteralType::LONG);
        assert_eq!(
            backend.find_literal_backend(long).unwrap(),
            LiteralBackend::Value(value)
        );

        match backend.find_literal_backend(custom).unwrap() {
            LiteralBackend::Lexical(entry) => {
                assert_eq!(entry.lexical_form(), "hello");
                assert_eq!(entry.datatype_id(), custom_iri);
            }
            other => panic!("expected lexical literal, got {:?}", other),
        }
    }

    #[test]
    fn test_specialized_and_fallback_never_share_ids() {
        let backend = SyncReferenceBackend::new();
        let string_id = LiteralType::STRING.to_iri_node_id();
        let lexical_id = backend.find_or_make_literal_id(lexical(string_id, "1", ""));
        let value = LiteralValue::Long(1);
        let value_id = backend.find_or_make_literal_id(LiteralView::Value(&value));

        assert_eq!(lexical_id.literal_id(), value_id.literal_id());
        assert_ne!(lexical_id, value_id);
    }

    #[test]
    #[should_panic(expected = "must be interned by value")]
    fn test_lexical_literal_of_specialized_datatype_panics() {
        let backend = SyncReferenceBackend::new();
        let long_id = LiteralType::LONG.to_iri_node_id();
        backend.find_or_make_literal_id(lexical(long_id, "1", ""));
    }

    #[test]
    fn test_lexical_lookup_of_specialized_datatype_misses() {
        let backend = SyncReferenceBackend::new();
        let long_id = LiteralType::LONG.to_iri_node_id();
        let value = LiteralValue::Long(1);
        backend.find_or_make_literal_id(LiteralView::Value(&value));
        assert!(backend.find_literal_id(lexical(long_id, "1", "")).is_null());
    }

    #[test]
    fn test_capacity_hints_reserve_specialized_maps() {
        let backend = ReferenceBackend::<SyncFamily>::with_capacity(CapacityPreset::Balanced.hints(), None);
        let value = LiteralValue::Decimal("2.50".parse().unwrap());
        let id = backend.find_or_make_literal_id(LiteralView::Value(&value));
        assert_eq!(id.literal_type(), LiteralType::DECIMAL);
        assert_eq!(id.literal_id(), NodeId::MIN_LITERAL_ID);
        assert_eq!(backend.find_literal_id(LiteralView::Value(&value)), id);
    }

    #[test]
    fn test_missing_ids_are_node_not_found() {
        let backend = SyncReferenceBackend::new();
        let err = backend.find_bnode_backend(NodeId::new(7)).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::NodeNotFound);
        assert!(err.message.contains("Did not find blank node"));
        assert!(backend.find_literal_backend(NodeId::NULL).is_err());
    }

    #[test]
    fn test_erase_literal_then_miss() {
        let backend = UnsyncReferenceBackend::new();
        let lang_id = LiteralType::LANG_STRING.to_iri_node_id();
        let view = lexical(lang_id, "chat", "fr");
        let id = backend.find_or_make_literal_id(view);
        assert_eq!(backend.find_literal_id(view), id);

        assert!(backend.erase_literal(id));
        assert!(backend.find_literal_id(view).is_null());
        assert!(!backend.erase_literal(id));
        assert_eq!(backend.stats().literals(), 0);
    }

    #[test]
    fn test_stats_and_discipline() {
        let backend = UnsyncReferenceBackend::new();
        backend.find_or_make_bnode_id(BlankNodeView { identifier: "b0" });
        backend.find_or_make_variable_id(VariableView {
            name: "x",
            is_anonymous: false,
        });
        let stats = backend.stats();
        assert_eq!(stats.blank_nodes, 1);
        assert_eq!(stats.variables, 1);
        assert_eq!(stats.iris, RESERVED_DATATYPES.len());
        assert_eq!(backend.discipline(), Discipline::Unsync);
        assert_eq!(SyncReferenceBackend::new().discipline(), Discipline::Sync);
    }

    #[test]
    fn test_unsync_panics_off_thread() {
        let backend = Arc::new(UnsyncReferenceBackend::new());
        let remote = Arc::clone(&backend);
        let result = thread::spawn(move || remote.find_bnode_id(BlankNodeView { identifier: "b" })).join();
        assert!(result.is_err());
        // dropping on another thread is allowed
        thread::spawn(move || drop(backend)).join().unwrap();
    }
}
