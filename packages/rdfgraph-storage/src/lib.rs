//! rdfgraph-storage - Node identity and interning for RDF graphs
//!
//! > "Intern once, compare by id."
//!
//! ## Core Principles
//!
//! 1. **Packed handles**: a node is a 64-bit `NodeBackendHandle` (node id, kind,
//!    storage tag); two nodes of one storage are equal iff their handles are
//! 2. **Deduplication**: each IRI, blank node, variable and literal is stored
//!    once per storage; ids are recycled through a free list after erasure
//! 3. **Registry**: up to 1024 storage instances live at once, addressed by
//!    tag, reference counted, with generation-checked weak references
//!
//! ## Layout
//!
//! - `domain`: identifiers, datatype table, views, `NodeStorageBackend` port
//! - `infrastructure`: free list, bidirectional map, sync/unsync reference backends
//! - `registry`: `NodeStorage`, `WeakNodeStorage`, default instance
//! - `config` / `metrics`: YAML configuration and prometheus counters
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rdfgraph_storage::{IriView, NodeStorage};
//!
//! let storage = NodeStorage::new_sync()?;
//! let id = storage.find_or_make_iri_id(IriView { identifier: "http://example.org/a" });
//! assert_eq!(storage.find_iri_backend(id)?.identifier(), "http://example.org/a");
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod metrics;
pub mod registry;

pub use config::{CapacityHints, CapacityPreset, ResolvedCapacity, StorageConfig, Validatable};
pub use error::{ErrorKind, Result, StorageError};
pub use metrics::StorageMetrics;
pub use registry::{default_instance, set_default_instance, NodeStorage, WeakNodeStorage};

pub use domain::{
    BlankNodeBackend, BlankNodeView, DateTimeValue, DateValue, Discipline, Double, Duration,
    IriBackend, IriView, LexicalLiteralView, LiteralBackend, LiteralId, LiteralType, LiteralValue,
    LiteralView, NodeBackendHandle, NodeId, NodeKind, NodeStorageBackend, NodeStorageId,
    StorageStats, VariableBackend, VariableView, YearMonth,
};
pub use infrastructure::{SyncReferenceBackend, UnsyncReferenceBackend};
