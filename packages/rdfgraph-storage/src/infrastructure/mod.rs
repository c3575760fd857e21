//! Infrastructure layer - interning maps and reference backends
//!
//! - `free_list`: bitmap id allocator
//! - `bidir_map`: id <-> entry map over `hashbrown::HashTable`
//! - `node_type_storage`: sync/unsync guards and the lookup-or-insert protocol
//! - `specialization`: per-datatype literal maps
//! - `reference_backend`: `NodeStorageBackend` implementations

pub mod bidir_map;
pub mod free_list;
pub mod node_type_storage;
pub mod reference_backend;
pub mod specialization;

pub use bidir_map::BiDirMap;
pub use free_list::IndexFreeList;
pub use node_type_storage::{
    NodeTypeStorage, StorageFamily, SyncFamily, SyncNodeTypeStorage, UnsyncFamily,
    UnsyncNodeTypeStorage,
};
pub use reference_backend::{ReferenceBackend, SyncReferenceBackend, UnsyncReferenceBackend};
pub use specialization::{has_specialized_storage, SpecializedLiteralStorage, SPECIALIZED_DATATYPES};
