//! Domain layer: identifiers, datatypes, views and the backend port
//!
//! # Domain Models
//!
//! - `NodeBackendHandle`: 64-bit packed (node id, kind, storage id) handle
//! - `LiteralType`: 6-bit datatype tag carried inside literal ids
//! - `IriView` / `BlankNodeView` / `VariableView` / `LiteralView`: borrowed
//!   node identities handed to the interning maps
//! - `LiteralValue`: native payloads of the specialized datatypes
//!
//! # Port Trait
//!
//! - `NodeStorageBackend`: the storage-instance abstraction

pub mod datatypes;
pub mod identifier;
pub mod ports;
pub mod value;
pub mod view;

pub use datatypes::{reserved_id_of, ReservedDatatype, RDF, RESERVED_DATATYPES, XSD};
pub use identifier::{LiteralId, LiteralType, NodeBackendHandle, NodeId, NodeKind, NodeStorageId};
pub use ports::{Discipline, NodeStorageBackend, StorageStats};
pub use value::{DateTimeValue, DateValue, Double, Duration, LiteralValue, YearMonth};
pub use view::{
    BlankNodeBackend, BlankNodeEntry, BlankNodeView, InternedEntry, IriBackend, IriEntry, IriView,
    LexicalLiteralEntry, LexicalLiteralView, LiteralBackend, LiteralView, SpecializedEntry,
    VariableBackend, VariableEntry, VariableView,
};
