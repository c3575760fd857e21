//! Node Storage Port (Trait Interface)
//!
//! Every storage instance registered with the registry implements
//! [`NodeStorageBackend`]. Callers only ever see `dyn NodeStorageBackend`, so
//! the synchronized and single-threaded reference backends (and custom
//! backends) are interchangeable behind one call surface.

use serde::{Deserialize, Serialize};

use super::identifier::{LiteralType, NodeId};
use super::view::{
    BlankNodeBackend, BlankNodeView, IriBackend, IriView, LiteralBackend, LiteralView,
    VariableBackend, VariableView,
};
use crate::Result;

/// Interning discipline of a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    /// Shared-mutex maps, safe to use from any thread
    #[default]
    Sync,
    /// Lock-free maps bound to the creating thread
    Unsync,
}

impl Discipline {
    pub fn as_str(&self) -> &'static str {
        match self {
            Discipline::Sync => "sync",
            Discipline::Unsync => "unsync",
        }
    }
}

/// Live entry counts per map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub iris: usize,
    pub blank_nodes: usize,
    pub variables: usize,
    pub fallback_literals: usize,
    pub specialized_literals: usize,
}

impl StorageStats {
    pub fn literals(&self) -> usize {
        self.fallback_literals + self.specialized_literals
    }

    pub fn total(&self) -> usize {
        self.iris + self.blank_nodes + self.variables + self.literals()
    }
}

/// Node Storage Port (Primary Interface)
///
/// `find_or_make_*` interns, `find_*_id` only looks up (a null id means
/// absent), `find_*_backend` resolves an id this instance handed out, and
/// `erase_*` drops an entry, returning `false` if the id was not live.
pub trait NodeStorageBackend: Send + Sync {
    fn has_specialized_storage_for(&self, datatype: LiteralType) -> bool;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Interning
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn find_or_make_iri_id(&self, view: IriView<'_>) -> NodeId;

    fn find_or_make_bnode_id(&self, view: BlankNodeView<'_>) -> NodeId;

    fn find_or_make_variable_id(&self, view: VariableView<'_>) -> NodeId;

    /// Literals of a datatype with specialized storage must arrive as
    /// `LiteralView::Value`; a lexical view of one panics.
    fn find_or_make_literal_id(&self, view: LiteralView<'_>) -> NodeId;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Lookup
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn find_iri_id(&self, view: IriView<'_>) -> NodeId;

    fn find_bnode_id(&self, view: BlankNodeView<'_>) -> NodeId;

    fn find_variable_id(&self, view: VariableView<'_>) -> NodeId;

    fn find_literal_id(&self, view: LiteralView<'_>) -> NodeId;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Resolution
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn find_iri_backend(&self, id: NodeId) -> Result<IriBackend>;

    fn find_bnode_backend(&self, id: NodeId) -> Result<BlankNodeBackend>;

    fn find_variable_backend(&self, id: NodeId) -> Result<VariableBackend>;

    fn find_literal_backend(&self, id: NodeId) -> Result<LiteralBackend>;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Erasure
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn erase_iri(&self, id: NodeId) -> bool;

    fn erase_bnode(&self, id: NodeId) -> bool;

    fn erase_variable(&self, id: NodeId) -> bool;

    fn erase_literal(&self, id: NodeId) -> bool;

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Maintenance
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn stats(&self) -> StorageStats;

    fn shrink_to_fit(&self);

    fn discipline(&self) -> Discipline;
}
