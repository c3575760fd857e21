//! Untyped node handle

use std::cmp::Ordering;
use std::fmt;

use rdfgraph_storage::{
    BlankNodeView, IriView, LexicalLiteralView, LiteralBackend, LiteralType, LiteralView,
    NodeBackendHandle, NodeId, NodeKind, NodeStorage, NodeStorageId, VariableView,
};

use super::compare::{compare_across, expect_backend};
use super::literal::intern_value;
use super::{BlankNode, Iri, Literal, Variable};

/// An RDF node: a 64-bit handle into one registered storage.
///
/// Nodes are only meaningful while their storage is alive. Resolving a node
/// whose storage has been dropped, or whose id the storage never handed out,
/// panics.
#[derive(Clone, Copy, Default)]
pub struct Node {
    handle: NodeBackendHandle,
}

impl Node {
    pub const fn null() -> Self {
        Self {
            handle: NodeBackendHandle::from_raw(0),
        }
    }

    pub const fn from_handle(handle: NodeBackendHandle) -> Self {
        Self { handle }
    }

    pub(crate) fn new(id: NodeId, kind: NodeKind, storage: NodeStorageId) -> Self {
        if id.is_null() {
            return Self::null();
        }
        Self::from_handle(NodeBackendHandle::new(id, kind, storage))
    }

    #[inline]
    pub fn handle(&self) -> NodeBackendHandle {
        self.handle
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.handle.node_id()
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.handle.kind()
    }

    #[inline]
    pub fn storage_id(&self) -> NodeStorageId {
        self.handle.storage_id()
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    pub fn is_iri(&self) -> bool {
        !self.is_null() && self.kind() == NodeKind::Iri
    }

    pub fn is_blank_node(&self) -> bool {
        !self.is_null() && self.kind() == NodeKind::BlankNode
    }

    pub fn is_literal(&self) -> bool {
        !self.is_null() && self.kind() == NodeKind::Literal
    }

    pub fn is_variable(&self) -> bool {
        !self.is_null() && self.kind() == NodeKind::Variable
    }

    /// Owning storage of this node.
    ///
    /// # Panics
    /// When the node is null or its storage has been dropped.
    pub fn storage(&self) -> NodeStorage {
        assert!(!self.is_null(), "null node has no storage");
        NodeStorage::lookup_instance(self.storage_id()).unwrap_or_else(|| {
            panic!(
                "node storage {} of {:?} is no longer alive",
                self.storage_id(),
                self.handle
            )
        })
    }

    pub fn as_iri(&self) -> Option<Iri> {
        self.is_iri().then(|| Iri::from_node_unchecked(*self))
    }

    pub fn as_blank_node(&self) -> Option<BlankNode> {
        self.is_blank_node()
            .then(|| BlankNode::from_node_unchecked(*self))
    }

    pub fn as_literal(&self) -> Option<Literal> {
        self.is_literal().then(|| Literal::from_node_unchecked(*self))
    }

    pub fn as_variable(&self) -> Option<Variable> {
        self.is_variable()
            .then(|| Variable::from_node_unchecked(*self))
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Cross-storage transfer
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// This node interned into `target`. Nodes already in `target` are
    /// returned unchanged.
    pub fn to_node_storage(&self, target: &NodeStorage) -> Node {
        self.transfer(target, true)
    }

    /// This node's counterpart in `target`, or the null node when `target`
    /// does not hold it. Never creates entries.
    pub fn try_get_in_node_storage(&self, target: &NodeStorage) -> Node {
        self.transfer(target, false)
    }

    fn transfer(&self, target: &NodeStorage, create: bool) -> Node {
        if self.is_null() || self.storage_id() == target.id() {
            return *self;
        }

        let source = self.storage();
        let kind = self.kind();
        let id = match kind {
            NodeKind::Iri => {
                let entry = expect_backend(source.find_iri_backend(self.id()));
                let view = IriView {
                    identifier: entry.identifier(),
                };
                if create {
                    target.find_or_make_iri_id(view)
                } else {
                    target.find_iri_id(view)
                }
            }
            NodeKind::BlankNode => {
                let entry = expect_backend(source.find_bnode_backend(self.id()));
                let view = BlankNodeView {
                    identifier: entry.identifier(),
                };
                if create {
                    target.find_or_make_bnode_id(view)
                } else {
                    target.find_bnode_id(view)
                }
            }
            NodeKind::Variable => {
                let entry = expect_backend(source.find_variable_backend(self.id()));
                let view = VariableView {
                    name: entry.name(),
                    is_anonymous: entry.is_anonymous(),
                };
                if create {
                    target.find_or_make_variable_id(view)
                } else {
                    target.find_variable_id(view)
                }
            }
            NodeKind::Literal => transfer_literal(&source, self.id(), target, create),
        };
        Node::new(id, kind, target.id())
    }
}

/// Moves a literal between storages. The datatype IRI is transferred first
/// unless it is reserved (reserved ids agree across storages); value
/// literals fall back to their rendered lexical form when `target` has no
/// specialized storage for the datatype.
fn transfer_literal(source: &NodeStorage, id: NodeId, target: &NodeStorage, create: bool) -> NodeId {
    let backend = expect_backend(source.find_literal_backend(id));

    match backend {
        LiteralBackend::Value(value) => intern_value(target, &value, create),
        LiteralBackend::Lexical(entry) => {
            let datatype = LiteralType::from_iri_node_id(entry.datatype_id());
            assert!(
                !target.has_specialized_storage_for(datatype),
                "cannot move a lexical {:?} literal into a storage that specializes it",
                datatype
            );

            let datatype_id = if datatype.is_fixed() {
                entry.datatype_id()
            } else {
                let datatype_iri = Node::new(entry.datatype_id(), NodeKind::Iri, source.id());
                let transferred = datatype_iri.transfer(target, create);
                if transferred.is_null() {
                    return NodeId::NULL;
                }
                transferred.id()
            };

            let view = LiteralView::Lexical(LexicalLiteralView {
                datatype_id,
                lexical_form: entry.lexical_form(),
                language_tag: entry.language_tag(),
            });
            if create {
                target.find_or_make_literal_id(view)
            } else {
                target.find_literal_id(view)
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Comparison
// ═══════════════════════════════════════════════════════════════════════════

impl PartialEq for Node {
    /// Nodes of one storage are equal iff their handles are; nodes of
    /// different storages are equal iff they hold the same data.
    fn eq(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return self.is_null() && other.is_null();
        }
        if self.storage_id() == other.storage_id() {
            return self.handle == other.handle;
        }
        if self.kind() != other.kind() {
            return false;
        }
        compare_across(self, other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Node {
    /// Kind order first (variable, blank node, IRI, literal), then by data.
    /// Literals of incomparable representations are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.is_null(), other.is_null()) {
            (true, true) => return Some(Ordering::Equal),
            (true, false) => return Some(Ordering::Less),
            (false, true) => return Some(Ordering::Greater),
            (false, false) => {}
        }
        if self.handle == other.handle {
            return Some(Ordering::Equal);
        }
        match self.kind().cmp(&other.kind()) {
            Ordering::Equal => compare_across(self, other),
            unequal => Some(unequal),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("Node(null)");
        }
        write!(
            f,
            "Node({} {} @{})",
            self.kind(),
            self.id().value(),
            self.storage_id()
        )
    }
}

impl fmt::Display for Node {
    /// N-Triples-like rendering.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("null");
        }
        match self.kind() {
            NodeKind::Iri => fmt::Display::fmt(&Iri::from_node_unchecked(*self), f),
            NodeKind::BlankNode => fmt::Display::fmt(&BlankNode::from_node_unchecked(*self), f),
            NodeKind::Variable => fmt::Display::fmt(&Variable::from_node_unchecked(*self), f),
            NodeKind::Literal => fmt::Display::fmt(&Literal::from_node_unchecked(*self), f),
        }
    }
}
