use std::fmt;
use std::ops::Deref;

use rdfgraph_storage::{IriBackend, IriView, LiteralType, NodeId, NodeKind, NodeStorage};

use super::compare::expect_backend;
use super::Node;

/// An IRI node.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Iri {
    node: Node,
}

impl Iri {
    pub fn make(identifier: &str, storage: &NodeStorage) -> Self {
        let id = storage.find_or_make_iri_id(IriView { identifier });
        Self::from_node_unchecked(Node::new(id, NodeKind::Iri, storage.id()))
    }

    /// Name of the default graph of a dataset: the reserved empty IRI.
    pub fn default_graph(storage: &NodeStorage) -> Self {
        Self::from_node_unchecked(Node::new(
            NodeId::DEFAULT_GRAPH_ID,
            NodeKind::Iri,
            storage.id(),
        ))
    }

    pub fn rdf_type(storage: &NodeStorage) -> Self {
        Self::from_node_unchecked(Node::new(
            LiteralType::RDF_TYPE.to_iri_node_id(),
            NodeKind::Iri,
            storage.id(),
        ))
    }

    /// IRI of a fixed datatype. `None` for `OTHER` and unassigned tags.
    pub fn from_datatype(datatype: LiteralType, storage: &NodeStorage) -> Option<Self> {
        datatype.reserved_iri()?;
        Some(Self::from_node_unchecked(Node::new(
            datatype.to_iri_node_id(),
            NodeKind::Iri,
            storage.id(),
        )))
    }

    /// Wraps `node` without checking its kind.
    pub(crate) fn from_node_unchecked(node: Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> Node {
        self.node
    }

    /// The datatype tag this IRI stands for, `OTHER` when it is not reserved.
    pub fn literal_type(&self) -> LiteralType {
        LiteralType::from_iri_node_id(self.node.id())
    }

    pub fn backend(&self) -> IriBackend {
        expect_backend(self.node.storage().find_iri_backend(self.node.id()))
    }

    pub fn identifier(&self) -> String {
        self.backend().identifier().to_owned()
    }

    pub fn is_default_graph(&self) -> bool {
        !self.node.is_null() && self.node.id() == NodeId::DEFAULT_GRAPH_ID
    }

    pub fn to_node_storage(&self, target: &NodeStorage) -> Iri {
        Self::from_node_unchecked(self.node.to_node_storage(target))
    }

    pub fn try_get_in_node_storage(&self, target: &NodeStorage) -> Iri {
        Self::from_node_unchecked(self.node.try_get_in_node_storage(target))
    }
}

impl Deref for Iri {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl From<Iri> for Node {
    fn from(iri: Iri) -> Node {
        iri.node
    }
}

impl fmt::Debug for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iri({:?})", self.node)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.node.is_null() {
            return f.write_str("null");
        }
        write!(f, "<{}>", self.backend().identifier())
    }
}
