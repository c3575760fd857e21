use std::fmt;
use std::ops::Deref;

use rdfgraph_storage::{BlankNodeBackend, BlankNodeView, NodeKind, NodeStorage};

use super::compare::expect_backend;
use super::Node;

/// A blank node, identified by its label within one storage.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct BlankNode {
    node: Node,
}

impl BlankNode {
    pub fn make(label: &str, storage: &NodeStorage) -> Self {
        let id = storage.find_or_make_bnode_id(BlankNodeView { identifier: label });
        Self::from_node_unchecked(Node::new(id, NodeKind::BlankNode, storage.id()))
    }

    pub(crate) fn from_node_unchecked(node: Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> Node {
        self.node
    }

    pub fn backend(&self) -> BlankNodeBackend {
        expect_backend(self.node.storage().find_bnode_backend(self.node.id()))
    }

    pub fn identifier(&self) -> String {
        self.backend().identifier().to_owned()
    }
}

impl Deref for BlankNode {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl From<BlankNode> for Node {
    fn from(bnode: BlankNode) -> Node {
        bnode.node
    }
}

impl fmt::Debug for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlankNode({:?})", self.node)
    }
}

impl fmt::Display for BlankNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.node.is_null() {
            return f.write_str("null");
        }
        write!(f, "_:{}", self.backend().identifier())
    }
}
