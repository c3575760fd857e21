use std::fmt;
use std::ops::Deref;

use rdfgraph_storage::{NodeKind, NodeStorage, VariableBackend, VariableView};

use super::compare::expect_backend;
use super::Node;

/// A query variable. Anonymous variables render as `_:name`, named ones as
/// `?name`; the two never share an id.
#[derive(Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Variable {
    node: Node,
}

impl Variable {
    pub fn make(name: &str, is_anonymous: bool, storage: &NodeStorage) -> Self {
        let id = storage.find_or_make_variable_id(VariableView { name, is_anonymous });
        Self::from_node_unchecked(Node::new(id, NodeKind::Variable, storage.id()))
    }

    pub fn named(name: &str, storage: &NodeStorage) -> Self {
        Self::make(name, false, storage)
    }

    pub(crate) fn from_node_unchecked(node: Node) -> Self {
        Self { node }
    }

    pub fn node(&self) -> Node {
        self.node
    }

    pub fn backend(&self) -> VariableBackend {
        expect_backend(self.node.storage().find_variable_backend(self.node.id()))
    }

    pub fn name(&self) -> String {
        self.backend().name().to_owned()
    }

    pub fn is_anonymous(&self) -> bool {
        self.backend().is_anonymous()
    }
}

impl Deref for Variable {
    type Target = Node;

    fn deref(&self) -> &Node {
        &self.node
    }
}

impl From<Variable> for Node {
    fn from(variable: Variable) -> Node {
        variable.node
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Variable({:?})", self.node)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.node.is_null() {
            return f.write_str("null");
        }
        let backend = self.backend();
        let prefix = if backend.is_anonymous() { "_:" } else { "?" };
        write!(f, "{}{}", prefix, backend.name())
    }
}
