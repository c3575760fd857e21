use std::fmt;
use std::ops::Index;

use crate::features::nodes::{Node, Variable};

/// Variable bindings produced by one successful match: one entry per
/// variable position of the pattern, in position order. A variable that
/// occurs twice is bound twice, each time to the node at its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solution {
    bindings: Vec<(Variable, Node)>,
}

impl Solution {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bindings: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, variable: Variable, node: Node) {
        self.bindings.push((variable, node));
    }

    pub(crate) fn bind_first(&mut self, variable: Variable, node: Node) {
        self.bindings.insert(0, (variable, node));
    }

    /// Node bound at the first position of `variable`, compared by data so
    /// variables from any storage can be used.
    pub fn get(&self, variable: &Variable) -> Option<Node> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound == variable)
            .map(|(_, node)| *node)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn variable(&self, index: usize) -> Option<Variable> {
        self.bindings.get(index).map(|(variable, _)| *variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Variable, Node)> + '_ {
        self.bindings.iter()
    }
}

impl Index<usize> for Solution {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        &self.bindings[index].1
    }
}

impl<'a> IntoIterator for &'a Solution {
    type Item = &'a (Variable, Node);
    type IntoIter = std::slice::Iter<'a, (Variable, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (variable, node)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} -> {}", variable, node)?;
        }
        f.write_str("}")
    }
}
