use std::fmt;

use crate::features::nodes::{Node, Variable};

use super::Statement;

/// A triple whose positions may hold variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriplePattern {
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
}

impl TriplePattern {
    pub fn new(subject: impl Into<Node>, predicate: impl Into<Node>, object: impl Into<Node>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Subject is not a literal, predicate is an IRI or variable, and no
    /// position is null.
    pub fn valid(&self) -> bool {
        !self.subject.is_null()
            && !self.subject.is_literal()
            && (self.predicate.is_iri() || self.predicate.is_variable())
            && !self.object.is_null()
    }

    pub fn nodes(&self) -> [Node; 3] {
        [self.subject, self.predicate, self.object]
    }

    /// Distinct variables in subject, predicate, object order.
    pub fn variables(&self) -> Vec<Variable> {
        distinct_variables(&self.nodes())
    }

    /// Whether `statement` satisfies every bound position. Bound nodes are
    /// compared by handle.
    pub(crate) fn matches_bound(&self, statement: &Statement) -> bool {
        self.nodes()
            .iter()
            .zip(statement.nodes().iter())
            .all(|(pattern, node)| pattern.is_variable() || pattern.handle() == node.handle())
    }
}

impl fmt::Display for TriplePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// A quad pattern. A null `graph` selects the default graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadPattern {
    pub graph: Node,
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
}

impl QuadPattern {
    pub fn new(
        graph: impl Into<Node>,
        subject: impl Into<Node>,
        predicate: impl Into<Node>,
        object: impl Into<Node>,
    ) -> Self {
        Self {
            graph: graph.into(),
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    pub fn valid(&self) -> bool {
        (self.graph.is_null()
            || self.graph.is_iri()
            || self.graph.is_blank_node()
            || self.graph.is_variable())
            && self.triple_pattern().valid()
    }

    pub fn triple_pattern(&self) -> TriplePattern {
        TriplePattern {
            subject: self.subject,
            predicate: self.predicate,
            object: self.object,
        }
    }

    /// Distinct variables in graph, subject, predicate, object order.
    pub fn variables(&self) -> Vec<Variable> {
        distinct_variables(&[self.graph, self.subject, self.predicate, self.object])
    }
}

impl fmt::Display for QuadPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.graph.is_null() {
            return fmt::Display::fmt(&self.triple_pattern(), f);
        }
        write!(
            f,
            "{} {} {} {} .",
            self.subject, self.predicate, self.object, self.graph
        )
    }
}

fn distinct_variables(nodes: &[Node]) -> Vec<Variable> {
    let mut variables: Vec<Variable> = Vec::with_capacity(nodes.len());
    for variable in nodes.iter().filter_map(Node::as_variable) {
        if !variables.iter().any(|seen| seen.handle() == variable.handle()) {
            variables.push(variable);
        }
    }
    variables
}
