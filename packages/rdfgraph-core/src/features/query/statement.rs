use std::fmt;

use crate::features::nodes::Node;

/// A triple of concrete nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statement {
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
}

impl Statement {
    pub fn new(subject: impl Into<Node>, predicate: impl Into<Node>, object: impl Into<Node>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }

    /// Subject is an IRI or blank node, predicate an IRI, object any
    /// non-variable node.
    pub fn valid(&self) -> bool {
        (self.subject.is_iri() || self.subject.is_blank_node())
            && self.predicate.is_iri()
            && !self.object.is_null()
            && !self.object.is_variable()
    }

    pub fn nodes(&self) -> [Node; 3] {
        [self.subject, self.predicate, self.object]
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} .", self.subject, self.predicate, self.object)
    }
}

/// A statement in a named graph. A null `graph` stands for the default
/// graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub graph: Node,
    pub subject: Node,
    pub predicate: Node,
    pub object: Node,
}

impl Quad {
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

    /// A quad in the default graph.
    pub fn in_default_graph(statement: Statement) -> Self {
        Self {
            graph: Node::null(),
            subject: statement.subject,
            predicate: statement.predicate,
            object: statement.object,
        }
    }

    /// The graph is null (default graph), an IRI or a blank node, and the
    /// triple is a valid statement.
    pub fn valid(&self) -> bool {
        (self.graph.is_null() || self.graph.is_iri() || self.graph.is_blank_node())
            && self.statement().valid()
    }

    pub fn statement(&self) -> Statement {
        Statement {
            subject: self.subject,
            predicate: self.predicate,
            object: self.object,
        }
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.graph.is_null() {
            return fmt::Display::fmt(&self.statement(), f);
        }
        write!(
            f,
            "{} {} {} {} .",
            self.subject, self.predicate, self.object, self.graph
        )
    }
}
