//! Lazy single-pattern matching over a triple set

use std::collections::hash_set;

use rdfgraph_storage::NodeBackendHandle;

use crate::features::nodes::Node;
use crate::features::query::{Solution, Statement, TriplePattern};

/// Solutions of one [`TriplePattern`] against one graph.
///
/// Single pass, in the graph's iteration order. The graph cannot be mutated
/// while the iterator is alive.
pub struct SolutionIter<'a> {
    pattern: TriplePattern,
    variables: usize,
    triples: Option<hash_set::Iter<'a, [NodeBackendHandle; 3]>>,
}

impl<'a> SolutionIter<'a> {
    /// `pattern` must already be expressed in the graph's storage.
    pub(crate) fn new(
        pattern: TriplePattern,
        triples: &'a ahash::AHashSet<[NodeBackendHandle; 3]>,
    ) -> Self {
        Self {
            variables: pattern.nodes().iter().filter(|node| node.is_variable()).count(),
            pattern,
            triples: Some(triples.iter()),
        }
    }

    /// Matches nothing; used when a bound pattern node is absent from the
    /// graph's storage.
    pub(crate) fn empty(pattern: TriplePattern) -> Self {
        Self {
            variables: 0,
            pattern,
            triples: None,
        }
    }

    fn solve(&self, statement: &Statement) -> Option<Solution> {
        if !self.pattern.matches_bound(statement) {
            return None;
        }

        let mut solution = Solution::with_capacity(self.variables);
        for (pattern, node) in self.pattern.nodes().iter().zip(statement.nodes()) {
            if let Some(variable) = pattern.as_variable() {
                solution.push(variable, node);
            }
        }
        Some(solution)
    }
}

impl Iterator for SolutionIter<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        loop {
            let [s, p, o] = *self.triples.as_mut()?.next()?;
            let statement = Statement {
                subject: Node::from_handle(s),
                predicate: Node::from_handle(p),
                object: Node::from_handle(o),
            };
            if let Some(solution) = self.solve(&statement) {
                return Some(solution);
            }
        }
    }
}
