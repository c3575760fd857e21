//! Quad pattern matching across named graphs

use std::collections::hash_map;

use rdfgraph_storage::NodeBackendHandle;

use crate::features::graph::{Graph, SolutionIter};
use crate::features::nodes::{Node, Variable};
use crate::features::query::{Solution, TriplePattern};

enum Source<'a> {
    /// Graph position bound: every solution comes from one graph.
    Single(SolutionIter<'a>),
    /// Graph position is a variable: graphs are visited one after another.
    AcrossGraphs {
        variable: Variable,
        pattern: TriplePattern,
        graphs: hash_map::Iter<'a, NodeBackendHandle, Graph>,
        current: Option<(Node, SolutionIter<'a>)>,
    },
    Empty,
}

/// Solutions of a [`QuadPattern`](crate::QuadPattern) against a dataset.
///
/// When the graph position is a variable it is bound at index 0 of every
/// solution.
pub struct QuadSolutionIter<'a> {
    source: Source<'a>,
}

impl<'a> QuadSolutionIter<'a> {
    pub(crate) fn single(solutions: SolutionIter<'a>) -> Self {
        Self {
            source: Source::Single(solutions),
        }
    }

    pub(crate) fn across_graphs(
        variable: Variable,
        pattern: TriplePattern,
        graphs: hash_map::Iter<'a, NodeBackendHandle, Graph>,
    ) -> Self {
        Self {
            source: Source::AcrossGraphs {
                variable,
                pattern,
                graphs,
                current: None,
            },
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            source: Source::Empty,
        }
    }
}

impl Iterator for QuadSolutionIter<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        match &mut self.source {
            Source::Empty => None,
            Source::Single(solutions) => solutions.next(),
            Source::AcrossGraphs {
                variable,
                pattern,
                graphs,
                current,
            } => loop {
                if let Some((name, solutions)) = current {
                    if let Some(mut solution) = solutions.next() {
                        solution.bind_first(*variable, *name);
                        return Some(solution);
                    }
                }
                let (&handle, graph) = graphs.next()?;
                let name = Node::from_handle(handle);
                *current = Some((name, graph.match_valid(*pattern)));
            },
        }
    }
}
