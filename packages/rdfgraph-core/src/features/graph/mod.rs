//! Graph: a deduplicating triple set over one node storage

mod matching;

pub use matching::SolutionIter;

use ahash::AHashSet;
use rdfgraph_storage::{default_instance, NodeBackendHandle, NodeStorage};
use tracing::warn;

use crate::errors::{GraphError, GraphResult};
use crate::features::nodes::Node;
use crate::features::query::{Statement, TriplePattern};

/// A set of triples. Every stored node lives in [`Graph::storage`];
/// statements from other storages are re-interned on insert.
pub struct Graph {
    storage: NodeStorage,
    triples: AHashSet<[NodeBackendHandle; 3]>,
}

impl Graph {
    /// An empty graph over the default node storage.
    pub fn new() -> Self {
        Self::with_storage(default_instance())
    }

    pub fn with_storage(storage: NodeStorage) -> Self {
        Self {
            storage,
            triples: AHashSet::new(),
        }
    }

    pub fn storage(&self) -> &NodeStorage {
        &self.storage
    }

    /// Inserts `statement`. Inserting a statement twice is a no-op.
    pub fn add(&mut self, statement: &Statement) -> GraphResult<()> {
        if !statement.valid() {
            warn!(statement = ?statement, "Rejected invalid statement");
            return Err(GraphError::InvalidStatement(format!("{:?}", statement)));
        }
        let key = statement
            .nodes()
            .map(|node| node.to_node_storage(&self.storage).handle());
        self.triples.insert(key);
        Ok(())
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        if !statement.valid() {
            return false;
        }
        self.local_key(statement)
            .is_some_and(|key| self.triples.contains(&key))
    }

    /// Removes `statement`; returns whether it was present. Nodes stay
    /// interned in the storage.
    pub fn remove(&mut self, statement: &Statement) -> bool {
        match self.local_key(statement) {
            Some(key) => self.triples.remove(&key),
            None => false,
        }
    }

    /// Lazily matches `pattern` against every triple.
    pub fn match_pattern(&self, pattern: &TriplePattern) -> GraphResult<SolutionIter<'_>> {
        if !pattern.valid() {
            return Err(GraphError::InvalidPattern(format!("{:?}", pattern)));
        }
        Ok(self.match_valid(*pattern))
    }

    pub(crate) fn match_valid(&self, pattern: TriplePattern) -> SolutionIter<'_> {
        let local = pattern
            .nodes()
            .map(|node| {
                if node.is_variable() {
                    node
                } else {
                    node.try_get_in_node_storage(&self.storage)
                }
            });
        let local = TriplePattern {
            subject: local[0],
            predicate: local[1],
            object: local[2],
        };

        if local.nodes().iter().any(Node::is_null) {
            SolutionIter::empty(local)
        } else {
            SolutionIter::new(local, &self.triples)
        }
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Statement> + '_ {
        self.triples.iter().map(|&[s, p, o]| Statement {
            subject: Node::from_handle(s),
            predicate: Node::from_handle(p),
            object: Node::from_handle(o),
        })
    }

    /// Handles of `statement` in this graph's storage, `None` if any node
    /// was never interned there.
    fn local_key(&self, statement: &Statement) -> Option<[NodeBackendHandle; 3]> {
        let nodes = statement
            .nodes()
            .map(|node| node.try_get_in_node_storage(&self.storage));
        if nodes.iter().any(Node::is_null) {
            return None;
        }
        Some(nodes.map(|node| node.handle()))
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("storage", &self.storage.id())
            .field("triples", &self.triples.len())
            .finish()
    }
}
