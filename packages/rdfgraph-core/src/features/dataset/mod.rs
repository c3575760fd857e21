//! Dataset: named graphs sharing one node storage

mod matching;

pub use matching::QuadSolutionIter;

use ahash::AHashMap;
use rdfgraph_storage::{default_instance, NodeBackendHandle, NodeStorage};
use tracing::{debug, warn};

use crate::errors::{GraphError, GraphResult};
use crate::features::graph::Graph;
use crate::features::nodes::{Iri, Node};
use crate::features::query::{Quad, QuadPattern, Statement};

/// Graphs keyed by name. The default graph is named by the reserved empty
/// IRI; quads and patterns with a null graph position address it.
pub struct Dataset {
    storage: NodeStorage,
    graphs: AHashMap<NodeBackendHandle, Graph>,
}

impl Dataset {
    /// An empty dataset over the default node storage.
    pub fn new() -> Self {
        Self::with_storage(default_instance())
    }

    pub fn with_storage(storage: NodeStorage) -> Self {
        Self {
            storage,
            graphs: AHashMap::new(),
        }
    }

    pub fn storage(&self) -> &NodeStorage {
        &self.storage
    }

    pub fn default_graph_name(&self) -> Iri {
        Iri::default_graph(&self.storage)
    }

    /// Inserts `quad`, creating its graph on first use.
    pub fn add(&mut self, quad: &Quad) -> GraphResult<()> {
        if !quad.valid() {
            warn!(quad = ?quad, "Rejected invalid quad");
            return Err(GraphError::InvalidStatement(format!("{:?}", quad)));
        }
        let name = self.local_name(quad.graph, true);
        self.graph_entry(name).add(&quad.statement())
    }

    pub fn add_to_default(&mut self, statement: &Statement) -> GraphResult<()> {
        self.add(&Quad::in_default_graph(*statement))
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        if !quad.valid() {
            return false;
        }
        self.lookup(quad.graph)
            .is_some_and(|graph| graph.contains(&quad.statement()))
    }

    /// Quads across all graphs.
    pub fn len(&self) -> usize {
        self.graphs.values().map(Graph::len).sum()
    }

    /// Triples in the graph named `graph`; zero for unknown graphs.
    pub fn len_of<N: Copy + Into<Node>>(&self, graph: &N) -> usize {
        self.find_graph(graph).map_or(0, Graph::len)
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.values().all(Graph::is_empty)
    }

    /// Graphs are named by an IRI or a blank node.
    pub fn find_graph<N: Copy + Into<Node>>(&self, name: &N) -> Option<&Graph> {
        self.lookup((*name).into())
    }

    /// The graph named `name`, created empty if it does not exist yet.
    pub fn graph_mut(&mut self, name: &Iri) -> &mut Graph {
        let name = self.local_name(Node::from(*name), true);
        self.graph_entry(name)
    }

    /// Names of all graphs, the default graph's reserved IRI included.
    pub fn graph_names(&self) -> impl Iterator<Item = Node> + '_ {
        self.graphs.keys().map(|&handle| Node::from_handle(handle))
    }

    /// Every quad. Quads of the default graph carry its reserved IRI.
    pub fn iter(&self) -> impl Iterator<Item = Quad> + '_ {
        self.graphs.iter().flat_map(|(&name, graph)| {
            graph.iter().map(move |statement| Quad {
                graph: Node::from_handle(name),
                subject: statement.subject,
                predicate: statement.predicate,
                object: statement.object,
            })
        })
    }

    /// Lazily matches `pattern`. A bound graph position restricts matching
    /// to that graph; a variable one ranges over all graphs.
    pub fn match_pattern(&self, pattern: &QuadPattern) -> GraphResult<QuadSolutionIter<'_>> {
        if !pattern.valid() {
            return Err(GraphError::InvalidPattern(format!("{:?}", pattern)));
        }

        if let Some(variable) = pattern.graph.as_variable() {
            return Ok(QuadSolutionIter::across_graphs(
                variable,
                pattern.triple_pattern(),
                self.graphs.iter(),
            ));
        }

        Ok(match self.lookup(pattern.graph) {
            Some(graph) => QuadSolutionIter::single(graph.match_valid(pattern.triple_pattern())),
            None => QuadSolutionIter::empty(),
        })
    }

    /// Graph name in this dataset's storage; null graph means the default
    /// graph. Without `create` the result is null if the name was never
    /// interned here.
    fn local_name(&self, graph: Node, create: bool) -> Node {
        if graph.is_null() {
            return self.default_graph_name().into();
        }
        if create {
            graph.to_node_storage(&self.storage)
        } else {
            graph.try_get_in_node_storage(&self.storage)
        }
    }

    fn lookup(&self, graph: Node) -> Option<&Graph> {
        let name = self.local_name(graph, false);
        if name.is_null() {
            return None;
        }
        self.graphs.get(&name.handle())
    }

    fn graph_entry(&mut self, name: Node) -> &mut Graph {
        let storage = &self.storage;
        self.graphs.entry(name.handle()).or_insert_with(|| {
            debug!(graph = %name, storage = %storage.id(), "Creating graph");
            Graph::with_storage(storage.clone())
        })
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("storage", &self.storage.id())
            .field("graphs", &self.graphs.len())
            .finish()
    }
}
