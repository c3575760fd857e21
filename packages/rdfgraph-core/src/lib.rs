/*
 * rdfgraph-core - RDF graphs over interned nodes
 *
 * Feature-First Architecture:
 * - features/nodes   : Node, Iri, BlankNode, Literal, Variable
 * - features/query   : Statement, Quad, patterns, Solution
 * - features/graph   : Graph (triple set, pattern matching)
 * - features/dataset : Dataset (named graphs, quad matching)
 *
 * Node identity and interning live in rdfgraph-storage; every node here is
 * a Copy handle into one registered NodeStorage.
 */

pub mod errors;
pub mod features;

pub use errors::{GraphError, GraphResult};
pub use features::dataset::{Dataset, QuadSolutionIter};
pub use features::graph::{Graph, SolutionIter};
pub use features::nodes::{BlankNode, Iri, Literal, Node, Variable};
pub use features::query::{Quad, QuadPattern, Solution, Statement, TriplePattern};

pub use rdfgraph_storage::{
    default_instance, LiteralType, LiteralValue, NodeStorage, NodeStorageId, StorageConfig,
};
