//! Feature modules
//!
//! - nodes/   : typed node handles over a registered storage
//! - query/   : statements, patterns and solutions
//! - graph/   : triple set with single-pattern matching
//! - dataset/ : named graphs with quad-pattern matching

pub mod dataset;
pub mod graph;
pub mod nodes;
pub mod query;
