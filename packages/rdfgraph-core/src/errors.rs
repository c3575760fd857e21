//! Error types for graph containers and node construction

use rdfgraph_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type GraphResult<T> = Result<T, GraphError>;
