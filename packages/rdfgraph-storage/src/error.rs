//! Error types for rdfgraph-storage

use std::fmt;
use thiserror::Error;

/// Storage error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Every registry slot is claimed
    RegistryFull,
    /// `register_backend_at` targeted a claimed slot
    SlotOccupied,
    /// Storage tag outside the registry
    InvalidStorageId,
    /// Backend view requested for an id this instance never handed out
    NodeNotFound,
    /// Weak reference outlived its backend
    WeakExpired,
    /// Configuration errors
    Config,
    /// Metrics registration errors
    Metrics,
    /// Serialization/deserialization errors
    Serialization,
    /// I/O errors
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::RegistryFull => "registry_full",
            ErrorKind::SlotOccupied => "slot_occupied",
            ErrorKind::InvalidStorageId => "invalid_storage_id",
            ErrorKind::NodeNotFound => "node_not_found",
            ErrorKind::WeakExpired => "weak_expired",
            ErrorKind::Config => "config",
            ErrorKind::Metrics => "metrics",
            ErrorKind::Serialization => "serialization",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Storage error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StorageError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StorageError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn registry_full(capacity: usize) -> Self {
        Self::new(
            ErrorKind::RegistryFull,
            format!("Maximum number of backend instances exceeded ({})", capacity),
        )
    }

    pub fn slot_occupied(id: u16) -> Self {
        Self::new(
            ErrorKind::SlotOccupied,
            format!("Storage slot {} is already occupied", id),
        )
    }

    pub fn invalid_storage_id(id: u16) -> Self {
        Self::new(
            ErrorKind::InvalidStorageId,
            format!("Storage id {} is outside the registry", id),
        )
    }

    pub fn node_not_found(kind: &str, id: u64) -> Self {
        Self::new(
            ErrorKind::NodeNotFound,
            format!("Did not find {} node for given id {}", kind, id),
        )
    }

    pub fn weak_expired() -> Self {
        Self::new(
            ErrorKind::WeakExpired,
            "WeakNodeStorage lifetime error: referenced backend is no longer alive",
        )
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }
}

impl From<serde_yaml::Error> for StorageError {
    fn from(err: serde_yaml::Error) -> Self {
        StorageError::serialization(format!("YAML error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::serialization(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::new(ErrorKind::IO, format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<prometheus::Error> for StorageError {
    fn from(err: prometheus::Error) -> Self {
        StorageError::new(ErrorKind::Metrics, format!("Metrics error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StorageError>;
