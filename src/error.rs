//! Error types for ingestion and aggregation.
//!
//! Every error exposes an [`ErrorKind`] so the boundary layer can map it to a
//! transport-specific code without matching on concrete variants.

use serde::Serialize;
use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for persistence operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Coarse error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input; resubmit with corrected data.
    Validation,
    /// Fingerprint already stored.
    Duplicate,
    /// Backing store failure.
    Storage,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Duplicate => "duplicate",
            ErrorKind::Storage => "storage",
        }
    }
}

/// Errors reported by an [`EventStore`](crate::storage::EventStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The uniqueness constraint on the fingerprint rejected the insert.
    #[error("duplicate event fingerprint: {0}")]
    Duplicate(String),

    /// Any other backend failure.
    #[error("storage backend error: {0}")]
    Backend(#[source] anyhow::Error),
}

impl StoreError {
    /// Build a backend error from a plain message.
    pub fn backend(message: impl std::fmt::Display) -> Self {
        StoreError::Backend(anyhow::anyhow!("{}", message))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Duplicate(_) => ErrorKind::Duplicate,
            StoreError::Backend(_) => ErrorKind::Storage,
        }
    }
}

/// Errors surfaced to the caller of the engines.
#[derive(Error, Debug)]
pub enum Error {
    /// Request-level validation failure.
    #[error("validation error: {0}")]
    Validation(String),

    /// The statistics query could not be served.
    #[error("query error: {0}")]
    Query(#[source] StoreError),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Query(e) => e.kind(),
        }
    }
}
