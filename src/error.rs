//! Error types for the tracker.

use crate::types::{CommunicationId, CompanyId, MethodId};
use thiserror::Error;

/// Main error type for tracker operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),

    #[error("Communication method not found: {0}")]
    MethodNotFound(MethodId),

    #[error("Communication not found: {0}")]
    CommunicationNotFound(CommunicationId),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Import rejected: {0}")]
    Import(String),

    #[error("Store is locked by another process")]
    Locked,

    #[error("Store not initialized")]
    NotInitialized,
}

impl From<serde_json::Error> for TrackerError {
    fn from(e: serde_json::Error) -> Self {
        TrackerError::Serialization(e.to_string())
    }
}

/// Result type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;
