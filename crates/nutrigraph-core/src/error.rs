//! Error types for NutriGraph operations.
//!
//! Query functions over a loaded graph are total and do not return errors.
//! Failures only arise at the loading boundary and at lookups by id.

use thiserror::Error;

/// Result type for NutriGraph operations.
pub type Result<T> = std::result::Result<T, NutriError>;

/// Errors that can occur while loading or addressing the evidence graph.
#[derive(Debug, Error)]
pub enum NutriError {
    /// The graph has not finished loading yet.
    #[error("Graph is not loaded yet")]
    NotReady,

    /// The data source failed; the engine has no graph to serve.
    #[error("Graph data unavailable: {0}")]
    Unavailable(String),

    /// A session was completed twice.
    #[error("Graph session already completed")]
    AlreadyLoaded,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },
}

impl NutriError {
    pub fn node_not_found(id: impl Into<String>) -> Self {
        NutriError::NodeNotFound(id.into())
    }

    pub fn invalid_config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        NutriError::InvalidConfig {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error describes a data-source failure rather than a bad request.
    pub fn is_source_failure(&self) -> bool {
        matches!(
            self,
            NutriError::Unavailable(_) | NutriError::Io(_) | NutriError::Parse(_)
        )
    }
}
