//! Errors raised by the concept graph.

/// Failures reported by `ConceptStore` and `PathFinder`.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("concept not found: {name}")]
    MissingConcept { name: String },

    #[error("no path from '{from}' to '{to}'")]
    NoPath { from: String, to: String },

    #[error("interchange error: {0}")]
    Interchange(#[from] serde_json::Error),
}

impl GraphError {
    pub(crate) fn missing(name: impl Into<String>) -> Self {
        GraphError::MissingConcept { name: name.into() }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
