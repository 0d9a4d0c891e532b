//! Errors raised while answering questions and scoring perspectives.

use concept_graph::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum ReasoningError {
    /// Missing concepts and missing paths from the graph layer.
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("no known concept mentioned in question: {question:?}")]
    UnrecognizedQuestion { question: String },

    #[error("unknown ideology: {name}")]
    UnknownIdeology { name: String },

    #[error("comparison needs at least two distinct ideologies, got {distinct}")]
    InsufficientPerspectives { distinct: usize },

    #[error("weight {weight} for value '{value}' is outside [0, 1]")]
    InvalidWeight { value: String, weight: f64 },

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReasoningError>;
