//! Reasoning traces returned with every answer.

use concept_graph::ReasoningStep;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a reasoning trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceId(pub Uuid);

impl TraceId {
    /// Create a new random trace ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which reasoning system produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThinkingMode {
    /// Direct lookup of a single concept.
    Fast,
    /// Multi-hop traversal between concepts.
    Slow,
}

/// The ordered steps taken to answer one question.
///
/// Traces belong to the caller; nothing is accumulated between queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningTrace {
    pub id: TraceId,
    pub question: String,
    pub mode: ThinkingMode,
    pub steps: Vec<ReasoningStep>,
}

impl ReasoningTrace {
    pub fn new(question: impl Into<String>, mode: ThinkingMode, steps: Vec<ReasoningStep>) -> Self {
        Self {
            id: TraceId::new(),
            question: question.into(),
            mode,
            steps,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReasoningStep> {
        self.steps.iter()
    }
}
