//! Metacognition Router - decides how to answer a question and records how
//! it was answered.
//!
//! Each query runs through a fixed state machine:
//! 1. **Classify**: find known concepts in the text (see [`classify`])
//! 2. **Fast path**: a single concept is answered by direct lookup
//! 3. **Slow path**: two or more concepts are answered by the shortest
//!    reasoning path from the first mention to the last
//! 4. **Failure**: no known concept, or no path, is a typed error
//!
//! The routing rule is deterministic; nothing is learned between queries.

mod classify;
mod trace;

pub use classify::*;
pub use trace::*;

use concept_graph::{ConceptStore, PathFinder, ReasoningStep};
use serde::{Deserialize, Serialize};

use crate::config::RouterConfig;
use crate::error::{ReasoningError, Result};

/// An answer with its confidence and the steps behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer: String,
    /// 1.0 for direct lookups, `1 / (1 + hops)` for traversals.
    pub confidence: f64,
    pub mode: ThinkingMode,
    pub trace: ReasoningTrace,
}

/// What the router would do with a question, without answering it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub classification: Classification,
    pub keywords: Vec<String>,
    /// `None` when no known concept is mentioned.
    pub mode: Option<ThinkingMode>,
}

/// Routes questions to direct lookup or path traversal.
#[derive(Debug, Clone)]
pub struct MetacognitionRouter {
    config: RouterConfig,
}

impl MetacognitionRouter {
    /// Create a router with the given configuration.
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Create a router with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RouterConfig::default())
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Classify a question against the concepts in `store`.
    pub fn classify(&self, store: &ConceptStore, question: &str) -> Classification {
        classify(question, store.names(), &self.config)
    }

    /// Report the routing decision for a question.
    pub fn assess(&self, store: &ConceptStore, question: &str) -> Assessment {
        let classification = self.classify(store, question);
        let mode = match classification.kind {
            QuestionKind::Definitional { .. } | QuestionKind::Descriptive { .. } => {
                Some(ThinkingMode::Fast)
            }
            QuestionKind::Relational { .. } => Some(ThinkingMode::Slow),
            QuestionKind::Unrecognized => None,
        };

        Assessment {
            classification,
            keywords: question_keywords(question),
            mode,
        }
    }

    /// Answer a question from the concepts and relations in `store`.
    pub fn process_question(&self, store: &ConceptStore, question: &str) -> Result<Answer> {
        let classification = self.classify(store, question);
        tracing::debug!(
            question,
            kind = ?classification.kind,
            mentions = classification.mentions.len(),
            "classified question"
        );

        match classification.kind {
            QuestionKind::Definitional { concept } => self.fast_answer(store, question, &concept, true),
            QuestionKind::Descriptive { concept } => self.fast_answer(store, question, &concept, false),
            QuestionKind::Relational { source, target } => {
                self.slow_answer(store, question, &source, &target)
            }
            QuestionKind::Unrecognized => Err(ReasoningError::UnrecognizedQuestion {
                question: question.to_string(),
            }),
        }
    }

    /// Direct lookup. A definitional question gets the definition verbatim;
    /// otherwise (or when there is no definition) the concept is explained
    /// from its edges.
    fn fast_answer(
        &self,
        store: &ConceptStore,
        question: &str,
        concept: &str,
        definitional: bool,
    ) -> Result<Answer> {
        let record = store.lookup(concept)?;
        let answer = match (&record.definition, definitional) {
            (Some(definition), true) => definition.clone(),
            _ => store.explain(concept)?,
        };

        Ok(Answer {
            answer,
            confidence: 1.0,
            mode: ThinkingMode::Fast,
            trace: ReasoningTrace::new(
                question,
                ThinkingMode::Fast,
                vec![ReasoningStep::lookup(concept)],
            ),
        })
    }

    fn slow_answer(
        &self,
        store: &ConceptStore,
        question: &str,
        source: &str,
        target: &str,
    ) -> Result<Answer> {
        let path = PathFinder::new(store).find_path(source, target)?;

        Ok(Answer {
            answer: path.explanation(),
            confidence: path.confidence(),
            mode: ThinkingMode::Slow,
            trace: ReasoningTrace::new(question, ThinkingMode::Slow, path.steps),
        })
    }
}

impl Default for MetacognitionRouter {
    fn default() -> Self {
        Self::with_defaults()
    }
}
