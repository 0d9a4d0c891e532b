//! Concept and relation records - the nodes and edges of the graph.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named node in the knowledge graph.
///
/// Names are case-sensitive and unique within a store. Extra attributes
/// live in `metadata` rather than on the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,

    /// Free-form category label (e.g. "value", "political_system").
    pub category: String,

    pub definition: Option<String>,

    /// Open-ended attributes (e.g. "importance": 0.9).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Concept {
    /// Create a concept with no definition.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            definition: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Set the definition. An empty string counts as no definition.
    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        let definition = definition.into();
        self.definition = (!definition.is_empty()).then_some(definition);
        self
    }

    /// Attach a metadata attribute.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn has_definition(&self) -> bool {
        self.definition.is_some()
    }
}

/// A directed, labeled edge between two concepts.
///
/// Two relations are the same edge only when source, target and label all
/// match; different labels between the same pair are distinct edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    pub source: String,
    pub target: String,
    pub label: String,
}

impl Relation {
    pub fn new(source: impl Into<String>, target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} --[{}]--> {}", self.source, self.label, self.target)
    }
}

/// Which side of a concept's edges to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Outgoing,
    Incoming,
}
