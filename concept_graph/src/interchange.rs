//! Import/export records for a concept store.
//!
//! ```text
//! ConceptStore -> export() -> GraphSnapshot { concepts, edges } -> JSON
//! JSON -> GraphSnapshot -> import() -> ConceptStore
//! ```
//!
//! Concepts are written in insertion order and edges grouped by source in
//! the same order, so re-importing a snapshot reproduces path tie-breaks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::store::{Concept, ConceptStore};

/// A concept as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRecord {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub definition: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// An edge as stored in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub relation: String,
}

/// Serializable contents of a whole store.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub concepts: Vec<ConceptRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&Concept> for ConceptRecord {
    fn from(concept: &Concept) -> Self {
        Self {
            name: concept.name.clone(),
            category: concept.category.clone(),
            definition: concept.definition.clone().unwrap_or_default(),
            metadata: concept.metadata.clone(),
        }
    }
}

impl From<ConceptRecord> for Concept {
    fn from(record: ConceptRecord) -> Self {
        let mut concept = Concept::new(record.name, record.category).with_definition(record.definition);
        concept.metadata = record.metadata;
        concept
    }
}

impl ConceptStore {
    /// Capture every concept and edge.
    pub fn export(&self) -> GraphSnapshot {
        let snapshot = GraphSnapshot {
            concepts: self.concepts().map(ConceptRecord::from).collect(),
            edges: self
                .relations()
                .map(|rel| EdgeRecord {
                    source: rel.source.clone(),
                    target: rel.target.clone(),
                    relation: rel.label.clone(),
                })
                .collect(),
        };

        tracing::info!(
            concepts = snapshot.concepts.len(),
            edges = snapshot.edges.len(),
            "exported concept graph"
        );
        snapshot
    }

    /// Build a new store from a snapshot.
    ///
    /// Records are applied in order. An edge naming an unknown concept fails
    /// the whole import.
    pub fn import(snapshot: GraphSnapshot) -> Result<Self> {
        let mut store = ConceptStore::new();

        for record in snapshot.concepts {
            store.upsert(record.into());
        }
        for edge in snapshot.edges {
            store.connect(&edge.source, &edge.target, edge.relation)?;
        }

        tracing::info!(
            concepts = store.len(),
            edges = store.relation_count(),
            "imported concept graph"
        );
        Ok(store)
    }

    pub fn to_json(&self) -> Result<String> {
        self.export().to_json()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::import(GraphSnapshot::from_json(json)?)
    }
}
