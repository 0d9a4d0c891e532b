//! Concept Store - owns the directed graph of concepts and labeled relations.
//!
//! The store consists of:
//! - **Concepts**: named nodes, kept in insertion order
//! - **Relations**: directed labeled edges, kept per endpoint in insertion order
//!
//! Insertion order is the deterministic expansion order used by path finding.

mod concept;

pub use concept::*;

use std::collections::{BTreeSet, HashMap};

use crate::error::{GraphError, Result};

/// One entry produced by [`ConceptStore::neighbors`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    pub relation: &'a str,
    pub concept: &'a Concept,
}

/// Summary counts for a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphStats {
    pub concepts: usize,
    pub relations: usize,
    /// Number of distinct categories in use.
    pub categories: usize,
}

/// The main concept graph structure.
///
/// Edges are only created between concepts that already exist, and an
/// identical `(source, target, label)` triple is stored once.
#[derive(Debug, Clone, Default)]
pub struct ConceptStore {
    /// All concepts by name.
    concepts: HashMap<String, Concept>,

    /// Concept names in first-insertion order.
    order: Vec<String>,

    /// Outgoing edges per source (adjacency list).
    outgoing: HashMap<String, Vec<Relation>>,

    /// Incoming edges per target.
    incoming: HashMap<String, Vec<Relation>>,

    relation_count: usize,
}

impl ConceptStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a concept by name.
    ///
    /// Replacing keeps the concept's position in insertion order and all
    /// of its edges. Returns the previous record, if any.
    pub fn upsert(&mut self, concept: Concept) -> Option<Concept> {
        let name = concept.name.clone();
        let previous = self.concepts.insert(name.clone(), concept);

        if previous.is_none() {
            self.order.push(name.clone());
            tracing::debug!(concept = %name, "learned concept");
        } else {
            tracing::debug!(concept = %name, "updated concept");
        }

        previous
    }

    /// Create or replace a concept from its parts.
    pub fn upsert_concept(
        &mut self,
        name: impl Into<String>,
        category: impl Into<String>,
        definition: impl Into<String>,
    ) -> Option<Concept> {
        self.upsert(Concept::new(name, category).with_definition(definition))
    }

    /// Add a directed labeled edge between two existing concepts.
    ///
    /// Returns `true` if the edge was added and `false` if the identical
    /// edge already existed. Fails without touching the store when either
    /// endpoint is missing.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        relation: impl Into<String>,
    ) -> Result<bool> {
        for name in [source, target] {
            if !self.concepts.contains_key(name) {
                tracing::warn!(concept = %name, "refusing edge to unknown concept");
                return Err(GraphError::missing(name));
            }
        }

        let relation = Relation::new(source, target, relation);
        let edges = self.outgoing.entry(source.to_string()).or_default();
        if edges.contains(&relation) {
            return Ok(false);
        }

        tracing::debug!(%relation, "connected concepts");
        edges.push(relation.clone());
        self.incoming
            .entry(target.to_string())
            .or_default()
            .push(relation);
        self.relation_count += 1;

        Ok(true)
    }

    /// Get a concept by name.
    pub fn lookup(&self, name: &str) -> Result<&Concept> {
        self.concepts.get(name).ok_or_else(|| GraphError::missing(name))
    }

    /// Check if a concept exists.
    pub fn contains(&self, name: &str) -> bool {
        self.concepts.contains_key(name)
    }

    /// Remove a concept together with every edge touching it.
    pub fn remove_concept(&mut self, name: &str) -> Result<Concept> {
        let concept = self
            .concepts
            .remove(name)
            .ok_or_else(|| GraphError::missing(name))?;
        self.order.retain(|n| n != name);

        let outgoing = self.outgoing.remove(name).unwrap_or_default();
        let incoming = self.incoming.remove(name).unwrap_or_default();

        for rel in &outgoing {
            if let Some(edges) = self.incoming.get_mut(&rel.target) {
                edges.retain(|e| e != rel);
            }
        }
        for rel in &incoming {
            if let Some(edges) = self.outgoing.get_mut(&rel.source) {
                edges.retain(|e| e != rel);
            }
        }

        // Self-loops appear in both lists but are one edge.
        let self_loops = outgoing.iter().filter(|r| r.is_self_loop()).count();
        let removed = outgoing.len() + incoming.len() - self_loops;
        self.relation_count -= removed;

        tracing::debug!(concept = %name, relations = removed, "removed concept");
        Ok(concept)
    }

    /// Iterate the `(relation, other concept)` pairs on one side of a concept.
    ///
    /// The iterator is finite and follows edge insertion order. Call again to
    /// restart it.
    pub fn neighbors<'a>(
        &'a self,
        name: &str,
        direction: Direction,
    ) -> Result<impl Iterator<Item = Neighbor<'a>> + 'a> {
        if !self.contains(name) {
            return Err(GraphError::missing(name));
        }

        let edges = match direction {
            Direction::Outgoing => self.outgoing.get(name),
            Direction::Incoming => self.incoming.get(name),
        }
        .map(|v| v.as_slice())
        .unwrap_or(&[]);

        Ok(edges.iter().filter_map(move |rel| {
            let other = match direction {
                Direction::Outgoing => &rel.target,
                Direction::Incoming => &rel.source,
            };
            self.concepts.get(other).map(|concept| Neighbor {
                relation: rel.label.as_str(),
                concept,
            })
        }))
    }

    /// Outgoing edges of a concept in insertion order (empty if unknown).
    pub fn outgoing(&self, name: &str) -> &[Relation] {
        self.outgoing.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Incoming edges of a concept in insertion order (empty if unknown).
    pub fn incoming(&self, name: &str) -> &[Relation] {
        self.incoming.get(name).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// All concepts in insertion order.
    pub fn concepts(&self) -> impl Iterator<Item = &Concept> {
        self.order.iter().filter_map(|name| self.concepts.get(name))
    }

    /// All concept names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// All relations, grouped by source in concept insertion order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.order.iter().flat_map(|name| self.outgoing(name).iter())
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    pub fn relation_count(&self) -> usize {
        self.relation_count
    }

    /// Get summary counts.
    pub fn stats(&self) -> GraphStats {
        let categories: BTreeSet<&str> = self
            .concepts
            .values()
            .map(|c| c.category.as_str())
            .collect();

        GraphStats {
            concepts: self.len(),
            relations: self.relation_count,
            categories: categories.len(),
        }
    }

    /// Describe a concept from its definition and its edges.
    pub fn explain(&self, name: &str) -> Result<String> {
        let concept = self.lookup(name)?;
        let mut text = format!("{} ({})", concept.name, concept.category);

        if let Some(definition) = &concept.definition {
            text.push_str(&format!("\nDefinition: {}", definition));
        }

        let outgoing = self.outgoing(name);
        if !outgoing.is_empty() {
            text.push_str("\nThis concept:");
            for rel in outgoing {
                text.push_str(&format!("\n  - {} -> {}", rel.label, rel.target));
            }
        }

        let incoming = self.incoming(name);
        if !incoming.is_empty() {
            text.push_str("\nRelated from:");
            for rel in incoming {
                text.push_str(&format!("\n  - {} --[{}]-> this", rel.source, rel.label));
            }
        }

        Ok(text)
    }
}
