//! Path finding - shortest reasoning chains between concepts.
//!
//! The search is a breadth-first walk over outgoing edges only. Concepts are
//! expanded in the order they are discovered and each concept's edges in
//! insertion order, so equal-length paths always resolve to the one whose
//! edges were discovered first.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{GraphError, Result};
use crate::store::{ConceptStore, Relation};

/// Relation label recorded for a direct lookup.
pub const LOOKUP_RELATION: &str = "lookup";

/// Relation label recorded for the start of a zero-hop path.
pub const ORIGIN_RELATION: &str = "origin";

/// One hop or one lookup in a reasoning trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningStep {
    pub concept: String,
    pub relation: String,
    /// Concept reached by this step; `None` for lookups and origins.
    pub target: Option<String>,
}

impl ReasoningStep {
    /// A traversal of one edge.
    pub fn hop(relation: &Relation) -> Self {
        Self {
            concept: relation.source.clone(),
            relation: relation.label.clone(),
            target: Some(relation.target.clone()),
        }
    }

    /// A direct read of a concept.
    pub fn lookup(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            relation: LOOKUP_RELATION.to_string(),
            target: None,
        }
    }

    /// The starting concept of a path that never leaves it.
    pub fn origin(concept: impl Into<String>) -> Self {
        Self {
            concept: concept.into(),
            relation: ORIGIN_RELATION.to_string(),
            target: None,
        }
    }

    pub fn is_hop(&self) -> bool {
        self.target.is_some()
    }
}

impl std::fmt::Display for ReasoningStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            Some(target) => write!(f, "{} {} {}", self.concept, self.relation, target),
            None => write!(f, "{} ({})", self.concept, self.relation),
        }
    }
}

/// A reasoning chain from one concept to another.
///
/// A path between distinct concepts holds one hop step per edge. A path
/// from a concept to itself holds a single origin step and no hops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasoningPath {
    pub steps: Vec<ReasoningStep>,
}

impl ReasoningPath {
    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_hop()).count()
    }

    /// Confidence in the chain: `1 / (1 + hops)`.
    pub fn confidence(&self) -> f64 {
        1.0 / (1.0 + self.hop_count() as f64)
    }

    /// First concept on the path.
    pub fn start(&self) -> Option<&str> {
        self.steps.first().map(|s| s.concept.as_str())
    }

    /// Last concept on the path.
    pub fn end(&self) -> Option<&str> {
        self.steps
            .last()
            .map(|s| s.target.as_deref().unwrap_or(s.concept.as_str()))
    }

    /// Concatenate the hops as "source relation target" sentences.
    pub fn explanation(&self) -> String {
        if self.hop_count() == 0 {
            return self.start().unwrap_or_default().to_string();
        }

        self.steps
            .iter()
            .filter(|s| s.is_hop())
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Computes shortest reasoning chains over a store.
///
/// No results are cached between calls; each query is O(V + E).
#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'a> {
    store: &'a ConceptStore,
}

impl<'a> PathFinder<'a> {
    pub fn new(store: &'a ConceptStore) -> Self {
        Self { store }
    }

    /// Find the shortest directed path from `source` to `target`.
    ///
    /// # Algorithm
    ///
    /// 1. Seed the queue with `source`
    /// 2. Pop concepts in FIFO order and walk their outgoing edges in
    ///    insertion order
    /// 3. The first edge that discovers `target` fixes the path
    /// 4. Rebuild the chain by following each concept's discovering edge
    pub fn find_path(&self, source: &str, target: &str) -> Result<ReasoningPath> {
        self.store.lookup(source)?;
        self.store.lookup(target)?;

        if source == target {
            return Ok(ReasoningPath {
                steps: vec![ReasoningStep::origin(source)],
            });
        }

        let mut discovered_by: HashMap<&str, &Relation> = HashMap::new();
        let mut visited: HashSet<&str> = HashSet::from([source]);
        let mut queue: VecDeque<&str> = VecDeque::from([source]);

        while let Some(current) = queue.pop_front() {
            for rel in self.store.outgoing(current) {
                let next = rel.target.as_str();
                if !visited.insert(next) {
                    continue;
                }
                discovered_by.insert(next, rel);

                if next == target {
                    let path = Self::unwind(&discovered_by, source, target);
                    tracing::debug!(
                        from = %source,
                        to = %target,
                        hops = path.hop_count(),
                        "found reasoning path"
                    );
                    return Ok(path);
                }
                queue.push_back(next);
            }
        }

        Err(GraphError::NoPath {
            from: source.to_string(),
            to: target.to_string(),
        })
    }

    fn unwind(discovered_by: &HashMap<&str, &Relation>, source: &str, target: &str) -> ReasoningPath {
        let mut steps = Vec::new();
        let mut cursor = target;

        while cursor != source {
            match discovered_by.get(cursor) {
                Some(rel) => {
                    steps.push(ReasoningStep::hop(rel));
                    cursor = rel.source.as_str();
                }
                None => break,
            }
        }

        steps.reverse();
        ReasoningPath { steps }
    }

    /// Concepts within `depth` hops of `name`, ignoring edge direction.
    ///
    /// Results are in discovery order and exclude `name` itself.
    pub fn related(&self, name: &str, depth: usize) -> Result<Vec<&'a str>> {
        let start = self.store.lookup(name)?.name.as_str();

        let mut seen: HashSet<&str> = HashSet::from([start]);
        let mut frontier = vec![start];
        let mut related = Vec::new();

        for _ in 0..depth {
            let mut next_frontier = Vec::new();

            for concept in frontier {
                let outgoing = self.store.outgoing(concept).iter().map(|r| r.target.as_str());
                let incoming = self.store.incoming(concept).iter().map(|r| r.source.as_str());

                for other in outgoing.chain(incoming) {
                    if seen.insert(other) {
                        related.push(other);
                        next_frontier.push(other);
                    }
                }
            }

            if next_frontier.is_empty() {
                break;
            }
            frontier = next_frontier;
        }

        Ok(related)
    }
}

impl ConceptStore {
    /// Shortest directed path; see [`PathFinder::find_path`].
    pub fn find_path(&self, source: &str, target: &str) -> Result<ReasoningPath> {
        PathFinder::new(self).find_path(source, target)
    }
}
