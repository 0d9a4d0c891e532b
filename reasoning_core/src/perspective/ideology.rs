//! Ideology definitions - weighted values plus reasoning principles.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ReasoningError, Result};

/// A named value system used to score situations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ideology {
    pub name: String,

    /// Value label -> importance (0.0 - 1.0). Order carries no meaning.
    pub values: BTreeMap<String, f64>,

    /// Rules or beliefs, in the order they were taught.
    pub principles: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Case studies illustrating the ideology.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

impl Ideology {
    /// Create an ideology with no values or principles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: BTreeMap::new(),
            principles: Vec::new(),
            description: None,
            examples: Vec::new(),
        }
    }

    /// Add a weighted value. Weights are checked by [`Ideology::validate`],
    /// not clamped.
    pub fn with_value(mut self, label: impl Into<String>, weight: f64) -> Self {
        self.values.insert(label.into(), weight);
        self
    }

    pub fn with_principle(mut self, principle: impl Into<String>) -> Self {
        self.principles.push(principle.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Reject any weight outside [0, 1] (NaN included).
    pub fn validate(&self) -> Result<()> {
        match self
            .values
            .iter()
            .find(|(_, weight)| !(0.0..=1.0).contains(*weight))
        {
            Some((value, weight)) => Err(ReasoningError::InvalidWeight {
                value: value.clone(),
                weight: *weight,
            }),
            None => Ok(()),
        }
    }

    /// Values by priority: weight descending, then label.
    pub fn ranked_values(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self
            .values
            .iter()
            .map(|(label, weight)| (label.as_str(), *weight))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}
