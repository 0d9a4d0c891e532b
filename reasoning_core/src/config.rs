//! Tuning for question routing and perspective scoring.
//!
//! Every field has a built-in default, so a TOML file only needs the keys it
//! changes:
//!
//! ```toml
//! [router]
//! definitional_cues = ["what", "define"]
//!
//! [perspective]
//! divergence_threshold = 0.3
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

/// Configuration for question classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Words that mark a question as asking for a definition.
    pub definitional_cues: Vec<String>,

    /// Only count a concept as mentioned when it is not part of a longer word.
    pub whole_word_mentions: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            definitional_cues: ["what", "define", "definition", "meaning", "who"]
                .into_iter()
                .map(String::from)
                .collect(),
            whole_word_mentions: true,
        }
    }
}

/// Configuration for situation scoring and comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerspectiveConfig {
    /// Minimum weight gap for a value to count as a divergence.
    pub divergence_threshold: f64,

    /// Shorter tokens are ignored when matching keywords.
    pub min_keyword_len: usize,

    /// Shortest word that may match a longer one as a prefix.
    pub min_prefix_len: usize,

    /// Tokens that never count as shared keywords.
    pub stop_words: Vec<String>,

    /// Extra keywords per value label (lowercase label -> keywords).
    pub related_keywords: BTreeMap<String, Vec<String>>,

    /// Advice rules tried in order by `analyze`; the first that fires wins.
    pub recommendation_rules: Vec<RecommendationRule>,

    /// Compare declared values when no ideology's values match the text.
    pub fallback_to_all_values: bool,
}

/// A value weight that must be strictly exceeded for a rule to fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueThreshold {
    pub value: String,
    pub above: f64,
}

/// Situation-specific advice.
///
/// Fires when the situation shares a keyword with `cues` and the ideology
/// weighs any of `when_any` above its threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRule {
    pub cues: Vec<String>,
    pub when_any: Vec<ValueThreshold>,
    pub advice: String,
}

impl RecommendationRule {
    fn new(cues: &[&str], when_any: &[(&str, f64)], advice: &str) -> Self {
        Self {
            cues: cues.iter().map(|c| c.to_string()).collect(),
            when_any: when_any
                .iter()
                .map(|(value, above)| ValueThreshold {
                    value: value.to_string(),
                    above: *above,
                })
                .collect(),
            advice: advice.to_string(),
        }
    }
}

fn default_recommendation_rules() -> Vec<RecommendationRule> {
    let government = ["government", "regulation", "law", "mandate"];
    let economy = ["economy", "market", "business", "wealth"];

    vec![
        RecommendationRule::new(
            &government,
            &[("limited_government", 0.7), ("freedom", 0.8)],
            "Oppose government intervention. Preserve individual freedom and voluntary action.",
        ),
        RecommendationRule::new(
            &government,
            &[("collective_welfare", 0.7), ("equality", 0.8)],
            "Support if it promotes collective welfare and reduces inequality.",
        ),
        RecommendationRule::new(
            &economy,
            &[("free_markets", 0.7)],
            "Let markets operate freely. Minimize restrictions on economic activity.",
        ),
        RecommendationRule::new(
            &economy,
            &[("equality", 0.8)],
            "Ensure economic decisions promote equitable distribution.",
        ),
    ]
}

impl Default for PerspectiveConfig {
    fn default() -> Self {
        let related = [
            ("freedom", &["liberty", "choice", "autonomy"][..]),
            ("equality", &["equal", "fair", "equitable"][..]),
            ("security", &["safe", "protect", "stability"][..]),
            ("property", &["ownership", "private", "assets"][..]),
            ("collective", &["common", "shared", "together"][..]),
        ];

        Self {
            divergence_threshold: 0.2,
            min_keyword_len: 3,
            min_prefix_len: 4,
            stop_words: [
                "the", "and", "for", "with", "that", "this", "from", "are", "was", "were",
                "has", "have", "its", "into", "not", "but", "all", "any", "can", "should",
                "would", "could", "will", "than", "then", "they", "them", "their", "our",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            related_keywords: related
                .into_iter()
                .map(|(value, words)| {
                    (
                        value.to_string(),
                        words.iter().map(|w| w.to_string()).collect(),
                    )
                })
                .collect(),
            recommendation_rules: default_recommendation_rules(),
            fallback_to_all_values: true,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReasoningConfig {
    pub router: RouterConfig,
    pub perspective: PerspectiveConfig,
}

impl ReasoningConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.as_ref().display(), "loaded reasoning config");
        Ok(config)
    }
}
