//! Perspective Engine - scores situations against taught ideologies.
//!
//! Scoring works as follows:
//! 1. **Profile**: split the situation into words and keywords
//! 2. **Match**: a value is implicated when its label appears as a phrase
//!    (direct) or one of its keywords appears (indirect)
//! 3. **Rank**: implicated values sorted by weight, then label
//! 4. **Principles**: keep the principles sharing a keyword with the text
//!
//! Comparison scores each ideology and reports, for every pair, the values
//! one side weighs at least `divergence_threshold` above the other, plus
//! every value one side matched and the other did not. When no ideology
//! matches anything, their declared values are compared instead.

mod ideology;
mod keywords;

pub use ideology::*;
pub use keywords::{keywords, keywords_match, words};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::PerspectiveConfig;
use crate::error::{ReasoningError, Result};
use keywords::TextProfile;

/// Slack for float rounding when comparing weight gaps to the threshold.
const WEIGHT_EPSILON: f64 = 1e-9;

/// How strongly a situation touches a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueImpact {
    /// The value label itself appears in the situation.
    Direct,
    /// A keyword of the value appears in the situation.
    Indirect,
    Minimal,
}

impl ValueImpact {
    pub fn is_implicated(&self) -> bool {
        !matches!(self, ValueImpact::Minimal)
    }
}

/// A value that took part in a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMatch {
    pub value: String,
    pub weight: f64,
    pub impact: ValueImpact,
}

/// An ideology's reading of one situation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveScore {
    pub ideology: String,
    /// Matched values, weight descending then label.
    pub matches: Vec<ValueMatch>,
    /// Sum of matched weights; 0.0 when nothing matched.
    pub total: f64,
    /// Principles sharing a keyword with the situation, in taught order.
    pub principles: Vec<String>,
    /// Every declared value, ranked like `matches`. Only filled when
    /// nothing matched and `fallback_to_all_values` is set.
    pub fallback: Vec<ValueMatch>,
}

impl PerspectiveScore {
    /// Weight of a value in this score's matched set.
    pub fn weight_of(&self, value: &str) -> Option<f64> {
        self.matches
            .iter()
            .find(|m| m.value == value)
            .map(|m| m.weight)
    }

    fn values(&self, use_fallback: bool) -> &[ValueMatch] {
        if use_fallback {
            &self.fallback
        } else {
            &self.matches
        }
    }
}

/// A value weighed materially differently by two ideologies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divergence {
    pub value: String,
    /// The ideology weighing the value higher.
    pub favored_by: String,
    pub other: String,
    pub favored_weight: f64,
    /// `None` when the value is absent from the other's compared set.
    pub other_weight: Option<f64>,
    /// Equals `favored_weight` when `other_weight` is `None`.
    pub difference: f64,
}

impl std::fmt::Display for Divergence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} prioritizes {} ({:.2}) over {} ({})",
            self.favored_by,
            self.value,
            self.favored_weight,
            self.other,
            self.other_weight
                .map(|w| format!("{:.2}", w))
                .unwrap_or_else(|| "absent".to_string())
        )
    }
}

/// Result of comparing several ideologies on one situation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub situation: String,
    /// One score per distinct ideology, in request order.
    pub scores: Vec<PerspectiveScore>,
    /// Largest weight difference first.
    pub divergences: Vec<Divergence>,
    pub synthesis: String,
    /// Set when no ideology matched the situation and declared values
    /// were compared instead.
    pub fallback: bool,
}

/// One value's line in a [`PerspectiveAnalysis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAssessment {
    pub value: String,
    pub weight: f64,
    pub impact: ValueImpact,
}

/// Full reading of a situation through one ideology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveAnalysis {
    pub ideology: String,
    pub situation: String,
    pub description: Option<String>,
    /// Every declared value by priority.
    pub values: Vec<ValueAssessment>,
    pub principles: Vec<String>,
    pub recommendation: String,
}

/// Stores ideologies and scores situations against them.
#[derive(Debug, Clone, Default)]
pub struct PerspectiveEngine {
    ideologies: HashMap<String, Ideology>,
    /// Ideology names in first-taught order.
    order: Vec<String>,
    config: PerspectiveConfig,
}

impl PerspectiveEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: PerspectiveConfig) -> Self {
        Self {
            ideologies: HashMap::new(),
            order: Vec::new(),
            config,
        }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(PerspectiveConfig::default())
    }

    pub fn config(&self) -> &PerspectiveConfig {
        &self.config
    }

    /// Create or replace an ideology by name.
    ///
    /// Fails with `InvalidWeight` (leaving the engine unchanged) when any
    /// weight is outside [0, 1]. Returns the replaced ideology, if any.
    pub fn teach_ideology(&mut self, ideology: Ideology) -> Result<Option<Ideology>> {
        if let Err(err) = ideology.validate() {
            tracing::warn!(ideology = %ideology.name, error = %err, "rejected ideology");
            return Err(err);
        }

        let name = ideology.name.clone();
        let previous = self.ideologies.insert(name.clone(), ideology);
        if previous.is_none() {
            self.order.push(name.clone());
        }
        tracing::debug!(ideology = %name, replaced = previous.is_some(), "learned ideology");

        Ok(previous)
    }

    /// Create or replace an ideology from its values and principles.
    pub fn teach<K, S>(
        &mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = (K, f64)>,
        principles: impl IntoIterator<Item = S>,
    ) -> Result<Option<Ideology>>
    where
        K: Into<String>,
        S: Into<String>,
    {
        let mut ideology = Ideology::new(name);
        ideology.values = values.into_iter().map(|(k, w)| (k.into(), w)).collect();
        ideology.principles = principles.into_iter().map(Into::into).collect();
        self.teach_ideology(ideology)
    }

    pub fn get(&self, name: &str) -> Option<&Ideology> {
        self.ideologies.get(name)
    }

    fn require(&self, name: &str) -> Result<&Ideology> {
        self.ideologies
            .get(name)
            .ok_or_else(|| ReasoningError::UnknownIdeology {
                name: name.to_string(),
            })
    }

    /// Ideology names in first-taught order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn remove(&mut self, name: &str) -> Option<Ideology> {
        let removed = self.ideologies.remove(name)?;
        self.order.retain(|n| n != name);
        tracing::debug!(ideology = %name, "removed ideology");
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.ideologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ideologies.is_empty()
    }

    fn impact(&self, label: &str, profile: &TextProfile) -> ValueImpact {
        let label_words = words(label);
        if profile.contains_phrase(&label_words) {
            return ValueImpact::Direct;
        }

        let mut candidates = keywords(label, &self.config);
        let related = &self.config.related_keywords;
        for key in std::iter::once(label.to_lowercase()).chain(label_words) {
            if let Some(extra) = related.get(&key) {
                candidates.extend(extra.iter().map(|w| w.to_lowercase()));
            }
        }

        if profile.shares_keyword(&candidates) {
            ValueImpact::Indirect
        } else {
            ValueImpact::Minimal
        }
    }

    fn relevant_principles(&self, ideology: &Ideology, profile: &TextProfile) -> Vec<String> {
        ideology
            .principles
            .iter()
            .filter(|p| profile.shares_keyword(&keywords(p, &self.config)))
            .cloned()
            .collect()
    }

    /// Score a situation against one ideology.
    pub fn score(&self, situation: &str, ideology_name: &str) -> Result<PerspectiveScore> {
        let ideology = self.require(ideology_name)?;
        let profile = TextProfile::new(situation, &self.config);

        let mut matches: Vec<ValueMatch> = ideology
            .values
            .iter()
            .filter_map(|(label, weight)| {
                let impact = self.impact(label, &profile);
                impact.is_implicated().then(|| ValueMatch {
                    value: label.clone(),
                    weight: *weight,
                    impact,
                })
            })
            .collect();

        matches.sort_by(|a, b| b.weight.total_cmp(&a.weight).then_with(|| a.value.cmp(&b.value)));
        let total: f64 = matches.iter().map(|m| m.weight).sum();

        let fallback: Vec<ValueMatch> = if matches.is_empty() && self.config.fallback_to_all_values {
            ideology
                .ranked_values()
                .into_iter()
                .map(|(label, weight)| ValueMatch {
                    value: label.to_string(),
                    weight,
                    impact: ValueImpact::Minimal,
                })
                .collect()
        } else {
            Vec::new()
        };

        tracing::debug!(
            ideology = %ideology_name,
            matched = matches.len(),
            total,
            fallback = !fallback.is_empty(),
            "scored situation"
        );

        Ok(PerspectiveScore {
            ideology: ideology.name.clone(),
            matches,
            total,
            principles: self.relevant_principles(ideology, &profile),
            fallback,
        })
    }

    /// Compare how several ideologies read the same situation.
    ///
    /// Repeated names are collapsed first; fewer than two distinct names
    /// fail with `InsufficientPerspectives`.
    pub fn compare<S: AsRef<str>>(&self, situation: &str, ideology_names: &[S]) -> Result<Comparison> {
        let mut distinct: Vec<&str> = Vec::new();
        for name in ideology_names {
            if !distinct.contains(&name.as_ref()) {
                distinct.push(name.as_ref());
            }
        }
        if distinct.len() < 2 {
            return Err(ReasoningError::InsufficientPerspectives {
                distinct: distinct.len(),
            });
        }

        let scores = distinct
            .iter()
            .map(|name| self.score(situation, name))
            .collect::<Result<Vec<_>>>()?;

        let fallback = scores.iter().all(|s| s.matches.is_empty());
        let mut divergences = Vec::new();
        for (i, a) in scores.iter().enumerate() {
            for b in &scores[i + 1..] {
                divergences.extend(self.diverge(a, b, fallback));
                divergences.extend(self.diverge(b, a, fallback));
            }
        }
        divergences.sort_by(|x, y| {
            y.difference
                .total_cmp(&x.difference)
                .then_with(|| x.value.cmp(&y.value))
                .then_with(|| x.favored_by.cmp(&y.favored_by))
                .then_with(|| x.other.cmp(&y.other))
        });

        let synthesis = if divergences.is_empty() {
            format!("No material divergence between {}.", distinct.join(", "))
        } else {
            divergences
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        };

        Ok(Comparison {
            situation: situation.to_string(),
            scores,
            divergences,
            synthesis,
            fallback,
        })
    }

    /// Values `a` has and `b` lacks, and values `a` weighs at least the
    /// threshold above `b`.
    fn diverge(&self, a: &PerspectiveScore, b: &PerspectiveScore, fallback: bool) -> Vec<Divergence> {
        let theirs = b.values(fallback);
        a.values(fallback)
            .iter()
            .filter_map(|m| {
                let other_weight = theirs.iter().find(|o| o.value == m.value).map(|o| o.weight);
                let difference = m.weight - other_weight.unwrap_or(0.0);
                let diverges = match other_weight {
                    None => true,
                    Some(_) => difference + WEIGHT_EPSILON >= self.config.divergence_threshold,
                };
                diverges.then(|| Divergence {
                    value: m.value.clone(),
                    favored_by: a.ideology.clone(),
                    other: b.ideology.clone(),
                    favored_weight: m.weight,
                    other_weight,
                    difference,
                })
            })
            .collect()
    }

    /// Read a situation through one ideology: every value with its impact,
    /// the relevant principles, and a recommendation.
    pub fn analyze(&self, situation: &str, ideology_name: &str) -> Result<PerspectiveAnalysis> {
        let ideology = self.require(ideology_name)?;
        let profile = TextProfile::new(situation, &self.config);

        let values: Vec<ValueAssessment> = ideology
            .ranked_values()
            .into_iter()
            .map(|(label, weight)| ValueAssessment {
                value: label.to_string(),
                weight,
                impact: self.impact(label, &profile),
            })
            .collect();

        let recommendation = self.recommend(ideology, &profile, &values);

        Ok(PerspectiveAnalysis {
            ideology: ideology.name.clone(),
            situation: situation.to_string(),
            description: ideology.description.clone(),
            values,
            principles: self.relevant_principles(ideology, &profile),
            recommendation,
        })
    }

    /// The first configured rule that fires, else the highest weighted
    /// implicated value, else the top value.
    fn recommend(&self, ideology: &Ideology, profile: &TextProfile, values: &[ValueAssessment]) -> String {
        let rule = self.config.recommendation_rules.iter().find(|rule| {
            profile.shares_keyword(&rule.cues)
                && rule.when_any.iter().any(|t| {
                    ideology
                        .values
                        .get(&t.value)
                        .is_some_and(|weight| *weight > t.above)
                })
        });
        if let Some(rule) = rule {
            return rule.advice.clone();
        }

        values
            .iter()
            .find(|v| v.impact.is_implicated())
            .or_else(|| values.first())
            .map(|v| format!("Prioritize {} in decision-making.", v.value))
            .unwrap_or_else(|| format!("{} declares no values to weigh.", ideology.name))
    }

    /// All ideologies as a JSON array, in first-taught order.
    pub fn export_json(&self) -> Result<String> {
        let ideologies: Vec<&Ideology> = self
            .order
            .iter()
            .filter_map(|name| self.ideologies.get(name))
            .collect();
        let json = serde_json::to_string_pretty(&ideologies)?;
        tracing::info!(ideologies = ideologies.len(), "exported ideologies");
        Ok(json)
    }

    /// Teach every ideology in a JSON array.
    ///
    /// All entries are validated before any is applied, so one bad weight
    /// rejects the whole import. Returns the number of ideologies taught.
    pub fn import_json(&mut self, json: &str) -> Result<usize> {
        let ideologies: Vec<Ideology> = serde_json::from_str(json)?;
        for ideology in &ideologies {
            ideology.validate()?;
        }

        let count = ideologies.len();
        for ideology in ideologies {
            self.teach_ideology(ideology)?;
        }
        tracing::info!(ideologies = count, "imported ideologies");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn setup_test_engine() -> PerspectiveEngine {
        let mut engine = PerspectiveEngine::with_defaults();
        engine
            .teach(
                "Libertarianism",
                [("individual_freedom", 0.95), ("limited_government", 0.9), ("security", 0.7)],
                ["Minimize government intervention", "Protect private property"],
            )
            .unwrap();
        engine
            .teach(
                "Socialism",
                [("equality", 0.95), ("individual_freedom", 0.4), ("security", 0.8)],
                ["Reduce inequality through redistribution", "Guarantee basic needs for all"],
            )
            .unwrap();
        engine
    }

    fn labels(score: &PerspectiveScore) -> Vec<&str> {
        score.matches.iter().map(|m| m.value.as_str()).collect()
    }

    #[test]
    fn test_teach_rejects_invalid_weight() {
        let mut engine = setup_test_engine();

        let err = engine
            .teach("Zealotry", [("zeal", 1.2)], Vec::<String>::new())
            .unwrap_err();

        assert!(matches!(err, ReasoningError::InvalidWeight { .. }));
        assert!(engine.get("Zealotry").is_none());
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn test_invalid_reteach_keeps_previous() {
        let mut engine = setup_test_engine();

        assert!(engine
            .teach("Socialism", [("equality", 2.0)], Vec::<String>::new())
            .is_err());
        assert_eq!(engine.get("Socialism").unwrap().values["equality"], 0.95);
    }

    #[test]
    fn test_teach_replaces_by_name() {
        let mut engine = setup_test_engine();

        let previous = engine
            .teach("Socialism", [("solidarity", 0.9)], ["Workers unite"])
            .unwrap();

        assert!(previous.is_some());
        assert_eq!(engine.len(), 2);
        assert_eq!(engine.names().collect::<Vec<_>>(), vec!["Libertarianism", "Socialism"]);
        assert!(engine.get("Socialism").unwrap().values.contains_key("solidarity"));
    }

    #[test]
    fn test_score_direct_and_sorted() {
        let engine = setup_test_engine();

        let score = engine
            .score("New rules threaten security and individual freedom", "Libertarianism")
            .unwrap();

        assert_eq!(labels(&score), vec!["individual_freedom", "security"]);
        assert!(score.matches.iter().all(|m| m.impact == ValueImpact::Direct));
        assert!((score.total - 1.65).abs() < 1e-9);
        assert!(score.fallback.is_empty());
    }

    #[test]
    fn test_score_ties_break_by_label() {
        let mut engine = PerspectiveEngine::with_defaults();
        engine
            .teach("Tied", [("order", 0.9), ("tradition", 0.9)], Vec::<String>::new())
            .unwrap();

        let score = engine.score("Tradition keeps order", "Tied").unwrap();
        assert_eq!(labels(&score), vec!["order", "tradition"]);
    }

    #[test]
    fn test_score_indirect_via_related_keywords() {
        let mut engine = PerspectiveEngine::with_defaults();
        engine
            .teach("Egalitarianism", [("equality", 0.9)], Vec::<String>::new())
            .unwrap();

        let score = engine.score("Is the new tax fair?", "Egalitarianism").unwrap();

        assert_eq!(score.matches.len(), 1);
        assert_eq!(score.matches[0].impact, ValueImpact::Indirect);
    }

    #[test]
    fn test_score_relevant_principles() {
        let engine = setup_test_engine();

        let score = engine
            .score("Government expands welfare programs", "Libertarianism")
            .unwrap();

        assert_eq!(score.principles, vec!["Minimize government intervention"]);
    }

    #[test]
    fn test_score_unmatched_keeps_total_at_zero() {
        let engine = setup_test_engine();

        let score = engine.score("A quiet afternoon", "Socialism").unwrap();

        assert!(score.matches.is_empty());
        assert_eq!(score.total, 0.0);
        let fallback: Vec<_> = score.fallback.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(fallback, vec!["equality", "security", "individual_freedom"]);
        assert!(score.principles.is_empty());
    }

    #[test]
    fn test_score_without_fallback_is_empty() {
        let mut engine = PerspectiveEngine::new(PerspectiveConfig {
            fallback_to_all_values: false,
            ..PerspectiveConfig::default()
        });
        engine
            .teach("Socialism", [("equality", 0.95)], Vec::<String>::new())
            .unwrap();

        let score = engine.score("A quiet afternoon", "Socialism").unwrap();
        assert!(score.matches.is_empty());
        assert_eq!(score.total, 0.0);
        assert!(score.fallback.is_empty());
    }

    #[test]
    fn test_score_unknown_ideology() {
        let engine = setup_test_engine();
        assert!(matches!(
            engine.score("anything", "Monarchism"),
            Err(ReasoningError::UnknownIdeology { name }) if name == "Monarchism"
        ));
    }

    #[test]
    fn test_compare_threshold() {
        let engine = setup_test_engine();

        let comparison = engine
            .compare(
                "New regulation threatens individual freedom, equality and security",
                &["Libertarianism", "Socialism"],
            )
            .unwrap();

        let found: Vec<_> = comparison
            .divergences
            .iter()
            .map(|d| (d.value.as_str(), d.favored_by.as_str()))
            .collect();
        // security differs by only 0.1.
        assert_eq!(
            found,
            vec![("equality", "Socialism"), ("individual_freedom", "Libertarianism")]
        );

        let equality = &comparison.divergences[0];
        assert_eq!(equality.other_weight, None);
        assert!((comparison.divergences[1].difference - 0.55).abs() < 1e-9);
        assert_eq!(
            comparison.synthesis,
            "Socialism prioritizes equality (0.95) over Libertarianism (absent); \
             Libertarianism prioritizes individual_freedom (0.95) over Socialism (0.40)"
        );
    }

    #[test]
    fn test_compare_threshold_is_inclusive() {
        let mut engine = PerspectiveEngine::with_defaults();
        engine.teach("A", [("order", 0.7)], Vec::<String>::new()).unwrap();
        engine.teach("B", [("order", 0.5)], Vec::<String>::new()).unwrap();

        let comparison = engine.compare("Keep order", &["A", "B"]).unwrap();

        assert_eq!(comparison.divergences.len(), 1);
        assert_eq!(comparison.divergences[0].favored_by, "A");
    }

    #[test]
    fn test_compare_reports_value_missing_from_other_side() {
        let mut engine = PerspectiveEngine::with_defaults();
        engine
            .teach("A", [("equality", 0.15), ("order", 0.5)], Vec::<String>::new())
            .unwrap();
        engine.teach("B", [("order", 0.5)], Vec::<String>::new()).unwrap();

        let comparison = engine.compare("equality and order", &["A", "B"]).unwrap();

        assert_eq!(comparison.divergences.len(), 1);
        let equality = &comparison.divergences[0];
        assert_eq!(equality.value, "equality");
        assert_eq!(equality.favored_by, "A");
        assert_eq!(equality.other_weight, None);
        assert!((equality.difference - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_compare_ignores_unmatched_values_when_any_side_matches() {
        let mut engine = PerspectiveEngine::with_defaults();
        engine
            .teach("L", [("individual_freedom", 0.95)], Vec::<String>::new())
            .unwrap();
        engine.teach("S", [("equality", 0.95)], Vec::<String>::new()).unwrap();

        let comparison = engine.compare("A vote on equality", &["L", "S"]).unwrap();

        assert!(!comparison.fallback);
        let found: Vec<_> = comparison
            .divergences
            .iter()
            .map(|d| (d.value.as_str(), d.favored_by.as_str()))
            .collect();
        assert_eq!(found, vec![("equality", "S")]);
    }

    #[test]
    fn test_compare_falls_back_when_nothing_matches() {
        let mut engine = PerspectiveEngine::with_defaults();
        engine
            .teach("L", [("individual_freedom", 0.95)], Vec::<String>::new())
            .unwrap();
        engine.teach("S", [("equality", 0.95)], Vec::<String>::new()).unwrap();

        let comparison = engine.compare("A quiet afternoon", &["L", "S"]).unwrap();

        assert!(comparison.fallback);
        assert_eq!(comparison.divergences.len(), 2);
        assert!(comparison.scores.iter().all(|s| s.total == 0.0));
    }

    #[test]
    fn test_compare_requires_two_distinct() {
        let engine = setup_test_engine();

        let err = engine.compare("anything", &["Socialism"]).unwrap_err();
        assert!(matches!(err, ReasoningError::InsufficientPerspectives { distinct: 1 }));

        let err = engine.compare::<&str>("anything", &[]).unwrap_err();
        assert!(matches!(err, ReasoningError::InsufficientPerspectives { distinct: 0 }));
    }

    #[test]
    fn test_compare_unknown_ideology() {
        let engine = setup_test_engine();
        assert!(matches!(
            engine.compare("anything", &["Socialism", "Monarchism"]),
            Err(ReasoningError::UnknownIdeology { .. })
        ));
    }

    #[test]
    fn test_compare_without_divergence() {
        let mut engine = PerspectiveEngine::with_defaults();
        engine.teach("A", [("order", 0.7)], Vec::<String>::new()).unwrap();
        engine.teach("B", [("order", 0.6)], Vec::<String>::new()).unwrap();

        let comparison = engine.compare("Keep order", &["A", "B"]).unwrap();

        assert!(comparison.divergences.is_empty());
        assert_eq!(comparison.synthesis, "No material divergence between A, B.");
    }

    #[test]
    fn test_analyze() {
        let mut engine = setup_test_engine();
        engine
            .teach_ideology(
                Ideology::new("Environmentalism")
                    .with_value("sustainability", 0.95)
                    .with_value("collective", 0.6)
                    .with_principle("Protect shared ecosystems")
                    .with_description("Stewardship of the natural world"),
            )
            .unwrap();

        let analysis = engine
            .analyze("Factory pollutes the common river", "Environmentalism")
            .unwrap();

        assert_eq!(analysis.values[0].value, "sustainability");
        assert_eq!(analysis.values[0].impact, ValueImpact::Minimal);
        assert_eq!(analysis.values[1].impact, ValueImpact::Indirect);
        assert_eq!(analysis.recommendation, "Prioritize collective in decision-making.");
        assert_eq!(analysis.description.as_deref(), Some("Stewardship of the natural world"));
    }

    #[test]
    fn test_recommend_opposes_intervention() {
        let engine = setup_test_engine();

        let analysis = engine
            .analyze("New government mandate on masks", "Libertarianism")
            .unwrap();
        assert_eq!(
            analysis.recommendation,
            "Oppose government intervention. Preserve individual freedom and voluntary action."
        );
    }

    #[test]
    fn test_recommend_supports_welfare_intervention() {
        let engine = setup_test_engine();

        let analysis = engine
            .analyze("Government expands welfare programs", "Socialism")
            .unwrap();
        assert_eq!(
            analysis.recommendation,
            "Support if it promotes collective welfare and reduces inequality."
        );
    }

    #[test]
    fn test_recommend_free_markets() {
        let mut engine = PerspectiveEngine::with_defaults();
        engine
            .teach("Capitalism", [("free_markets", 0.9)], Vec::<String>::new())
            .unwrap();

        let analysis = engine.analyze("The market is booming", "Capitalism").unwrap();
        assert_eq!(
            analysis.recommendation,
            "Let markets operate freely. Minimize restrictions on economic activity."
        );
    }

    #[test]
    fn test_recommend_equitable_distribution() {
        let engine = setup_test_engine();

        let analysis = engine.analyze("Wealth is concentrating", "Socialism").unwrap();
        assert_eq!(
            analysis.recommendation,
            "Ensure economic decisions promote equitable distribution."
        );
    }

    #[test]
    fn test_recommend_falls_through_below_thresholds() {
        let mut engine = PerspectiveEngine::with_defaults();
        engine
            .teach(
                "Environmentalism",
                [("sustainability", 0.95), ("collective", 0.6)],
                Vec::<String>::new(),
            )
            .unwrap();

        let analysis = engine
            .analyze("Government rezones the common land", "Environmentalism")
            .unwrap();
        assert_eq!(analysis.recommendation, "Prioritize collective in decision-making.");
    }

    #[test]
    fn test_remove() {
        let mut engine = setup_test_engine();

        assert!(engine.remove("Socialism").is_some());
        assert!(engine.remove("Socialism").is_none());
        assert_eq!(engine.names().collect::<Vec<_>>(), vec!["Libertarianism"]);
    }

    #[test]
    fn test_json_round_trip() {
        let engine = setup_test_engine();
        let json = engine.export_json().unwrap();

        let mut restored = PerspectiveEngine::with_defaults();
        assert_eq!(restored.import_json(&json).unwrap(), 2);

        assert_eq!(restored.names().collect::<Vec<_>>(), vec!["Libertarianism", "Socialism"]);
        assert_eq!(restored.get("Socialism"), engine.get("Socialism"));
    }

    #[test]
    fn test_import_rejects_any_invalid_weight() {
        let mut engine = PerspectiveEngine::with_defaults();
        let json = r#"[
            { "name": "Fine", "values": { "order": 0.5 }, "principles": [] },
            { "name": "Broken", "values": { "order": 3.0 }, "principles": [] }
        ]"#;

        assert!(matches!(
            engine.import_json(json),
            Err(ReasoningError::InvalidWeight { .. })
        ));
        assert!(engine.is_empty());
    }
}
