//! Question classification - a pure function of the question text and the
//! set of known concept names.

use serde::{Deserialize, Serialize};

use crate::config::RouterConfig;

/// Words dropped by [`question_keywords`].
const QUESTION_STOP_WORDS: &[&str] = &[
    "what", "is", "are", "the", "a", "an", "how", "does", "do", "can", "could", "would",
    "should", "about", "to",
];

/// A known concept found in a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mention {
    pub concept: String,
    /// Byte offset of the first occurrence in the lowercased question.
    pub position: usize,
}

/// How a question should be answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    /// One concept and a definitional cue ("What is X?").
    Definitional { concept: String },
    /// One concept without a definitional cue ("Tell me about X").
    Descriptive { concept: String },
    /// Two or more concepts; traverse from the first mention to the last.
    Relational { source: String, target: String },
    Unrecognized,
}

/// Result of classifying a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: QuestionKind,
    /// Mentioned concepts in order of first occurrence.
    pub mentions: Vec<Mention>,
}

/// Find known concept names in a question.
///
/// Matching ignores case. Longer names claim their spans first, so
/// "Free Market" wins over "Market" on the same text; a name whose every
/// occurrence overlaps a claimed span is not mentioned. When two names fold
/// to the same lowercase text the one listed first wins.
pub fn find_mentions<'a>(
    question: &str,
    names: impl IntoIterator<Item = &'a str>,
    whole_words: bool,
) -> Vec<Mention> {
    let haystack = question.to_lowercase();

    let mut candidates: Vec<(&str, String)> = names
        .into_iter()
        .map(|name| (name, name.to_lowercase()))
        .filter(|(_, folded)| !folded.trim().is_empty())
        .collect();
    // Stable sort keeps the caller's order among equal lengths.
    candidates.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

    let mut claimed: Vec<(usize, usize)> = Vec::new();
    let mut mentions = Vec::new();

    for (name, folded) in &candidates {
        let mut first = None;

        for (start, matched) in haystack.match_indices(folded.as_str()) {
            let end = start + matched.len();
            if whole_words && !is_word_boundary(&haystack, start, end) {
                continue;
            }
            if claimed.iter().any(|&(s, e)| start < e && s < end) {
                continue;
            }
            claimed.push((start, end));
            first.get_or_insert(start);
        }

        if let Some(position) = first {
            mentions.push(Mention {
                concept: name.to_string(),
                position,
            });
        }
    }

    mentions.sort_by_key(|m| m.position);
    mentions
}

fn is_word_boundary(haystack: &str, start: usize, end: usize) -> bool {
    let before = haystack[..start].chars().next_back();
    let after = haystack[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

/// Check whether a question asks for a definition.
pub fn is_definitional(question: &str, cues: &[String]) -> bool {
    let lowered = question.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    cues.iter().any(|cue| {
        let cue = cue.to_lowercase();
        words.iter().any(|w| *w == cue)
    })
}

/// Classify a question against the known concept names.
pub fn classify<'a>(
    question: &str,
    names: impl IntoIterator<Item = &'a str>,
    config: &RouterConfig,
) -> Classification {
    let mentions = find_mentions(question, names, config.whole_word_mentions);

    let kind = match mentions.as_slice() {
        [] => QuestionKind::Unrecognized,
        [only] if is_definitional(question, &config.definitional_cues) => {
            QuestionKind::Definitional {
                concept: only.concept.clone(),
            }
        }
        [only] => QuestionKind::Descriptive {
            concept: only.concept.clone(),
        },
        [first, .., last] => QuestionKind::Relational {
            source: first.concept.clone(),
            target: last.concept.clone(),
        },
    };

    Classification { kind, mentions }
}

/// Extract content words from a question (lowercase, stop words and words
/// of two letters or fewer removed).
pub fn question_keywords(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '?' || c == ',')
        .filter(|w| w.chars().count() > 2 && !QUESTION_STOP_WORDS.contains(w))
        .map(String::from)
        .collect()
}
