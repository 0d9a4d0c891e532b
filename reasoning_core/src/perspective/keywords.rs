//! Keyword matching between situations, value labels and principles.
//!
//! Text is lowercased and split on every non-alphanumeric character, so
//! `individual_freedom` and "individual freedom" yield the same words.
//! Keywords are words at least `min_keyword_len` long that are not stop
//! words. Two keywords match when they are equal, or when one is a prefix
//! of the other and the shorter is at least `min_prefix_len` long
//! ("equal" ~ "equality", "free" ~ "freedom", but not "art" ~ "artificial");
//! there is no stemming beyond that.

use crate::config::PerspectiveConfig;

/// Lowercased words of `text`, in order.
pub fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

/// Words of `text` that count as keywords under `config`.
pub fn keywords(text: &str, config: &PerspectiveConfig) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| is_keyword(w, config))
        .collect()
}

fn is_keyword(word: &str, config: &PerspectiveConfig) -> bool {
    word.chars().count() >= config.min_keyword_len
        && !config.stop_words.iter().any(|s| s.eq_ignore_ascii_case(word))
}

/// Whether two keywords match: equal, or one is a prefix of the other of
/// at least `min_prefix_len` characters.
pub fn keywords_match(a: &str, b: &str, min_prefix_len: usize) -> bool {
    if a == b {
        return true;
    }
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    short.chars().count() >= min_prefix_len && long.starts_with(short)
}

/// A situation prepared for repeated matching.
#[derive(Debug, Clone)]
pub(crate) struct TextProfile {
    words: Vec<String>,
    keywords: Vec<String>,
    min_prefix_len: usize,
}

impl TextProfile {
    pub(crate) fn new(text: &str, config: &PerspectiveConfig) -> Self {
        let words = words(text);
        let keywords = words
            .iter()
            .filter(|w| is_keyword(w, config))
            .cloned()
            .collect();
        Self {
            words,
            keywords,
            min_prefix_len: config.min_prefix_len,
        }
    }

    /// Whether `phrase` occurs as a contiguous run of words.
    pub(crate) fn contains_phrase(&self, phrase: &[String]) -> bool {
        !phrase.is_empty() && self.words.windows(phrase.len()).any(|window| window == phrase)
    }

    /// Whether any of `candidates` matches one of this text's keywords.
    pub(crate) fn shares_keyword<S: AsRef<str>>(&self, candidates: &[S]) -> bool {
        candidates.iter().any(|candidate| {
            self.keywords
                .iter()
                .any(|kw| keywords_match(kw, candidate.as_ref(), self.min_prefix_len))
        })
    }
}
