//! String similarity on normalized text.
//!
//! Both measures are Dice coefficients (`2·|A∩B| / (|A|+|B|)`): one over
//! the token sets, one over the sets of overlapping character trigrams.
//! [`fuzzy`] takes the larger of the two, so a perfect token match and a
//! near-miss spelling both score high.

use std::collections::HashSet;

use regcheck_normalize::TextNormalizer;

/// Token set and trigram set of one normalized string, computed once and
/// compared many times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextProfile {
    tokens: HashSet<String>,
    trigrams: HashSet<[char; 3]>,
}

impl TextProfile {
    /// Profiles already-normalized `text`; tokens go through the
    /// normalizer's stop-word filter.
    pub fn new(text: &str, normalizer: &TextNormalizer) -> Self {
        Self {
            tokens: normalizer.tokenize(text).into_iter().collect(),
            trigrams: trigrams(text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.trigrams.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Overlapping 3-character windows; strings shorter than three characters
/// have none.
fn trigrams(text: &str) -> HashSet<[char; 3]> {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(3).map(|w| [w[0], w[1], w[2]]).collect()
}

fn dice<T: Eq + std::hash::Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let shared = small.iter().filter(|item| large.contains(*item)).count();
    (2 * shared) as f64 / total as f64
}

pub fn token_set_similarity(a: &TextProfile, b: &TextProfile) -> f64 {
    dice(&a.tokens, &b.tokens)
}

pub fn trigram_similarity(a: &TextProfile, b: &TextProfile) -> f64 {
    dice(&a.trigrams, &b.trigrams)
}

/// `max(token_set_similarity, trigram_similarity)`, in `[0, 1]`.
pub fn fuzzy(a: &TextProfile, b: &TextProfile) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    token_set_similarity(a, b).max(trigram_similarity(a, b))
}

/// [`fuzzy`] on two normalized strings, profiling both on the fly.
pub fn fuzzy_text(a: &str, b: &str, normalizer: &TextNormalizer) -> f64 {
    fuzzy(
        &TextProfile::new(a, normalizer),
        &TextProfile::new(b, normalizer),
    )
}
