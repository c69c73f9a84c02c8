use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

use regcheck_model::TextRules;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::error::{NormalizeError, Result};

/// Characters the regex engine treats as word characters although they are
/// not alphanumeric: connector punctuation and the zero-width joiners.
static WORD_CONNECTOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Pc}\x{200C}\x{200D}]").expect("Invalid word connector regex")
});

/// Canonicalizes names and addresses before comparison.
///
/// Built once from [`TextRules`]; holds the compiled abbreviation table and
/// the stop-word / via-word sets. Cheap to share by reference.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    abbreviations: Vec<(Regex, String)>,
    pub(crate) stop_words: HashSet<String>,
    pub(crate) via_words: HashSet<String>,
}

impl TextNormalizer {
    pub fn new(rules: &TextRules) -> Result<Self> {
        let abbreviations = rules
            .abbreviations
            .iter()
            .map(|abbr| {
                Regex::new(&abbr.pattern)
                    .map(|re| (re, format!(" {} ", abbr.replacement.trim())))
                    .map_err(|source| NormalizeError::InvalidPattern {
                        pattern: abbr.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            abbreviations,
            stop_words: word_set(&rules.stop_words),
            via_words: word_set(&rules.via_words),
        })
    }

    /// Normalizes `text`:
    ///
    /// 1. upper-case
    /// 2. NFD decomposition, combining marks dropped
    /// 3. connector punctuation (`_`, zero-width joiners) becomes a space
    /// 4. abbreviation table, in order; expansions are space-delimited
    /// 5. every non-alphanumeric character becomes a space
    /// 6. whitespace collapsed and trimmed
    ///
    /// Blank input yields an empty string. `normalize(normalize(x)) ==
    /// normalize(x)`.
    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        let mut out = split_word_connectors(&strip_diacritics(&text.to_uppercase()));
        for (pattern, replacement) in &self.abbreviations {
            if let Cow::Owned(replaced) = pattern.replace_all(&out, replacement.as_str()) {
                out = replaced;
            }
        }
        collapse_non_alphanumeric(&out)
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        // The built-in table is known to compile.
        Self::new(&TextRules::default()).expect("default abbreviation table")
    }
}

/// Decomposes to NFD and drops combining marks (`Príncipe` -> `Principe`).
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|ch| !is_combining_mark(*ch)).collect()
}

/// Replaces connector punctuation and zero-width joiners with spaces, so
/// `HOSP_CENTRAL` has the same word boundaries as `HOSP CENTRAL`.
pub fn split_word_connectors(text: &str) -> String {
    WORD_CONNECTOR_REGEX.replace_all(text, " ").into_owned()
}

fn collapse_non_alphanumeric(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        } else {
            pending_space = true;
        }
    }
    out
}

fn word_set(words: &[String]) -> HashSet<String> {
    words
        .iter()
        .map(|w| strip_diacritics(&w.trim().to_uppercase()))
        .filter(|w| !w.is_empty())
        .collect()
}
