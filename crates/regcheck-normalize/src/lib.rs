//! Text normalization for Spanish / Catalan names and addresses.
//!
//! - [`TextNormalizer::normalize`]: upper-case, strip diacritics, expand
//!   abbreviations, drop punctuation, collapse whitespace.
//! - [`TextNormalizer::tokenize`]: split into tokens without stop-words
//!   (numeric tokens always survive).
//! - [`TextNormalizer::street_core`]: street tokens minus via-type words.
//! - [`extract_house_number`], [`extract_postal_code`], [`first_number_run`]:
//!   the numeric extractors used on customer and registry rows.

mod address;
mod error;
mod text;
mod tokens;

pub use address::{
    extract_house_number, extract_postal_code, first_number_run, postal_code_from_cell,
};
pub use error::{NormalizeError, Result};
pub use text::{TextNormalizer, split_word_connectors, strip_diacritics};
