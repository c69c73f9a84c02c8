//! Weighted similarity score with categorical bonuses.
//!
//! `score = w_name·fuzzy(name) + w_street·fuzzy(street_core)`, plus the
//! postal-code, house-number and municipality bonuses, clamped to `[0, 1]`.

use regcheck_model::{MatchKeys, ScoreWeights};
use regcheck_normalize::TextNormalizer;

use crate::similarity::{TextProfile, fuzzy};

/// Match keys plus the similarity profiles of the two fuzzy-compared keys.
#[derive(Debug, Clone)]
pub struct ProfiledKeys<'a> {
    pub keys: &'a MatchKeys,
    pub name: TextProfile,
    pub street: TextProfile,
}

impl<'a> ProfiledKeys<'a> {
    pub fn new(keys: &'a MatchKeys, normalizer: &TextNormalizer) -> Self {
        Self {
            keys,
            name: TextProfile::new(&keys.name, normalizer),
            street: TextProfile::new(&keys.street_core, normalizer),
        }
    }
}

/// A component contributing to the final score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreComponent {
    /// Component name (e.g. "Name similarity").
    pub name: &'static str,
    /// Weighted contribution to the raw score.
    pub value: f64,
    /// Human-readable description.
    pub description: String,
}

/// Breakdown of one customer/candidate score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    /// Sum of the components before clamping.
    pub raw: f64,
    /// Final score in `[0, 1]`.
    pub score: f64,
}

impl ScoreBreakdown {
    /// One-line explanation, e.g. `Name similarity: 50%; Postal code: 35%`.
    pub fn explain(&self) -> String {
        let mut parts: Vec<String> = self
            .components
            .iter()
            .map(|c| format!("{}: {:.0}%", c.name, c.value * 100.0))
            .collect();
        if self.raw > self.score {
            parts.push(format!("clamped from {:.4}", self.raw));
        }
        parts.join("; ")
    }
}

/// Scores customers against registry candidates.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    weights: ScoreWeights,
}

impl Scorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score in `[0, 1]`.
    pub fn score(&self, customer: &ProfiledKeys<'_>, candidate: &ProfiledKeys<'_>) -> f64 {
        let weights = &self.weights;
        let mut raw = weights.name * fuzzy(&customer.name, &candidate.name)
            + weights.street * fuzzy(&customer.street, &candidate.street);
        if postal_codes_match(customer.keys, candidate.keys) {
            raw += weights.postal_code;
        }
        if house_numbers_match(customer.keys, candidate.keys) {
            raw += weights.house_number;
        }
        if municipalities_match(&customer.keys.municipality, &candidate.keys.municipality) {
            raw += weights.municipality;
        }
        raw.clamp(0.0, 1.0)
    }

    /// Same total as [`Scorer::score`], itemized.
    pub fn explain(
        &self,
        customer: &ProfiledKeys<'_>,
        candidate: &ProfiledKeys<'_>,
    ) -> ScoreBreakdown {
        let weights = &self.weights;
        let (c, k) = (customer.keys, candidate.keys);
        let mut components = Vec::new();

        let name_sim = fuzzy(&customer.name, &candidate.name);
        components.push(ScoreComponent {
            name: "Name similarity",
            value: weights.name * name_sim,
            description: format!("'{}' vs '{}' = {:.4}", c.name, k.name, name_sim),
        });

        let street_sim = fuzzy(&customer.street, &candidate.street);
        components.push(ScoreComponent {
            name: "Street similarity",
            value: weights.street * street_sim,
            description: format!(
                "'{}' vs '{}' = {:.4}",
                c.street_core, k.street_core, street_sim
            ),
        });

        if postal_codes_match(c, k) {
            components.push(ScoreComponent {
                name: "Postal code",
                value: weights.postal_code,
                description: format!("both {}", c.postal_code.as_deref().unwrap_or_default()),
            });
        }
        if house_numbers_match(c, k) {
            components.push(ScoreComponent {
                name: "House number",
                value: weights.house_number,
                description: format!("both {}", c.house_number.as_deref().unwrap_or_default()),
            });
        }
        if municipalities_match(&c.municipality, &k.municipality) {
            components.push(ScoreComponent {
                name: "Municipality",
                value: weights.municipality,
                description: format!("'{}' ~ '{}'", c.municipality, k.municipality),
            });
        }

        let raw: f64 = components.iter().map(|component| component.value).sum();
        ScoreBreakdown {
            components,
            raw,
            score: raw.clamp(0.0, 1.0),
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

fn postal_codes_match(a: &MatchKeys, b: &MatchKeys) -> bool {
    matches!((&a.postal_code, &b.postal_code), (Some(x), Some(y)) if x == y)
}

fn house_numbers_match(a: &MatchKeys, b: &MatchKeys) -> bool {
    matches!((&a.house_number, &b.house_number), (Some(x), Some(y)) if x == y)
}

/// Equality or substring containment in either direction, both non-empty.
///
/// Short names embedded in longer ones (`LUGO` in `VILLALUGO`) also match.
pub(crate) fn municipalities_match(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(name: &str, street: &str, muni: &str, cp: Option<&str>, num: Option<&str>) -> MatchKeys {
        MatchKeys {
            name: name.to_string(),
            street_core: street.to_string(),
            municipality: muni.to_string(),
            postal_code: cp.map(str::to_string),
            house_number: num.map(str::to_string),
        }
    }

    fn score_pair(a: &MatchKeys, b: &MatchKeys) -> (f64, ScoreBreakdown) {
        let n = TextNormalizer::default();
        let (pa, pb) = (ProfiledKeys::new(a, &n), ProfiledKeys::new(b, &n));
        let scorer = Scorer::default();
        (scorer.score(&pa, &pb), scorer.explain(&pa, &pb))
    }

    #[test]
    fn stacked_bonuses_are_clamped() {
        let a = keys("HOSPITAL X", "MAYOR", "LUGO", Some("27001"), Some("3"));
        let (score, breakdown) = score_pair(&a, &a);
        assert_eq!(score, 1.0);
        assert!((breakdown.raw - 1.55).abs() < 1e-12);
        assert_eq!(breakdown.score, score);
        assert!(breakdown.explain().contains("clamped from 1.5500"));
    }

    #[test]
    fn missing_keys_earn_no_bonus() {
        let a = keys("", "", "", None, None);
        let b = keys("", "", "", None, None);
        let (score, breakdown) = score_pair(&a, &b);
        assert_eq!(score, 0.0);
        assert_eq!(breakdown.components.len(), 2);
    }

    #[test]
    fn postal_bonus_alone_stays_below_review() {
        let a = keys("FARMACIA SOL", "MAYOR", "", Some("10600"), None);
        let b = keys("CLINICA LUNA", "RONDA NORTE", "", Some("10600"), None);
        let (score, breakdown) = score_pair(&a, &b);
        assert!(score >= 0.35 && score < 0.65, "score {score}");
        assert!(breakdown.components.iter().any(|c| c.name == "Postal code"));
    }

    #[test]
    fn municipality_matches_by_containment() {
        assert!(municipalities_match("LUGO", "VILLALUGO"));
        assert!(municipalities_match("PALMA DE MALLORCA", "PALMA"));
        assert!(!municipalities_match("", "PALMA"));
        assert!(!municipalities_match("CACERES", "BADAJOZ"));
    }

    #[test]
    fn explain_total_equals_score() {
        let a = keys("CENTRO SALUD NORTE", "MAYOR 3", "LUGO", Some("27001"), Some("3"));
        let b = keys("CENTRO DE SALUD NORTE", "MAYOR", "LUGO", Some("27002"), Some("3"));
        let (score, breakdown) = score_pair(&a, &b);
        assert!((breakdown.score - score).abs() < 1e-12);
        assert!(breakdown.components.iter().all(|c| c.name != "Postal code"));
    }
}
