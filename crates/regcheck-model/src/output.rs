//! The match result aggregate returned by the engine.

use serde::{Deserialize, Serialize};

use crate::record::{CustomerRecord, RegistryCandidate};
use crate::tier::{Thresholds, Tier};

/// Rounds a score to four decimals, as reported.
pub fn round_score(score: f64) -> f64 {
    (score * 10_000.0).round() / 10_000.0
}

/// Best candidate of one registry source for one customer.
///
/// When the source had no candidates at all, every `MIN_*` field is null,
/// the score is 0 and the tier is SIN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "CUSTOMER_ID")]
    pub customer_id: Option<String>,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "STREET")]
    pub street: String,
    #[serde(rename = "CITY")]
    pub city: String,
    #[serde(rename = "POSTAL_CODE")]
    pub postal_code: String,
    /// House number extracted from the customer street.
    #[serde(rename = "NUMBER")]
    pub house_number: Option<String>,
    /// Registry source this record was computed against.
    #[serde(rename = "SOURCE")]
    pub source: String,
    #[serde(rename = "MIN_source")]
    pub min_source: Option<String>,
    #[serde(rename = "MIN_name")]
    pub min_name: Option<String>,
    #[serde(rename = "MIN_via")]
    pub min_via: Option<String>,
    #[serde(rename = "MIN_number")]
    pub min_number: Option<String>,
    #[serde(rename = "MIN_municipality")]
    pub min_municipality: Option<String>,
    #[serde(rename = "MIN_postalCode")]
    pub min_postal_code: Option<String>,
    #[serde(rename = "MIN_centerCode")]
    pub min_center_code: Option<String>,
    #[serde(rename = "MIN_lastAuthorizationDate")]
    pub min_last_authorization_date: Option<String>,
    #[serde(rename = "MIN_serviceOffering")]
    pub min_service_offering: Option<String>,
    #[serde(rename = "SCORE")]
    pub score: f64,
    #[serde(rename = "TIER")]
    pub tier: Tier,
}

impl MatchRecord {
    /// Sentinel for a customer scored against an empty candidate pool.
    pub fn no_candidate(customer: &CustomerRecord, source: &str) -> Self {
        Self {
            customer_id: customer.customer_id.clone(),
            name: customer.display_name.clone(),
            street: customer.street.clone(),
            city: customer.city.clone(),
            postal_code: customer.postal_raw.clone(),
            house_number: customer.keys.house_number.clone(),
            source: source.to_string(),
            min_source: None,
            min_name: None,
            min_via: None,
            min_number: None,
            min_municipality: None,
            min_postal_code: None,
            min_center_code: None,
            min_last_authorization_date: None,
            min_service_offering: None,
            score: 0.0,
            tier: Tier::Sin,
        }
    }

    /// Record for the best-scoring candidate. `score` is rounded here.
    pub fn matched(
        customer: &CustomerRecord,
        candidate: &RegistryCandidate,
        score: f64,
        tier: Tier,
    ) -> Self {
        Self {
            min_source: Some(candidate.source_name.clone()),
            min_name: candidate.name.clone(),
            min_via: candidate.via.clone(),
            min_number: candidate.number.clone(),
            min_municipality: candidate.municipality.clone(),
            min_postal_code: candidate.keys.postal_code.clone(),
            min_center_code: candidate.center_code.clone(),
            min_last_authorization_date: candidate.last_authorization_date.clone(),
            min_service_offering: candidate.service_offering.clone(),
            score: round_score(score),
            tier,
            ..Self::no_candidate(customer, &candidate.source_name)
        }
    }

    pub fn has_match(&self) -> bool {
        self.min_source.is_some()
    }
}

/// One of the three best candidates of a (customer, source) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCandidate {
    #[serde(rename = "CUSTOMER_ID")]
    pub customer_id: Option<String>,
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "SOURCE")]
    pub source: String,
    /// 1-based; rank 1 is the record's best match.
    #[serde(rename = "CAND_RANK")]
    pub rank: u8,
    #[serde(rename = "CAND_SCORE")]
    pub score: f64,
    #[serde(rename = "CAND_name")]
    pub candidate_name: Option<String>,
    #[serde(rename = "CAND_via")]
    pub candidate_via: Option<String>,
    #[serde(rename = "CAND_number")]
    pub candidate_number: Option<String>,
    #[serde(rename = "CAND_municipality")]
    pub candidate_municipality: Option<String>,
    #[serde(rename = "CAND_postalCode")]
    pub candidate_postal_code: Option<String>,
    #[serde(rename = "CAND_centerCode")]
    pub candidate_center_code: Option<String>,
}

impl TopCandidate {
    pub fn new(
        customer: &CustomerRecord,
        candidate: &RegistryCandidate,
        rank: u8,
        score: f64,
    ) -> Self {
        Self {
            customer_id: customer.customer_id.clone(),
            name: customer.display_name.clone(),
            source: candidate.source_name.clone(),
            rank,
            score: round_score(score),
            candidate_name: candidate.name.clone(),
            candidate_via: candidate.via.clone(),
            candidate_number: candidate.number.clone(),
            candidate_municipality: candidate.municipality.clone(),
            candidate_postal_code: candidate.keys.postal_code.clone(),
            candidate_center_code: candidate.center_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub alta: usize,
    pub revisar: usize,
    pub sin: usize,
}

impl TierCounts {
    pub fn add(&mut self, tier: Tier) {
        match tier {
            Tier::Alta => self.alta += 1,
            Tier::Revisar => self.revisar += 1,
            Tier::Sin => self.sin += 1,
        }
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Alta => self.alta,
            Tier::Revisar => self.revisar,
            Tier::Sin => self.sin,
        }
    }

    pub fn total(&self) -> usize {
        self.alta + self.revisar + self.sin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Distinct customers by name + postal code + house number.
    pub customers: usize,
    pub records: usize,
    pub tiers: TierCounts,
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutput {
    pub matches: Vec<MatchRecord>,
    pub top3: Vec<TopCandidate>,
    pub summary: Summary,
}

impl MatchOutput {
    /// Top-3 entries of one (customer, source) pair, in rank order.
    pub fn top3_for<'a>(
        &'a self,
        customer_id: Option<&'a str>,
        source: &'a str,
    ) -> impl Iterator<Item = &'a TopCandidate> + 'a {
        self.top3
            .iter()
            .filter(move |c| c.customer_id.as_deref() == customer_id && c.source == source)
    }
}
