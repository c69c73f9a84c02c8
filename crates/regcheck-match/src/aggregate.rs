//! Deterministic ordering and summary counters of a full run.

use std::collections::HashSet;

use regcheck_model::{MatchOutput, MatchRecord, Summary, Thresholds, TierCounts, TopCandidate};

fn customer_key(id: Option<&str>) -> &str {
    id.unwrap_or_default()
}

/// Sorts matches by customer id (missing ids as `""`), then by score
/// descending; sorts the shortlist by customer id, keeping source and rank
/// order. Both sorts are stable.
pub fn aggregate(
    mut matches: Vec<MatchRecord>,
    mut top3: Vec<TopCandidate>,
    thresholds: Thresholds,
) -> MatchOutput {
    matches.sort_by(|a, b| {
        customer_key(a.customer_id.as_deref())
            .cmp(customer_key(b.customer_id.as_deref()))
            .then_with(|| b.score.total_cmp(&a.score))
    });
    top3.sort_by(|a, b| {
        customer_key(a.customer_id.as_deref()).cmp(customer_key(b.customer_id.as_deref()))
    });
    let summary = summarize(&matches, thresholds);
    MatchOutput {
        matches,
        top3,
        summary,
    }
}

/// Distinct customers (by name, postal code and house number) and per-tier
/// totals over all records.
pub fn summarize(matches: &[MatchRecord], thresholds: Thresholds) -> Summary {
    let customers: HashSet<(&str, &str, Option<&str>)> = matches
        .iter()
        .map(|record| {
            (
                record.name.as_str(),
                record.postal_code.as_str(),
                record.house_number.as_deref(),
            )
        })
        .collect();
    let mut tiers = TierCounts::default();
    for record in matches {
        tiers.add(record.tier);
    }
    Summary {
        customers: customers.len(),
        records: matches.len(),
        tiers,
        thresholds,
    }
}

#[cfg(test)]
mod tests {
    use regcheck_model::Tier;

    use super::*;

    fn record(id: Option<&str>, name: &str, source: &str, score: f64, tier: Tier) -> MatchRecord {
        MatchRecord {
            customer_id: id.map(str::to_string),
            name: name.to_string(),
            street: String::new(),
            city: String::new(),
            postal_code: "10600".to_string(),
            house_number: None,
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
            score,
            tier,
        }
    }

    #[test]
    fn sorts_by_customer_then_score() {
        let matches = vec![
            record(Some("B"), "b", "s1", 0.2, Tier::Sin),
            record(Some("A"), "a", "s1", 0.7, Tier::Revisar),
            record(None, "z", "s1", 0.1, Tier::Sin),
            record(Some("A"), "a", "s2", 0.9, Tier::Alta),
        ];
        let output = aggregate(matches, Vec::new(), Thresholds::default());
        let order: Vec<(Option<&str>, &str)> = output
            .matches
            .iter()
            .map(|m| (m.customer_id.as_deref(), m.source.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![(None, "s1"), (Some("A"), "s2"), (Some("A"), "s1"), (Some("B"), "s1")]
        );
    }

    #[test]
    fn equal_scores_keep_source_order() {
        let matches = vec![
            record(Some("A"), "a", "s1", 0.5, Tier::Sin),
            record(Some("A"), "a", "s2", 0.5, Tier::Sin),
        ];
        let output = aggregate(matches, Vec::new(), Thresholds::default());
        assert_eq!(output.matches[0].source, "s1");
        assert_eq!(output.matches[1].source, "s2");
    }

    #[test]
    fn summary_counts_distinct_customers_and_tiers() {
        let matches = vec![
            record(Some("1"), "a", "s1", 0.9, Tier::Alta),
            record(Some("1"), "a", "s2", 0.7, Tier::Revisar),
            record(Some("2"), "b", "s1", 0.0, Tier::Sin),
        ];
        let summary = summarize(&matches, Thresholds::default());
        assert_eq!(summary.customers, 2);
        assert_eq!(summary.records, 3);
        assert_eq!(summary.tiers.alta, 1);
        assert_eq!(summary.tiers.revisar, 1);
        assert_eq!(summary.tiers.sin, 1);
    }
}
