//! Matching orchestration: per source, per customer, block, score, pick.

use std::time::Instant;

use regcheck_ingest::{LoadedRegistry, RegistryTableLoader, build_customer_records};
use regcheck_model::{
    CustomerRecord, CustomerRow, MatchConfig, MatchOutput, MatchRecord, RegistryMatrix,
    TopCandidate, round_score,
};
use regcheck_normalize::TextNormalizer;
use tracing::{debug, info, info_span, warn};

use crate::aggregate::aggregate;
use crate::blocking::BlockingIndex;
use crate::error::Result;
use crate::score::{ProfiledKeys, Scorer};

/// Number of alternates kept per (customer, source).
pub const TOP_CANDIDATES: usize = 3;

/// Deterministic matcher built from one immutable [`MatchConfig`].
///
/// Holds no mutable state: [`MatchEngine::run`] is a pure function of its
/// inputs and may be called any number of times.
#[derive(Debug)]
pub struct MatchEngine {
    config: MatchConfig,
    normalizer: TextNormalizer,
    scorer: Scorer,
    explain: bool,
}

/// Matches and shortlist of one registry source.
#[derive(Debug, Clone, Default)]
pub struct SourceMatches {
    pub matches: Vec<MatchRecord>,
    pub top3: Vec<TopCandidate>,
}

impl MatchEngine {
    /// Validates `config` and compiles its abbreviation table.
    pub fn new(config: MatchConfig) -> Result<Self> {
        config.validate()?;
        let normalizer = TextNormalizer::new(&config.text)?;
        Ok(Self {
            scorer: Scorer::new(config.weights),
            normalizer,
            config,
            explain: false,
        })
    }

    /// Log the score breakdown of every best match at debug level.
    #[must_use]
    pub fn with_explain(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }

    /// Header detection plus candidate extraction for one source.
    pub fn load_source(&self, matrix: &RegistryMatrix) -> LoadedRegistry {
        RegistryTableLoader::new(&self.config.columns, &self.config.header, &self.normalizer)
            .load(matrix)
    }

    /// Matches every customer row against every registry source.
    ///
    /// Fails only when a required customer column is absent from the whole
    /// input. Sources without rows are skipped; every other source yields
    /// exactly one [`MatchRecord`] per customer.
    pub fn run(&self, customers: &[CustomerRow], sources: &[RegistryMatrix]) -> Result<MatchOutput> {
        let start = Instant::now();
        let records =
            build_customer_records(customers, &self.config.customer, &self.normalizer)?;

        let mut matches = Vec::with_capacity(records.len() * sources.len());
        let mut top3 = Vec::new();
        for matrix in sources {
            if matrix.is_empty() {
                warn!(source = %matrix.name, "registry source has no rows; skipped");
                continue;
            }
            let span = info_span!("source", source = %matrix.name);
            let _guard = span.enter();
            let loaded = self.load_source(matrix);
            let result = self.match_source(&records, &loaded);
            matches.extend(result.matches);
            top3.extend(result.top3);
        }

        let output = aggregate(matches, top3, self.config.thresholds);
        info!(
            customers = records.len(),
            sources = sources.len(),
            records = output.matches.len(),
            alta = output.summary.tiers.alta,
            revisar = output.summary.tiers.revisar,
            sin = output.summary.tiers.sin,
            duration_ms = start.elapsed().as_millis(),
            "match run complete"
        );
        Ok(output)
    }

    /// Best match and top-3 shortlist of every customer within one loaded
    /// source, in customer order.
    pub fn match_source(
        &self,
        customers: &[CustomerRecord],
        loaded: &LoadedRegistry,
    ) -> SourceMatches {
        let start = Instant::now();
        let candidates = &loaded.candidates;
        let candidate_profiles: Vec<ProfiledKeys<'_>> = candidates
            .iter()
            .map(|candidate| ProfiledKeys::new(&candidate.keys, &self.normalizer))
            .collect();
        let index = BlockingIndex::new(candidates, &self.config.blocking);

        let mut out = SourceMatches::default();
        let mut compared = 0usize;
        for customer in customers {
            let profile = ProfiledKeys::new(&customer.keys, &self.normalizer);
            let block = index.block(&customer.keys);
            compared += block.len();

            let mut scored: Vec<(usize, f64)> = block
                .indices
                .iter()
                .map(|&idx| (idx, self.scorer.score(&profile, &candidate_profiles[idx])))
                .collect();
            // Stable: equal scores keep source order.
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));

            let Some(&(best_idx, best_score)) = scored.first() else {
                out.matches
                    .push(MatchRecord::no_candidate(customer, &loaded.source_name));
                continue;
            };
            let best = &candidates[best_idx];
            let tier = self.config.thresholds.classify(round_score(best_score));
            if self.explain {
                let breakdown = self.scorer.explain(&profile, &candidate_profiles[best_idx]);
                debug!(
                    row = customer.row_index,
                    candidate = best.body_index,
                    block = block.kind.as_str(),
                    score = round_score(breakdown.score),
                    %tier,
                    breakdown = %breakdown.explain(),
                    "best match"
                );
            }
            out.matches
                .push(MatchRecord::matched(customer, best, best_score, tier));
            for (rank, &(idx, score)) in (1u8..).zip(scored.iter().take(TOP_CANDIDATES)) {
                out.top3
                    .push(TopCandidate::new(customer, &candidates[idx], rank, score));
            }
        }

        debug!(
            source = %loaded.source_name,
            customers = customers.len(),
            candidates = candidates.len(),
            comparisons = compared,
            duration_ms = start.elapsed().as_millis(),
            "source matched"
        );
        out
    }
}
