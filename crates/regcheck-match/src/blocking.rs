//! Candidate blocking: restricts scoring to a plausible subset.

use std::collections::HashMap;

use regcheck_model::{BlockingRules, MatchKeys, RegistryCandidate};

use crate::score::municipalities_match;

/// Which stage of the cascade produced a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Exact postal-code equality.
    PostalCode,
    /// Municipality equality or containment.
    Municipality,
    /// The first `fallback_cap` candidates of the source.
    Fallback,
}

impl BlockKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PostalCode => "postal_code",
            Self::Municipality => "municipality",
            Self::Fallback => "fallback",
        }
    }
}

/// Candidate indices to score for one customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub indices: Vec<usize>,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }
}

/// Blocking keys of one source's candidates.
///
/// Postal codes are indexed up front; municipalities are scanned since
/// containment cannot be looked up by key.
#[derive(Debug)]
pub struct BlockingIndex<'a> {
    candidates: &'a [RegistryCandidate],
    by_postal_code: HashMap<&'a str, Vec<usize>>,
    fallback_cap: usize,
}

impl<'a> BlockingIndex<'a> {
    pub fn new(candidates: &'a [RegistryCandidate], rules: &BlockingRules) -> Self {
        let mut by_postal_code: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (idx, candidate) in candidates.iter().enumerate() {
            if let Some(code) = candidate.keys.postal_code.as_deref() {
                by_postal_code.entry(code).or_default().push(idx);
            }
        }
        Self {
            candidates,
            by_postal_code,
            fallback_cap: rules.fallback_cap,
        }
    }

    pub fn candidates(&self) -> &'a [RegistryCandidate] {
        self.candidates
    }

    /// Cascade: postal code, then municipality, then the capped full list.
    /// The first non-empty stage wins. Indices are in source order.
    pub fn block(&self, customer: &MatchKeys) -> Block {
        if let Some(indices) = customer
            .postal_code
            .as_deref()
            .and_then(|code| self.by_postal_code.get(code))
        {
            return Block {
                kind: BlockKind::PostalCode,
                indices: indices.clone(),
            };
        }

        if !customer.municipality.is_empty() {
            let indices: Vec<usize> = self
                .candidates
                .iter()
                .enumerate()
                .filter(|(_, candidate)| {
                    municipalities_match(&candidate.keys.municipality, &customer.municipality)
                })
                .map(|(idx, _)| idx)
                .collect();
            if !indices.is_empty() {
                return Block {
                    kind: BlockKind::Municipality,
                    indices,
                };
            }
        }

        Block {
            kind: BlockKind::Fallback,
            indices: (0..self.candidates.len().min(self.fallback_cap)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(idx: usize, cp: Option<&str>, muni: &str) -> RegistryCandidate {
        RegistryCandidate {
            source_name: "test".to_string(),
            body_index: idx,
            name: None,
            via: None,
            number: None,
            municipality: None,
            center_code: None,
            last_authorization_date: None,
            service_offering: None,
            keys: MatchKeys {
                municipality: muni.to_string(),
                postal_code: cp.map(str::to_string),
                ..MatchKeys::default()
            },
        }
    }

    fn customer(cp: Option<&str>, muni: &str) -> MatchKeys {
        MatchKeys {
            municipality: muni.to_string(),
            postal_code: cp.map(str::to_string),
            ..MatchKeys::default()
        }
    }

    fn pool() -> Vec<RegistryCandidate> {
        vec![
            candidate(0, Some("10600"), "PLASENCIA"),
            candidate(1, Some("27001"), "LUGO"),
            candidate(2, None, "VILLALUGO"),
            candidate(3, Some("10600"), ""),
        ]
    }

    #[test]
    fn postal_code_block_comes_first() {
        let candidates = pool();
        let index = BlockingIndex::new(&candidates, &BlockingRules::default());
        let block = index.block(&customer(Some("10600"), "LUGO"));
        assert_eq!(block.kind, BlockKind::PostalCode);
        assert_eq!(block.indices, vec![0, 3]);
    }

    #[test]
    fn falls_back_to_municipality_containment() {
        let candidates = pool();
        let index = BlockingIndex::new(&candidates, &BlockingRules::default());
        let block = index.block(&customer(Some("99999"), "LUGO"));
        assert_eq!(block.kind, BlockKind::Municipality);
        assert_eq!(block.indices, vec![1, 2]);
    }

    #[test]
    fn capped_fallback_without_keys() {
        let candidates = pool();
        let rules = BlockingRules { fallback_cap: 2 };
        let index = BlockingIndex::new(&candidates, &rules);
        let block = index.block(&customer(None, ""));
        assert_eq!(block.kind, BlockKind::Fallback);
        assert_eq!(block.indices, vec![0, 1]);
    }

    #[test]
    fn empty_source_gives_empty_block() {
        let index = BlockingIndex::new(&[], &BlockingRules::default());
        let block = index.block(&customer(Some("10600"), "PLASENCIA"));
        assert!(block.is_empty());
        assert_eq!(block.kind, BlockKind::Fallback);
    }
}
