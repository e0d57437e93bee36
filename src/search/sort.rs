use std::cmp::Ordering;
use std::collections::HashMap;

use crate::pools::types::Pool;

use super::types::PoolResult;

/// One of the three orderings applied to collected pool results. Each variant
/// captures what it needs up front so comparisons stay O(1); in particular
/// by-sequence materializes its id-to-sequence map once instead of scanning
/// the pool set per comparison.
pub enum ResultOrdering {
    /// Registry sequence ascending; results whose pool is no longer in the
    /// set compare equal and keep their arrival order.
    BySequence { sequences: HashMap<String, u32> },
    /// Lexicographic pool id.
    ByName,
    /// Target pool first, then confidence, max score, and hit count, all
    /// descending.
    ByConfidence { target_url: String },
}

impl ResultOrdering {
    pub fn by_sequence(pools: &[Pool]) -> Self {
        let sequences = pools
            .iter()
            .map(|pool| (pool.id.clone(), pool.sequence))
            .collect();
        Self::BySequence { sequences }
    }

    pub fn by_name() -> Self {
        Self::ByName
    }

    pub fn by_confidence(target_url: &str) -> Self {
        Self::ByConfidence {
            target_url: target_url.to_string(),
        }
    }

    /// Strategy selection from the `sources` query parameter: `default` asks
    /// for confidence ranking, anything else (or nothing) keeps registry
    /// sequence order.
    pub fn for_request(sources: Option<&str>, pools: &[Pool], target_url: &str) -> Self {
        match sources {
            Some("default") => Self::by_confidence(target_url),
            _ => Self::by_sequence(pools),
        }
    }

    pub fn sort(&self, results: &mut [PoolResult]) {
        results.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(&self, a: &PoolResult, b: &PoolResult) -> Ordering {
        match self {
            Self::BySequence { sequences } => {
                match (sequences.get(&a.pool_name), sequences.get(&b.pool_name)) {
                    (Some(left), Some(right)) => left.cmp(right),
                    _ => Ordering::Equal,
                }
            }
            Self::ByName => a.pool_name.cmp(&b.pool_name),
            Self::ByConfidence { target_url } => {
                if !target_url.is_empty() && a.service_url != b.service_url {
                    if *target_url == a.service_url {
                        return Ordering::Less;
                    }
                    if *target_url == b.service_url {
                        return Ordering::Greater;
                    }
                }
                b.confidence_index()
                    .cmp(&a.confidence_index())
                    .then_with(|| {
                        b.max_score()
                            .partial_cmp(&a.max_score())
                            .unwrap_or(Ordering::Equal)
                    })
                    .then_with(|| b.pagination.total.cmp(&a.pagination.total))
            }
        }
    }
}
