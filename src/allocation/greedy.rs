use super::bucket::CategoryBucket;
use super::{Allocation, Selection};
use tracing::trace;

#[derive(Debug, Clone, PartialEq)]
pub struct UpgradeStep {
    pub category: String,
    pub from_id: String,
    pub to_id: String,
    pub delta: f64,
    pub remaining_budget: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOutcome {
    pub allocation: Allocation,
    pub remaining_budget: f64,
    pub steps: Vec<UpgradeStep>,
}

/// Single-pass upgrade from the cheapest pick of every bucket toward the budget.
///
/// Categories are visited once, widest price spread first. A category stops
/// at the first candidate it cannot afford and is never revisited, so budget
/// left over after a later category is processed stays unspent. This is not a
/// knapsack optimum.
pub struct GreedyUpgrade<'b, 'a> {
    buckets: &'b [CategoryBucket<'a>],
    budget: f64,
}

impl<'b, 'a> GreedyUpgrade<'b, 'a> {
    pub fn new(buckets: &'b [CategoryBucket<'a>], budget: f64) -> Self {
        Self { buckets, budget }
    }

    pub fn processing_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.buckets.len()).collect();
        order.sort_by(|&a, &b| {
            let (left, right) = (&self.buckets[a], &self.buckets[b]);
            right
                .spread()
                .total_cmp(&left.spread())
                .then_with(|| left.category().cmp(right.category()))
        });
        order
    }

    pub fn execute(&self, min_total_price: f64) -> GreedyOutcome {
        let mut picks = vec![0usize; self.buckets.len()];
        let mut remaining = (self.budget - min_total_price).max(0.0);
        let mut total = min_total_price;
        let mut steps = Vec::new();

        for bucket_idx in self.processing_order() {
            let bucket = &self.buckets[bucket_idx];
            let Some(mut current) = bucket.cheapest() else {
                continue;
            };
            for candidate_idx in 1..bucket.len() {
                let Some(candidate) = bucket.get(candidate_idx) else {
                    break;
                };
                let delta = candidate.price - current.price;
                if delta > remaining {
                    // sorted ascending: nothing later in this bucket fits either
                    break;
                }
                remaining -= delta;
                total += delta;
                picks[bucket_idx] = candidate_idx;
                trace!(
                    category = bucket.category(),
                    from = %current.id,
                    to = %candidate.id,
                    delta,
                    remaining,
                    "accepted upgrade"
                );
                steps.push(UpgradeStep {
                    category: bucket.category().to_string(),
                    from_id: current.id.clone(),
                    to_id: candidate.id.clone(),
                    delta,
                    remaining_budget: remaining,
                });
                current = candidate;
            }
        }

        let selections = self
            .buckets
            .iter()
            .zip(picks.iter())
            .filter_map(|(bucket, &pick)| {
                bucket
                    .get(pick)
                    .map(|offering| Selection::new(bucket.category(), offering.clone()))
            })
            .collect();

        GreedyOutcome {
            // float drift on the running sum must not push the total over budget
            allocation: Allocation::new(selections, total.min(self.budget.max(min_total_price))),
            remaining_budget: remaining,
            steps,
        }
    }
}
