use super::bucket::CategoryBucket;
use super::{Allocation, Selection};

/// Empty buckets contribute nothing; the allocator gates on completeness
/// before calling this.
pub fn select_minimum(buckets: &[CategoryBucket<'_>]) -> Allocation {
    let selections: Vec<Selection> = buckets
        .iter()
        .filter_map(|bucket| {
            bucket
                .cheapest()
                .map(|offering| Selection::new(bucket.category(), offering.clone()))
        })
        .collect();
    let total_price = selections.iter().map(|s| s.offering.price).sum();
    Allocation::new(selections, total_price)
}
