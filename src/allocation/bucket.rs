use crate::offering::Offering;
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBucket<'a> {
    category: String,
    offerings: Vec<&'a Offering>,
}

impl<'a> CategoryBucket<'a> {
    pub fn new(category: impl Into<String>, mut offerings: Vec<&'a Offering>) -> Self {
        offerings.sort_by(|a, b| price_then_id(a, b));
        Self {
            category: category.into(),
            offerings,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn offerings(&self) -> &[&'a Offering] {
        &self.offerings
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Offering> {
        self.offerings.get(index).copied()
    }

    pub fn cheapest(&self) -> Option<&'a Offering> {
        self.offerings.first().copied()
    }

    pub fn most_expensive(&self) -> Option<&'a Offering> {
        self.offerings.last().copied()
    }

    pub fn spread(&self) -> f64 {
        match (self.cheapest(), self.most_expensive()) {
            (Some(low), Some(high)) => high.price - low.price,
            _ => 0.0,
        }
    }
}

fn price_then_id(a: &Offering, b: &Offering) -> Ordering {
    a.price.total_cmp(&b.price).then_with(|| a.id.cmp(&b.id))
}

/// Categories without any matching offering still get an (empty) bucket so
/// callers can report them as missing.
pub fn group_offerings<'a>(
    catalog: &'a [Offering],
    location: &str,
    categories: &[String],
) -> Vec<CategoryBucket<'a>> {
    let mut grouped: BTreeMap<&str, Vec<&'a Offering>> = categories
        .iter()
        .map(|category| (category.as_str(), Vec::new()))
        .collect();

    for offering in catalog.iter().filter(|o| o.location == location) {
        if let Some(bucket) = grouped.get_mut(offering.category.as_str()) {
            bucket.push(offering);
        }
    }

    categories
        .iter()
        .map(|category| {
            let offerings = grouped.remove(category.as_str()).unwrap_or_default();
            CategoryBucket::new(category.clone(), offerings)
        })
        .collect()
}

pub fn partition_by_availability(buckets: &[CategoryBucket<'_>]) -> (Vec<String>, Vec<String>) {
    let mut available = Vec::new();
    let mut missing = Vec::new();
    for bucket in buckets {
        if bucket.is_empty() {
            missing.push(bucket.category.clone());
        } else {
            available.push(bucket.category.clone());
        }
    }
    (available, missing)
}
