pub mod bucket;
pub mod greedy;
pub mod minimum;

use crate::config::AllocatorConfig;
use crate::error::AllocationError;
use crate::offering::Offering;
use crate::offering_validation;
use crate::request::AllocationRequest;
use bucket::{group_offerings, partition_by_availability};
use greedy::GreedyUpgrade;
use minimum::select_minimum;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub category: String,
    pub offering: Offering,
}

impl Selection {
    pub fn new(category: impl Into<String>, offering: Offering) -> Self {
        Self {
            category: category.into(),
            offering,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub selections: Vec<Selection>,
    pub total_price: f64,
}

impl Allocation {
    pub fn new(mut selections: Vec<Selection>, total_price: f64) -> Self {
        selections.sort_by(|a, b| a.category.cmp(&b.category));
        Self {
            selections,
            total_price,
        }
    }

    pub fn selection_for(&self, category: &str) -> Option<&Offering> {
        self.selections
            .iter()
            .find(|s| s.category == category)
            .map(|s| &s.offering)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AllocationResult {
    Success {
        min_combination: Allocation,
        max_combination: Allocation,
    },
    Partial {
        available_categories: Vec<String>,
        missing_categories: Vec<String>,
    },
    Infeasible { min_total_price: f64, budget: f64 },
}

impl AllocationResult {
    pub fn min_total_price(&self) -> Option<f64> {
        match self {
            AllocationResult::Success {
                min_combination, ..
            } => Some(min_combination.total_price),
            AllocationResult::Infeasible {
                min_total_price, ..
            } => Some(*min_total_price),
            AllocationResult::Partial { .. } => None,
        }
    }

    pub fn max_total_price(&self) -> Option<f64> {
        match self {
            AllocationResult::Success {
                max_combination, ..
            } => Some(max_combination.total_price),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetAllocator {
    config: AllocatorConfig,
}

impl BudgetAllocator {
    pub fn new(config: AllocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    pub fn allocate(
        &self,
        catalog: &[Offering],
        request: &AllocationRequest,
    ) -> Result<AllocationResult, AllocationError> {
        request.validate(&self.config)?;
        offering_validation::validate_offering_collection(catalog).map_err(|err| {
            warn!(error = %err, "refusing to allocate over invalid catalog");
            AllocationError::invalid_catalog(err.to_string())
        })?;

        let categories = request.normalized_categories();
        let buckets = group_offerings(catalog, &request.location, &categories);

        let (available_categories, missing_categories) = partition_by_availability(&buckets);
        if !missing_categories.is_empty() {
            debug!(
                location = %request.location,
                missing = ?missing_categories,
                "categories without offerings"
            );
            return Ok(AllocationResult::Partial {
                available_categories,
                missing_categories,
            });
        }

        let min_combination = select_minimum(&buckets);
        if min_combination.total_price > request.budget {
            debug!(
                min_total_price = min_combination.total_price,
                budget = request.budget,
                "cheapest combination exceeds budget"
            );
            return Ok(AllocationResult::Infeasible {
                min_total_price: min_combination.total_price,
                budget: request.budget,
            });
        }

        let outcome =
            GreedyUpgrade::new(&buckets, request.budget).execute(min_combination.total_price);
        debug!(
            min_total_price = min_combination.total_price,
            max_total_price = outcome.allocation.total_price,
            upgrades = outcome.steps.len(),
            unspent = outcome.remaining_budget,
            "allocation complete"
        );

        Ok(AllocationResult::Success {
            min_combination,
            max_combination: outcome.allocation,
        })
    }

    pub fn allocate_from<S: crate::catalog::OfferingSource + ?Sized>(
        &self,
        source: &S,
        request: &AllocationRequest,
    ) -> Result<AllocationResult, AllocationError> {
        request.validate(&self.config)?;
        let snapshot = source
            .offerings_for(&request.location, &request.normalized_categories())
            .map_err(|err| AllocationError::invalid_catalog(err.to_string()))?;
        self.allocate(&snapshot, request)
    }
}
