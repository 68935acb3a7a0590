//! JSON shapes of the combination-finder endpoint.
//!
//! Kept apart from [`crate::allocation`] so the allocator itself stays free of
//! transport concerns.

use crate::allocation::{Allocation, AllocationResult};
use crate::error::AllocationError;
use crate::offering::Offering;
use crate::request::AllocationRequest;
use serde::{Deserialize, Serialize};

pub const PARTIAL_MESSAGE: &str =
    "Some of the requested categories have no services at this location";
pub const NO_COMBINATION_MESSAGE: &str =
    "No combination of services fits within the given budget";

/// Request body as received over the wire.
///
/// Every field is optional here so a missing field becomes a readable
/// validation error instead of a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombinationRequest {
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
}

impl CombinationRequest {
    pub fn into_request(self) -> Result<AllocationRequest, AllocationError> {
        let budget = self
            .budget
            .ok_or_else(|| AllocationError::invalid_request("budget is required"))?;
        let location = self
            .location
            .ok_or_else(|| AllocationError::invalid_request("location is required"))?;
        let categories = self
            .categories
            .ok_or_else(|| AllocationError::invalid_request("categories are required"))?;
        Ok(AllocationRequest {
            budget,
            location,
            categories,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceEntry {
    pub category: String,
    pub service: Offering,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status")]
pub enum CombinationResponse {
    #[serde(rename = "success", rename_all = "camelCase")]
    Success {
        min_price_combination: Vec<ServiceEntry>,
        max_price_combination: Vec<ServiceEntry>,
        min_total_price: f64,
        max_total_price: f64,
    },
    #[serde(rename = "partial", rename_all = "camelCase")]
    Partial {
        message: String,
        available_categories: Vec<String>,
        missing_categories: Vec<String>,
    },
    #[serde(rename = "no_combination", rename_all = "camelCase")]
    NoCombination {
        message: String,
        min_price_combination: Option<Vec<ServiceEntry>>,
        max_price_combination: Option<Vec<ServiceEntry>>,
        min_total_price: f64,
    },
}

fn entries(allocation: &Allocation) -> Vec<ServiceEntry> {
    allocation
        .selections
        .iter()
        .map(|selection| ServiceEntry {
            category: selection.category.clone(),
            service: selection.offering.clone(),
        })
        .collect()
}

impl From<&AllocationResult> for CombinationResponse {
    fn from(result: &AllocationResult) -> Self {
        match result {
            AllocationResult::Success {
                min_combination,
                max_combination,
            } => CombinationResponse::Success {
                min_price_combination: entries(min_combination),
                max_price_combination: entries(max_combination),
                min_total_price: min_combination.total_price,
                max_total_price: max_combination.total_price,
            },
            AllocationResult::Partial {
                available_categories,
                missing_categories,
            } => CombinationResponse::Partial {
                message: PARTIAL_MESSAGE.to_string(),
                available_categories: available_categories.clone(),
                missing_categories: missing_categories.clone(),
            },
            AllocationResult::Infeasible {
                min_total_price, ..
            } => CombinationResponse::NoCombination {
                message: NO_COMBINATION_MESSAGE.to_string(),
                min_price_combination: None,
                max_price_combination: None,
                min_total_price: *min_total_price,
            },
        }
    }
}

impl From<AllocationResult> for CombinationResponse {
    fn from(result: AllocationResult) -> Self {
        CombinationResponse::from(&result)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&AllocationError> for ErrorResponse {
    fn from(err: &AllocationError) -> Self {
        Self {
            error: err.detail().to_string(),
        }
    }
}
