use crate::config::AllocatorConfig;
use crate::error::AllocationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub budget: f64,
    pub location: String,
    pub categories: Vec<String>,
}

impl AllocationRequest {
    pub fn new<I, S>(budget: f64, location: impl Into<String>, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            budget,
            location: location.into(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn normalized_categories(&self) -> Vec<String> {
        self.categories
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn validate(&self, config: &AllocatorConfig) -> Result<(), AllocationError> {
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(AllocationError::invalid_request(format!(
                "budget must be a positive number (got {})",
                self.budget
            )));
        }

        if self.location.trim().is_empty() {
            return Err(AllocationError::invalid_request("location is required"));
        }
        if !config.allows_location(&self.location) {
            return Err(AllocationError::invalid_request(format!(
                "unknown location '{}'",
                self.location
            )));
        }

        if self.categories.is_empty() {
            return Err(AllocationError::invalid_request(
                "at least one category is required",
            ));
        }
        for category in &self.categories {
            if category.trim().is_empty() {
                return Err(AllocationError::invalid_request(
                    "category names must not be blank",
                ));
            }
            if !config.allows_category(category) {
                return Err(AllocationError::invalid_request(format!(
                    "unknown category '{category}'"
                )));
            }
        }

        Ok(())
    }
}
