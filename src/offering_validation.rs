use crate::config::AllocatorConfig;
use crate::offering::Offering;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct OfferingValidationError {
    message: String,
}

impl OfferingValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn validate_offering(offering: &Offering) -> Result<(), OfferingValidationError> {
    if offering.id.trim().is_empty() {
        return Err(OfferingValidationError::new(
            "offering requires a non-empty id",
        ));
    }

    if !offering.price.is_finite() {
        return Err(OfferingValidationError::new(format!(
            "offering {} has non-finite price {}",
            offering.id, offering.price
        )));
    }
    if offering.price < 0.0 {
        return Err(OfferingValidationError::new(format!(
            "offering {} has negative price {}",
            offering.id, offering.price
        )));
    }

    if offering.category.trim().is_empty() {
        return Err(OfferingValidationError::new(format!(
            "offering {} requires a non-empty category",
            offering.id
        )));
    }
    if offering.location.trim().is_empty() {
        return Err(OfferingValidationError::new(format!(
            "offering {} requires a non-empty location",
            offering.id
        )));
    }

    Ok(())
}

pub fn validate_offering_in(
    offering: &Offering,
    config: &AllocatorConfig,
) -> Result<(), OfferingValidationError> {
    if !config.allows_category(&offering.category) {
        return Err(OfferingValidationError::new(format!(
            "offering {} has unknown category '{}'",
            offering.id, offering.category
        )));
    }
    if !config.allows_location(&offering.location) {
        return Err(OfferingValidationError::new(format!(
            "offering {} has unknown location '{}'",
            offering.id, offering.location
        )));
    }
    Ok(())
}

pub fn validate_offering_collection(offerings: &[Offering]) -> Result<(), OfferingValidationError> {
    let mut seen_ids = HashSet::with_capacity(offerings.len());
    for offering in offerings {
        validate_offering(offering)?;
        if !seen_ids.insert(offering.id.as_str()) {
            return Err(OfferingValidationError::new(format!(
                "duplicate offering id {}",
                offering.id
            )));
        }
    }
    Ok(())
}
