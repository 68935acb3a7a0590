use crate::config::AllocatorConfig;
use crate::offering::Offering;
use crate::offering_validation;
use std::io;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read-only query over a set of offerings.
pub trait OfferingSource {
    fn offerings_for(&self, location: &str, categories: &[String]) -> CatalogResult<Vec<Offering>>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    offerings: Vec<Offering>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_offerings(offerings: Vec<Offering>) -> CatalogResult<Self> {
        validate_offerings(&offerings)?;
        Ok(Self { offerings })
    }

    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    pub fn len(&self) -> usize {
        self.offerings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Offering> {
        self.offerings.iter().find(|o| o.id == id)
    }

    pub fn upsert(&mut self, offering: Offering) -> CatalogResult<()> {
        offering_validation::validate_offering(&offering)
            .map_err(|err| CatalogError::InvalidData(err.to_string()))?;
        match self.offerings.iter_mut().find(|o| o.id == offering.id) {
            Some(existing) => *existing = offering,
            None => self.offerings.push(offering),
        }
        Ok(())
    }

    /// Like `upsert`, but also requires the category and location to be in `config`.
    pub fn upsert_within(
        &mut self,
        offering: Offering,
        config: &AllocatorConfig,
    ) -> CatalogResult<()> {
        offering_validation::validate_offering_in(&offering, config)
            .map_err(|err| CatalogError::InvalidData(err.to_string()))?;
        self.upsert(offering)
    }

    pub fn validate_against(&self, config: &AllocatorConfig) -> CatalogResult<()> {
        validate_offerings_against(&self.offerings, config)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.offerings.len();
        self.offerings.retain(|o| o.id != id);
        self.offerings.len() != before
    }
}

impl OfferingSource for Catalog {
    fn offerings_for(&self, location: &str, categories: &[String]) -> CatalogResult<Vec<Offering>> {
        Ok(self
            .offerings
            .iter()
            .filter(|o| o.location == location && categories.contains(&o.category))
            .cloned()
            .collect())
    }
}

pub fn validate_offerings(offerings: &[Offering]) -> CatalogResult<()> {
    offering_validation::validate_offering_collection(offerings).map_err(|err| {
        warn!(error = %err, "rejecting catalog snapshot");
        CatalogError::InvalidData(err.to_string())
    })
}

pub fn validate_offerings_against(
    offerings: &[Offering],
    config: &AllocatorConfig,
) -> CatalogResult<()> {
    for offering in offerings {
        offering_validation::validate_offering_in(offering, config).map_err(|err| {
            warn!(error = %err, "offering outside configured enumeration");
            CatalogError::InvalidData(err.to_string())
        })?;
    }
    Ok(())
}

pub mod file;

pub use file::{
    load_catalog_from_csv, load_catalog_from_json, save_catalog_to_csv, save_catalog_to_json,
};
