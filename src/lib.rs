pub mod allocation;
pub mod catalog;
pub mod config;
pub mod error;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod offering;
pub(crate) mod offering_validation;
pub mod request;
pub mod response;

pub use allocation::greedy::{GreedyOutcome, GreedyUpgrade, UpgradeStep};
pub use allocation::{Allocation, AllocationResult, BudgetAllocator, Selection};
pub use catalog::{
    Catalog, CatalogError, OfferingSource, load_catalog_from_csv, load_catalog_from_json,
    save_catalog_to_csv, save_catalog_to_json, validate_offerings, validate_offerings_against,
};
pub use config::{AllocatorConfig, ConfigError, ServerSettings, load_config_from_json};
pub use error::AllocationError;
pub use offering::Offering;
pub use request::AllocationRequest;
pub use response::{CombinationRequest, CombinationResponse, ErrorResponse, ServiceEntry};
