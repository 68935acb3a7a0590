use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AllocationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl AllocationError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        AllocationError::InvalidRequest(message.into())
    }

    pub fn invalid_catalog(message: impl Into<String>) -> Self {
        AllocationError::InvalidCatalog(message.into())
    }

    pub fn detail(&self) -> &str {
        match self {
            AllocationError::InvalidRequest(message) | AllocationError::InvalidCatalog(message) => {
                message
            }
        }
    }
}
