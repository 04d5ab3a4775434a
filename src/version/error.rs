use thiserror::Error;

use crate::version::types::Sentinel;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RegistryError {
    /// Classify a transport error, separating timeouts from other failures
    pub fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            RegistryError::Timeout
        } else {
            RegistryError::Network(error)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Version is a placeholder: {0}")]
    Sentinel(Sentinel),

    #[error("No numeric component in version: {0:?}")]
    NoNumericComponents(String),
}
