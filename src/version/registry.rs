//! Registry trait for fetching the latest version of a tool

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::types::RegistryType;

/// Trait for fetching the latest published version from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the type of registry this implementation handles
    fn registry_type(&self) -> RegistryType;

    /// Fetches the latest published version of a package
    ///
    /// # Arguments
    /// * `package_name` - Registry-specific identifier (e.g., "projectdiscovery/nuclei" for GitHub)
    ///
    /// # Returns
    /// * `Ok(String)` - The raw version string as published (may carry a `v` prefix)
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError>;
}
