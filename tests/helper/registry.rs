//! Registry test utilities

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use toolsentry::check::runner::RegistryMap;
use toolsentry::version::error::RegistryError;
use toolsentry::version::registry::Registry;
use toolsentry::version::types::RegistryType;

/// Mock registry for testing
pub struct MockRegistry {
    registry_type: RegistryType,
    latest: HashMap<String, String>,
    calls: AtomicUsize,
}

impl MockRegistry {
    pub fn new(registry_type: RegistryType) -> Self {
        Self {
            registry_type,
            latest: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_latest(mut self, package: &str, version: &str) -> Self {
        self.latest.insert(package.to_string(), version.to_string());
        self
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registry for MockRegistry {
    fn registry_type(&self) -> RegistryType {
        self.registry_type
    }

    async fn fetch_latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.latest.get(package_name) {
            Some(version) => Ok(version.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// Build a registry map from mock registries
pub fn create_test_registries(registries: Vec<Arc<MockRegistry>>) -> RegistryMap {
    registries
        .into_iter()
        .map(|registry| {
            let registry_type = registry.registry_type();
            (registry_type, registry as Arc<dyn Registry>)
        })
        .collect()
}
