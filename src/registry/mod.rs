//! Registry layer
//! - npm.rs: npm registry client (dist-tags.latest)
//! - packagist.rs: Packagist client (max stable normalized version)

pub mod npm;
pub mod packagist;

pub use npm::NpmRegistry;
pub use packagist::PackagistRegistry;

#[cfg(test)]
use mockall::automock;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::manifest::ManifestKind;

/// Trait for resolving a package name to its latest stable version
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Manifest kind this registry serves
    fn kind(&self) -> ManifestKind;

    /// Fetches the latest stable version for a package
    ///
    /// Returns an empty string when the registry has nothing to offer for
    /// the name (e.g., non-namespaced composer pseudo-packages).
    async fn latest_version(&self, package_name: &str) -> Result<String, RegistryError>;
}

/// Error type for registry lookups
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Build one registry client per manifest kind
pub fn default_registries(config: &Config) -> HashMap<ManifestKind, Arc<dyn Registry>> {
    let mut registries: HashMap<ManifestKind, Arc<dyn Registry>> = HashMap::new();
    registries.insert(ManifestKind::Npm, Arc::new(NpmRegistry::new(config)));
    registries.insert(
        ManifestKind::Composer,
        Arc::new(PackagistRegistry::new(config)),
    );
    registries
}
