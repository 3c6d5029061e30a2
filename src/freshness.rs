//! Freshness resolution orchestration
//!
//! Resolves a repository URL into a full package-status list:
//! provider tree listing, manifest parsing, concurrent registry lookups,
//! version comparison. The resulting list wholesale-replaces whatever the
//! caller had stored for the repository.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::{self, StreamExt};
use reqwest::Url;
use tracing::{debug, warn};

use crate::config::Config;
use crate::manifest::{self, ManifestEntry, ManifestKind, ParseError};
use crate::model::PackageStatus;
use crate::provider::{self, ProviderError};
use crate::registry::{self, Registry};
use crate::semver;

/// Error type for a whole-repository resolution
///
/// Individual registry lookup failures are absorbed per package and never
/// surface here; these are the failures that make the whole run
/// meaningless.
#[derive(Debug, thiserror::Error)]
pub enum FreshnessError {
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("No manifest file found in repository root")]
    NoManifest,
}

/// Orchestrates provider, parsers, registries, and the comparator
pub struct FreshnessResolver {
    config: Config,
    registries: HashMap<ManifestKind, Arc<dyn Registry>>,
}

impl FreshnessResolver {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            registries: registry::default_registries(config),
        }
    }

    /// Resolve a repository URL into a complete package-status list.
    ///
    /// Fatal conditions: unknown host, unreachable tree, no manifest file,
    /// malformed manifest. A failing registry lookup only blanks that one
    /// package's latest version.
    pub async fn resolve(&self, repository_url: &str) -> Result<Vec<PackageStatus>, FreshnessError> {
        let url = Url::parse(repository_url)
            .map_err(|e| FreshnessError::InvalidUrl(e.to_string()))?;
        let provider = provider::provider_for(&url, &self.config)?;

        let (owner, name) = provider.resolve_owner_and_name(&url)?;
        debug!("Resolving freshness for {}/{}", owner, name);

        let tree = provider.list_tree(&owner, &name).await?;
        let mut manifests = provider::locate_manifests(&tree);
        if manifests.is_empty() {
            return Err(FreshnessError::NoManifest);
        }
        // File-name order keeps repeated resolutions byte-identical.
        manifests.sort_by(|a, b| a.name.cmp(&b.name));

        let mut entries: Vec<ManifestEntry> = Vec::new();
        for manifest_file in &manifests {
            let document = provider.fetch_manifest(manifest_file).await?;
            let packages = manifest::parse_manifest(&manifest_file.name, &document)?;
            entries.extend(packages.into_iter().map(|(pkg, constraint)| ManifestEntry {
                name: pkg,
                declared_constraint: constraint,
                source_file: manifest_file.name.clone(),
            }));
        }

        // Bounded, order-preserving fan-out over registry lookups. Each
        // lookup failure is absorbed into an unknown latest version so the
        // siblings still complete; the whole batch joins before returning.
        let workers = self.config.http.lookup_workers.max(1);
        let statuses = stream::iter(entries)
            .map(|entry| self.resolve_entry(entry))
            .buffered(workers)
            .collect::<Vec<_>>()
            .await;

        Ok(statuses)
    }

    async fn resolve_entry(&self, entry: ManifestEntry) -> PackageStatus {
        let latest = match ManifestKind::from_file_name(&entry.source_file)
            .and_then(|kind| self.registries.get(&kind))
        {
            Some(registry) => match registry.latest_version(&entry.name).await {
                Ok(version) if version.is_empty() => None,
                Ok(version) => Some(version),
                Err(e) => {
                    warn!(
                        "Registry lookup failed for {} ({}): {}",
                        entry.name, entry.source_file, e
                    );
                    None
                }
            },
            None => None,
        };

        let is_outdated = latest
            .as_deref()
            .is_some_and(|latest| semver::is_outdated(latest, &entry.declared_constraint));

        PackageStatus {
            name: entry.name,
            current_version: entry.declared_constraint,
            latest_version: latest,
            source_file: entry.source_file,
            is_outdated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestKind;
    use crate::registry::MockRegistry;

    fn entry(name: &str, constraint: &str, file: &str) -> ManifestEntry {
        ManifestEntry {
            name: name.to_string(),
            declared_constraint: constraint.to_string(),
            source_file: file.to_string(),
        }
    }

    fn resolver_with_registry(registry: MockRegistry) -> FreshnessResolver {
        let mut resolver = FreshnessResolver::new(&Config::default());
        resolver
            .registries
            .insert(ManifestKind::Npm, Arc::new(registry));
        resolver
    }

    #[tokio::test]
    async fn resolve_entry_flags_outdated_package() {
        let mut registry = MockRegistry::new();
        registry
            .expect_latest_version()
            .withf(|name| name == "lodash")
            .returning(|_| Ok("4.17.21".to_string()));

        let resolver = resolver_with_registry(registry);
        let status = resolver
            .resolve_entry(entry("lodash", "4.17.0", "package.json"))
            .await;

        assert_eq!(status.latest_version.as_deref(), Some("4.17.21"));
        assert!(status.is_outdated);
    }

    #[tokio::test]
    async fn resolve_entry_absorbs_registry_failure() {
        let mut registry = MockRegistry::new();
        registry.expect_latest_version().returning(|name| {
            Err(crate::registry::RegistryError::NotFound(name.to_string()))
        });

        let resolver = resolver_with_registry(registry);
        let status = resolver
            .resolve_entry(entry("ghost-package", "1.0.0", "package.json"))
            .await;

        assert_eq!(status.latest_version, None);
        assert!(!status.is_outdated);
    }

    #[tokio::test]
    async fn resolve_entry_treats_empty_latest_as_unknown() {
        let mut registry = MockRegistry::new();
        registry
            .expect_latest_version()
            .returning(|_| Ok(String::new()));

        let resolver = resolver_with_registry(registry);
        let status = resolver
            .resolve_entry(entry("left-pad", "1.3.0", "package.json"))
            .await;

        assert_eq!(status.latest_version, None);
        assert!(!status.is_outdated);
    }

    #[tokio::test]
    async fn resolve_entry_keeps_current_package_unflagged() {
        let mut registry = MockRegistry::new();
        registry
            .expect_latest_version()
            .returning(|_| Ok("2.0.0".to_string()));

        let resolver = resolver_with_registry(registry);
        let status = resolver
            .resolve_entry(entry("modern", "2.0.0", "package.json"))
            .await;

        assert_eq!(status.latest_version.as_deref(), Some("2.0.0"));
        assert!(!status.is_outdated);
    }

    #[tokio::test]
    async fn resolve_rejects_unknown_host_before_any_network_call() {
        let resolver = FreshnessResolver::new(&Config::default());
        let result = resolver
            .resolve("https://bitbucket.org/owner/repo")
            .await;

        assert!(matches!(
            result,
            Err(FreshnessError::Provider(ProviderError::UnsupportedHost(_)))
        ));
    }

    #[tokio::test]
    async fn resolve_rejects_unparsable_url() {
        let resolver = FreshnessResolver::new(&Config::default());
        let result = resolver.resolve("not a url").await;
        assert!(matches!(result, Err(FreshnessError::InvalidUrl(_))));
    }
}
