//! Packagist registry API implementation

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::config::Config;
use crate::manifest::ManifestKind;
use crate::registry::{Registry, RegistryError};
use crate::semver::VersionTriple;

/// Response from the Packagist package endpoint
#[derive(Debug, Deserialize)]
struct PackagistResponse {
    package: PackagistPackage,
}

#[derive(Debug, Deserialize)]
struct PackagistPackage {
    versions: HashMap<String, PackagistVersion>,
}

#[derive(Debug, Deserialize)]
struct PackagistVersion {
    version_normalized: String,
}

/// Registry client for the Packagist API
pub struct PackagistRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl PackagistRegistry {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("depwatch")
                .timeout(Duration::from_secs(config.http.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.registries.packagist_url.clone(),
        }
    }
}

/// Pick the greatest stable version out of Packagist's normalized version
/// strings. Pre-release and dev builds (anything containing `-` or `dev`)
/// are skipped, as are versions whose first three segments are not numeric.
fn max_stable_version<'a, I>(normalized_versions: I) -> Option<VersionTriple>
where
    I: IntoIterator<Item = &'a str>,
{
    normalized_versions
        .into_iter()
        .filter(|v| !v.contains('-') && !v.contains("dev"))
        .filter_map(VersionTriple::parse_strict)
        .max()
}

#[async_trait::async_trait]
impl Registry for PackagistRegistry {
    fn kind(&self) -> ManifestKind {
        ManifestKind::Composer
    }

    async fn latest_version(&self, package_name: &str) -> Result<String, RegistryError> {
        // Non-namespaced names like "php" are platform pseudo-packages,
        // not Packagist entries; skip the lookup entirely.
        if !package_name.contains('/') {
            return Ok(String::new());
        }

        let url = format!("{}/packages/{}.json", self.base_url, package_name);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("Packagist returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let package_info: PackagistResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Packagist response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let latest = max_stable_version(
            package_info
                .package
                .versions
                .values()
                .map(|v| v.version_normalized.as_str()),
        );

        Ok(latest.map(|v| v.to_string()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn test_config(base_url: &str) -> Config {
        let mut config = Config::default();
        config.registries.packagist_url = base_url.to_string();
        config
    }

    #[test]
    fn max_stable_version_skips_prerelease_and_dev_builds() {
        let latest = max_stable_version(["2.0.0.0", "2.1.0-beta", "dev-master", "9999999-dev"]);
        assert_eq!(latest, Some(VersionTriple::new(2, 0, 0)));
    }

    #[test]
    fn max_stable_version_uses_tuple_ordering() {
        let latest = max_stable_version(["1.9.9.0", "2.0.0.0", "1.10.3.0"]);
        assert_eq!(latest, Some(VersionTriple::new(2, 0, 0)));
    }

    #[test]
    fn max_stable_version_returns_none_when_nothing_stable() {
        assert_eq!(max_stable_version(["dev-main", "1.0.0-rc1"]), None);
    }

    #[tokio::test]
    async fn latest_version_selects_greatest_stable_version() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/packages/monolog/monolog.json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "package": {
                        "versions": {
                            "2.0.0": {"version_normalized": "2.0.0.0"},
                            "2.1.0-beta": {"version_normalized": "2.1.0.0-beta"},
                            "1.26.1": {"version_normalized": "1.26.1.0"},
                            "dev-main": {"version_normalized": "dev-main"}
                        }
                    }
                }"#,
            )
            .create_async()
            .await;

        let registry = PackagistRegistry::new(&test_config(&server.url()));
        let latest = registry.latest_version("monolog/monolog").await.unwrap();

        mock.assert_async().await;
        assert_eq!(latest, "2.0.0");
    }

    #[tokio::test]
    async fn latest_version_short_circuits_non_namespaced_names() {
        let mut server = Server::new_async().await;

        // No request may hit the server for platform pseudo-packages
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let registry = PackagistRegistry::new(&test_config(&server.url()));
        let latest = registry.latest_version("php").await.unwrap();

        mock.assert_async().await;
        assert_eq!(latest, "");
    }

    #[tokio::test]
    async fn latest_version_returns_not_found_for_missing_package() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/packages/acme/unknown.json")
            .with_status(404)
            .create_async()
            .await;

        let registry = PackagistRegistry::new(&test_config(&server.url()));
        let result = registry.latest_version("acme/unknown").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }
}
