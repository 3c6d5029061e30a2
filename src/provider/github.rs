//! GitHub-style provider implementation

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::config::Config;
use crate::provider::{FetchRef, Provider, ProviderError, TreeEntry};

/// One entry of the contents API response
#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    /// Null for directories
    download_url: Option<String>,
}

/// Provider backed by the GitHub contents API
pub struct GithubProvider {
    client: reqwest::Client,
    api_url: String,
}

impl GithubProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("depwatch")
                .timeout(Duration::from_secs(config.http.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            api_url: config.providers.github_api_url.clone(),
        }
    }
}

#[async_trait::async_trait]
impl Provider for GithubProvider {
    async fn list_tree(&self, owner: &str, name: &str) -> Result<Vec<TreeEntry>, ProviderError> {
        let url = format!("{}/repos/{}/{}/contents", self.api_url, owner, name);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(format!("{owner}/{name}")));
        }

        if !status.is_success() {
            warn!("GitHub contents API returned status {}: {}", status, url);
            return Err(ProviderError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let entries: Vec<ContentsEntry> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub contents response: {}", e);
            ProviderError::InvalidResponse(e.to_string())
        })?;

        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let download_url = entry.download_url?;
                Some(TreeEntry {
                    name: entry.name,
                    fetch: FetchRef::Url(download_url),
                })
            })
            .collect())
    }

    async fn fetch_manifest(&self, entry: &TreeEntry) -> Result<serde_json::Value, ProviderError> {
        let FetchRef::Url(url) = &entry.fetch else {
            return Err(ProviderError::InvalidResponse(format!(
                "tree entry {} has no download URL",
                entry.name
            )));
        };

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ProviderError::InvalidResponse(format!(
                "Unexpected status fetching {}: {}",
                entry.name, status
            )));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse manifest {}: {}", entry.name, e);
            ProviderError::InvalidResponse(e.to_string())
        })
    }
}
