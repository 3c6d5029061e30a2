//! GitLab-style provider implementation
//!
//! GitLab's tree and blob endpoints are keyed by a numeric project id, so
//! listing requires an extra search call first. The resolved id is threaded
//! through the tree entries so blob fetches can reuse it.

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::config::Config;
use crate::provider::{FetchRef, Provider, ProviderError, TreeEntry};

/// One project from the search endpoint
#[derive(Debug, Deserialize)]
struct ProjectEntry {
    id: u64,
    path_with_namespace: String,
}

/// One entry from the repository tree endpoint
#[derive(Debug, Deserialize)]
struct GitlabTreeEntry {
    /// Blob sha
    id: String,
    name: String,
}

/// Provider backed by the GitLab REST API
pub struct GitlabProvider {
    client: reqwest::Client,
    api_url: String,
}

impl GitlabProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("depwatch")
                .timeout(Duration::from_secs(config.http.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            api_url: config.providers.gitlab_api_url.clone(),
        }
    }

    /// Resolve the numeric project id for owner/name via the search endpoint
    async fn resolve_project_id(&self, owner: &str, name: &str) -> Result<u64, ProviderError> {
        let url = format!("{}/projects?search={}", self.api_url, name);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!("GitLab project search returned status {}: {}", status, url);
            return Err(ProviderError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let projects: Vec<ProjectEntry> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitLab project search response: {}", e);
            ProviderError::InvalidResponse(e.to_string())
        })?;

        let wanted = format!("{owner}/{name}");
        projects
            .into_iter()
            .find(|p| p.path_with_namespace == wanted)
            .map(|p| p.id)
            .ok_or(ProviderError::NotFound(wanted))
    }
}

#[async_trait::async_trait]
impl Provider for GitlabProvider {
    async fn list_tree(&self, owner: &str, name: &str) -> Result<Vec<TreeEntry>, ProviderError> {
        let project_id = self.resolve_project_id(owner, name).await?;

        let url = format!("{}/projects/{}/repository/tree", self.api_url, project_id);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(format!("{owner}/{name}")));
        }

        if !status.is_success() {
            warn!("GitLab tree API returned status {}: {}", status, url);
            return Err(ProviderError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let entries: Vec<GitlabTreeEntry> = response.json().await.map_err(|e| {
            warn!("Failed to parse GitLab tree response: {}", e);
            ProviderError::InvalidResponse(e.to_string())
        })?;

        Ok(entries
            .into_iter()
            .map(|entry| TreeEntry {
                name: entry.name,
                fetch: FetchRef::GitlabBlob {
                    project_id,
                    blob_id: entry.id,
                },
            })
            .collect())
    }

    async fn fetch_manifest(&self, entry: &TreeEntry) -> Result<serde_json::Value, ProviderError> {
        let FetchRef::GitlabBlob {
            project_id,
            blob_id,
        } = &entry.fetch
        else {
            return Err(ProviderError::InvalidResponse(format!(
                "tree entry {} has no blob coordinates",
                entry.name
            )));
        };

        let url = format!(
            "{}/projects/{}/repository/blobs/{}/raw",
            self.api_url, project_id, blob_id
        );

        let response = self.client.get(&url).send().await?;
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
