//! Provider layer
//!
//! Resolves a hosting provider's read-only APIs: repository root tree
//! listing and raw manifest content retrieval.
//! - github.rs: GitHub-style contents API
//! - gitlab.rs: GitLab-style API (project id indirection)

pub mod github;
pub mod gitlab;

pub use github::GithubProvider;
pub use gitlab::GitlabProvider;

#[cfg(test)]
use mockall::automock;

use reqwest::Url;

use crate::config::Config;
use crate::manifest::ManifestKind;

/// How to fetch a tree entry's raw content
///
/// GitLab needs the numeric project id threaded through from the tree
/// listing so blob fetches do not require a second project lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRef {
    /// Direct download URL (GitHub `download_url`)
    Url(String),
    /// GitLab raw blob endpoint coordinates
    GitlabBlob { project_id: u64, blob_id: String },
}

/// One entry of a repository's root directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub fetch: FetchRef,
}

/// Trait over hosting providers (GitHub-like, GitLab-like)
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Derive `(owner, name)` from the repository URL's path segments
    fn resolve_owner_and_name(&self, url: &Url) -> Result<(String, String), ProviderError> {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [owner, name, ..] => Ok((owner.to_string(), name.to_string())),
            _ => Err(ProviderError::InvalidUrl(url.to_string())),
        }
    }

    /// List the repository's root directory contents
    async fn list_tree(&self, owner: &str, name: &str) -> Result<Vec<TreeEntry>, ProviderError>;

    /// Retrieve one tree entry's raw content and parse it as JSON
    async fn fetch_manifest(&self, entry: &TreeEntry) -> Result<serde_json::Value, ProviderError>;
}

/// Error type for provider operations
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unsupported provider host: {0}")]
    UnsupportedHost(String),

    #[error("Repository URL has no owner/name path: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Select a provider by the repository URL's host
pub fn provider_for(url: &Url, config: &Config) -> Result<Box<dyn Provider>, ProviderError> {
    match url.host_str() {
        Some("github.com") => Ok(Box::new(GithubProvider::new(config))),
        Some("gitlab.com") => Ok(Box::new(GitlabProvider::new(config))),
        other => Err(ProviderError::UnsupportedHost(
            other.unwrap_or("<no host>").to_string(),
        )),
    }
}

/// Filter a tree listing down to known manifest files
pub fn locate_manifests(tree: &[TreeEntry]) -> Vec<TreeEntry> {
    tree.iter()
        .filter(|entry| ManifestKind::from_file_name(&entry.name).is_some())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> TreeEntry {
        TreeEntry {
            name: name.to_string(),
            fetch: FetchRef::Url(format!("https://example.com/{name}")),
        }
    }

    #[test]
    fn provider_for_selects_by_host() {
        let config = Config::default();
        let github = Url::parse("https://github.com/rust-lang/cargo").unwrap();
        let gitlab = Url::parse("https://gitlab.com/inkscape/inkscape").unwrap();
        assert!(provider_for(&github, &config).is_ok());
        assert!(provider_for(&gitlab, &config).is_ok());
    }

    #[test]
    fn provider_for_rejects_unknown_host() {
        let config = Config::default();
        let url = Url::parse("https://bitbucket.org/owner/repo").unwrap();
        assert!(matches!(
            provider_for(&url, &config),
            Err(ProviderError::UnsupportedHost(_))
        ));
    }

    #[test]
    fn owner_and_name_come_from_path_segments() {
        let provider = GithubProvider::new(&Config::default());
        let url = Url::parse("https://github.com/rust-lang/cargo/tree/master/src").unwrap();
        let (owner, name) = provider.resolve_owner_and_name(&url).unwrap();
        assert_eq!(owner, "rust-lang");
        assert_eq!(name, "cargo");
    }

    #[test]
    fn owner_and_name_require_two_path_segments() {
        let provider = GithubProvider::new(&Config::default());
        let url = Url::parse("https://github.com/rust-lang").unwrap();
        assert!(matches!(
            provider.resolve_owner_and_name(&url),
            Err(ProviderError::InvalidUrl(_))
        ));
    }

    #[test]
    fn locate_manifests_keeps_only_known_manifest_files() {
        let tree = vec![
            entry("README.md"),
            entry("package.json"),
            entry("composer.json"),
            entry("Cargo.toml"),
        ];

        let manifests = locate_manifests(&tree);
        let names: Vec<&str> = manifests.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["package.json", "composer.json"]);
    }

    #[test]
    fn locate_manifests_returns_empty_for_manifest_free_tree() {
        let tree = vec![entry("README.md"), entry("src")];
        assert!(locate_manifests(&tree).is_empty());
    }
}
