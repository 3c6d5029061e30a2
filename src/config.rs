use serde::Deserialize;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for outbound HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Interval between subscriber snapshot refreshes in seconds (1 hour)
pub const DEFAULT_SNAPSHOT_REFRESH_SECS: u64 = 60 * 60;

/// Interval between scheduler evaluation ticks in seconds (1 minute)
pub const DEFAULT_EVALUATE_TICK_SECS: u64 = 60;

/// Maximum number of concurrent registry lookups / subscriber dispatches
pub const DEFAULT_LOOKUP_WORKERS: usize = 8;

// =============================================================================
// Default API endpoints
// =============================================================================

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GITLAB_API_URL: &str = "https://gitlab.com/api/v4";
pub const DEFAULT_NPM_REGISTRY_URL: &str = "https://registry.npmjs.org";
pub const DEFAULT_PACKAGIST_URL: &str = "https://packagist.org";

/// Process configuration, constructed once and passed by reference into
/// every component constructor.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub providers: ProvidersConfig,
    pub registries: RegistriesConfig,
    pub http: HttpConfig,
    pub scheduler: SchedulerConfig,
}

/// Hosting provider API endpoints
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProvidersConfig {
    pub github_api_url: String,
    pub gitlab_api_url: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            gitlab_api_url: DEFAULT_GITLAB_API_URL.to_string(),
        }
    }
}

/// Package registry API endpoints
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistriesConfig {
    pub npm_url: String,
    pub packagist_url: String,
}

impl Default for RegistriesConfig {
    fn default() -> Self {
        Self {
            npm_url: DEFAULT_NPM_REGISTRY_URL.to_string(),
            packagist_url: DEFAULT_PACKAGIST_URL.to_string(),
        }
    }
}

/// HTTP client behavior
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Concurrency limit for fan-out operations
    pub lookup_workers: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            lookup_workers: DEFAULT_LOOKUP_WORKERS,
        }
    }
}

/// Notification scheduler cadences
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Subscriber snapshot refresh interval in seconds
    pub snapshot_refresh_secs: u64,
    /// Evaluation tick interval in seconds
    pub evaluate_tick_secs: u64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            snapshot_refresh_secs: DEFAULT_SNAPSHOT_REFRESH_SECS,
            evaluate_tick_secs: DEFAULT_EVALUATE_TICK_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "http": {
                "timeoutSecs": 5
            }
        }))
        .unwrap();

        assert_eq!(result.http.timeout_secs, 5);
        assert_eq!(result.http.lookup_workers, DEFAULT_LOOKUP_WORKERS);
        assert_eq!(result.providers, ProvidersConfig::default());
        assert_eq!(result.registries, RegistriesConfig::default());
        assert_eq!(result.scheduler, SchedulerConfig::default());
    }

    #[test]
    fn config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "providers": {
                "githubApiUrl": "http://localhost:3000",
                "gitlabApiUrl": "http://localhost:3001"
            },
            "registries": {
                "npmUrl": "http://localhost:3002",
                "packagistUrl": "http://localhost:3003"
            },
            "http": {
                "timeoutSecs": 3,
                "lookupWorkers": 2
            },
            "scheduler": {
                "snapshotRefreshSecs": 120,
                "evaluateTickSecs": 10
            }
        }))
        .unwrap();

        assert_eq!(result.providers.github_api_url, "http://localhost:3000");
        assert_eq!(result.providers.gitlab_api_url, "http://localhost:3001");
        assert_eq!(result.registries.npm_url, "http://localhost:3002");
        assert_eq!(result.registries.packagist_url, "http://localhost:3003");
        assert_eq!(result.http.timeout_secs, 3);
        assert_eq!(result.http.lookup_workers, 2);
        assert_eq!(result.scheduler.snapshot_refresh_secs, 120);
        assert_eq!(result.scheduler.evaluate_tick_secs, 10);
    }
}
