//! Domain entities shared across the freshness engine and the scheduler

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Resolution result for one declared dependency
///
/// A full list of these replaces the repository's stored list on every
/// resolution run; there is no incremental diffing and no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStatus {
    pub name: String,
    pub current_version: String,
    /// Latest stable version from the registry; `None` when the lookup
    /// failed or the registry had nothing to offer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_version: Option<String>,
    /// Manifest file the dependency was declared in
    pub source_file: String,
    pub is_outdated: bool,
}

/// A tracked hosted repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub id: String,
    pub owner_user_id: String,
    pub name: String,
    pub owner: String,
    pub canonical_url: String,
    pub provider_host: String,
    pub package_status_list: Vec<PackageStatus>,
    pub created_at: DateTime<Utc>,
}

/// Notification cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Hourly,
    Daily,
    Weekly,
}

/// When a subscriber wants to be notified
///
/// `weekday` is only meaningful for [`Frequency::Weekly`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyPreference {
    pub frequency: Frequency,
    pub hour: u32,
    pub minute: u32,
    pub weekday: Weekday,
}

/// A subscriber watching one repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub repository_id: String,
    pub email: String,
    pub is_confirmed: bool,
    /// Absent until the subscriber sets one; only preference-bearing
    /// subscriptions are eligible for evaluation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_preference: Option<NotifyPreference>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Eligible for scheduler evaluation: confirmed and carrying a preference
    pub fn is_evaluable(&self) -> bool {
        self.is_confirmed && self.notify_preference.is_some()
    }
}
