//! Notifier and Auth collaborator contracts
//!
//! Template rendering, email transport, and token signing live outside
//! this crate; the scheduler only hands off fully-assembled reports.

#[cfg(test)]
use mockall::automock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{PackageStatus, Repository, Subscription};

/// Time-limited capability token for subscriber-facing links
/// (preference update, unsubscribe)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberToken {
    pub token: String,
    pub subscription_id: String,
    pub repository_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Everything the notifier needs to render and send one notification
#[derive(Debug, Clone, PartialEq)]
pub struct OutdatedReport {
    pub subscription: Subscription,
    pub repository: Repository,
    pub outdated_packages: Vec<PackageStatus>,
    pub token: SubscriberToken,
}

/// Error type for notification dispatch
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Failed to send notification: {0}")]
    Send(String),
}

/// Error type for token issuance
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Failed to issue token: {0}")]
    Issue(String),
}

/// Outbound notification collaborator (template render + email send)
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send_report(&self, report: OutdatedReport) -> Result<(), NotifyError>;
}

/// Capability-token issuer collaborator
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Auth: Send + Sync {
    async fn issue_subscriber_token(
        &self,
        subscription: &Subscription,
    ) -> Result<SubscriberToken, AuthError>;
}
