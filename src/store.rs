//! Persistence collaborator contracts
//!
//! The core depends only on these traits; the storage technology behind
//! them is an external concern and never appears in this crate.

#[cfg(test)]
use mockall::automock;

use crate::model::{NotifyPreference, PackageStatus, Repository, Subscription};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// CRUD contract for tracked repositories
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RepositoryStore: Send + Sync {
    async fn create(&self, repository: Repository) -> Result<Repository, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Repository, StoreError>;

    async fn find_by_url_and_owner(
        &self,
        url: &str,
        owner_user_id: &str,
    ) -> Result<Repository, StoreError>;

    async fn find_all_by_owner(&self, owner_user_id: &str) -> Result<Vec<Repository>, StoreError>;

    /// Wholesale replacement of the repository's package-status list;
    /// no merging, no history.
    async fn replace_package_list(
        &self,
        id: &str,
        packages: Vec<PackageStatus>,
    ) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    async fn delete_all_by_owner(&self, owner_user_id: &str) -> Result<(), StoreError>;
}

/// CRUD contract for subscriptions
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn create(&self, subscription: Subscription) -> Result<Subscription, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Subscription, StoreError>;

    async fn find_by_email_and_repo(
        &self,
        email: &str,
        repository_id: &str,
    ) -> Result<Subscription, StoreError>;

    async fn find_all_by_repo(&self, repository_id: &str)
        -> Result<Vec<Subscription>, StoreError>;

    /// Every subscription in the store, confirmed or not; the scheduler
    /// snapshot is built from this.
    async fn get_all(&self) -> Result<Vec<Subscription>, StoreError>;

    async fn update(
        &self,
        id: &str,
        preference: NotifyPreference,
    ) -> Result<Subscription, StoreError>;

    async fn set_confirmed(&self, id: &str, confirmed: bool) -> Result<(), StoreError>;

    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    async fn delete_all_by_repo(&self, repository_id: &str) -> Result<(), StoreError>;
}
