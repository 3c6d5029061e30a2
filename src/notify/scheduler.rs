//! Two-cadence notification scheduler
//!
//! A slow task refreshes a snapshot of all evaluable subscriptions
//! (hourly by default); a fast task evaluates every snapshot entry against
//! the wall clock (every minute by default) and dispatches reports for
//! subscribers whose repository has outdated packages.
//!
//! The snapshot lives in a `tokio::sync::watch` channel. Only the slow
//! task writes it, and it always publishes a fully-formed replacement, so
//! the fast task can never observe a partially-updated snapshot.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Datelike, Timelike, Utc};
use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use tokio::sync::watch;
use tokio::time::interval;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::model::{Frequency, NotifyPreference, PackageStatus, Subscription};
use crate::notify::notifier::{Auth, Notifier, OutdatedReport};
use crate::store::{RepositoryStore, StoreError, SubscriptionStore};

/// Canonical due-time rule, evaluated once per minute tick in UTC.
///
/// Hourly matches on minute; Daily adds the hour; Weekly adds the weekday.
pub fn due_now(preference: &NotifyPreference, now: DateTime<Utc>) -> bool {
    if now.minute() != preference.minute {
        return false;
    }
    match preference.frequency {
        Frequency::Hourly => true,
        Frequency::Daily => now.hour() == preference.hour,
        Frequency::Weekly => {
            now.hour() == preference.hour && now.weekday() == preference.weekday
        }
    }
}

/// Recurring notification process
pub struct Scheduler {
    subscriptions: Arc<dyn SubscriptionStore>,
    repositories: Arc<dyn RepositoryStore>,
    notifier: Arc<dyn Notifier>,
    auth: Arc<dyn Auth>,
    refresh_every: Duration,
    evaluate_every: Duration,
    dispatch_workers: usize,
    snapshot_tx: watch::Sender<Arc<Vec<Subscription>>>,
}

impl Scheduler {
    pub fn new(
        config: &Config,
        subscriptions: Arc<dyn SubscriptionStore>,
        repositories: Arc<dyn RepositoryStore>,
        notifier: Arc<dyn Notifier>,
        auth: Arc<dyn Auth>,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            subscriptions,
            repositories,
            notifier,
            auth,
            refresh_every: Duration::from_secs(config.scheduler.snapshot_refresh_secs),
            evaluate_every: Duration::from_secs(config.scheduler.evaluate_tick_secs),
            dispatch_workers: config.http.lookup_workers.max(1),
            snapshot_tx,
        }
    }

    /// Start both periodic tasks. Tick failures are logged and never end
    /// the loops.
    pub fn spawn(self: Arc<Self>) {
        let refresher = Arc::clone(&self);
        tokio::spawn(async move {
            let mut tick = interval(refresher.refresh_every);
            loop {
                tick.tick().await;
                if let Err(e) = refresher.refresh_snapshot().await {
                    warn!("Snapshot refresh failed: {}", e);
                }
            }
        });

        tokio::spawn(async move {
            let mut tick = interval(self.evaluate_every);
            loop {
                tick.tick().await;
                self.evaluate_tick(Utc::now()).await;
            }
        });
    }

    /// Rebuild the subscription snapshot from the store and publish it
    /// wholesale. This is the only writer of the snapshot channel.
    pub async fn refresh_snapshot(&self) -> Result<usize, StoreError> {
        let all = self.subscriptions.get_all().await?;
        let evaluable: Vec<Subscription> =
            all.into_iter().filter(Subscription::is_evaluable).collect();
        let count = evaluable.len();

        debug!("Publishing subscriber snapshot with {} entries", count);
        // send_replace never fails even with no active receivers.
        self.snapshot_tx.send_replace(Arc::new(evaluable));
        Ok(count)
    }

    /// Evaluate every cached subscription against `now` and dispatch
    /// reports for those that are due and have outdated packages.
    ///
    /// Returns the number of reports handed to the notifier. One
    /// subscriber's failure never blocks the others.
    pub async fn evaluate_tick(&self, now: DateTime<Utc>) -> usize {
        let snapshot = self.snapshot_tx.borrow().clone();

        let due: Vec<&Subscription> = snapshot
            .iter()
            .filter(|sub| {
                sub.notify_preference
                    .as_ref()
                    .is_some_and(|pref| due_now(pref, now))
            })
            .collect();

        if due.is_empty() {
            return 0;
        }
        debug!("{} subscriptions due at {}", due.len(), now);

        // Build the futures eagerly so the stream holds no borrowing
        // closure; keeps the spawned task `Send` (rust-lang/rust#102211).
        let dispatches: Vec<BoxFuture<'_, bool>> =
            due.into_iter().map(|sub| self.dispatch(sub).boxed()).collect();

        let dispatched = stream::iter(dispatches)
            .buffer_unordered(self.dispatch_workers)
            .collect::<Vec<_>>()
            .await;

        dispatched.into_iter().filter(|sent| *sent).count()
    }

    /// Dispatch path for one due subscriber. Failures are logged and
    /// swallowed; returns true only when a report was handed off.
    async fn dispatch(&self, subscription: &Subscription) -> bool {
        let repository = match self.repositories.find_by_id(&subscription.repository_id).await {
            Ok(repository) => repository,
            Err(e) => {
                warn!(
                    "Repository lookup failed for subscription {}: {}",
                    subscription.id, e
                );
                return false;
            }
        };

        let outdated: Vec<PackageStatus> = repository
            .package_status_list
            .iter()
            .filter(|pkg| pkg.is_outdated)
            .cloned()
            .collect();

        // Nothing outdated: silently skip this tick.
        if outdated.is_empty() {
            return false;
        }

        let token = match self.auth.issue_subscriber_token(subscription).await {
            Ok(token) => token,
            Err(e) => {
                warn!(
                    "Token issuance failed for subscription {}: {}",
                    subscription.id, e
                );
                return false;
            }
        };

        let report = OutdatedReport {
            subscription: subscription.clone(),
            repository,
            outdated_packages: outdated,
            token,
        };

        match self.notifier.send_report(report).await {
            Ok(()) => {
                info!("Dispatched report to {}", subscription.email);
                true
            }
            Err(e) => {
                warn!("Dispatch failed for {}: {}", subscription.email, e);
                false
            }
        }
    }
}
