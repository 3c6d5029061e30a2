//! Notification layer
//! - notifier.rs: Notifier and Auth collaborator contracts
//! - scheduler.rs: two-cadence notification scheduler

pub mod notifier;
pub mod scheduler;

pub use notifier::{Auth, AuthError, Notifier, NotifyError, OutdatedReport, SubscriberToken};
pub use scheduler::{due_now, Scheduler};
