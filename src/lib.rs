//! depwatch — dependency freshness tracking and subscriber notification
//!
//! Two cores live here:
//!
//! - The **freshness engine** ([`freshness`]): resolves a hosted
//!   repository URL into a list of declared packages with current vs.
//!   latest registry versions, via pluggable providers ([`provider`]),
//!   manifest parsers ([`manifest`]), and registry clients ([`registry`]).
//! - The **notification scheduler** ([`notify`]): a two-cadence recurring
//!   process that matches subscriber preferences against wall-clock time
//!   and hands outdated-package reports to external collaborators.
//!
//! Persistence, email transport, and token signing are external
//! collaborators behind the traits in [`store`] and [`notify::notifier`].

pub mod config;
pub mod freshness;
pub mod manifest;
pub mod model;
pub mod notify;
pub mod provider;
pub mod registry;
pub mod semver;
pub mod store;
