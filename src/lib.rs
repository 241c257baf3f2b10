//! Shared bootstrap diagnostics for the e-commerce backend services.
//!
//! Every service (gateway, user, product, trade) starts through the same
//! [`Bootstrap`]: it snapshots the service's configuration, prints a
//! categorized startup report, and serves the health, liveness and
//! readiness probes.

pub mod config;
pub mod discovery;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod report;
pub mod services;
pub mod snapshot;

pub use config::schema::BootstrapConfig;
pub use health::HealthEndpoint;
pub use http::HttpServer;
pub use lifecycle::{Bootstrap, BootstrapError, Shutdown};
pub use report::{StartupReport, StartupReporter};
pub use snapshot::ConfigSnapshot;
