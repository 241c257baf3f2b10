//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BootstrapConfig (validated, immutable)
//!
//! [properties] table + process environment
//!     → source.rs (flatten, relaxed env binding, layering)
//!     → ConfigSource handed to the snapshot
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; a restart picks up changes
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod source;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{BootstrapConfig, HttpConfig, LogFormat, ObservabilityConfig, ReportConfig, ServiceConfig};
pub use source::{ConfigSource, EnvSource, LayeredSource, MapSource, PropertiesSource};
pub use validation::ValidationError;
