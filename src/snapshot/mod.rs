//! Configuration snapshot subsystem.
//!
//! # Data Flow
//! ```text
//! ConfigSource (file properties, env overrides)
//!     → keys.rs (explicit list of keys to query)
//!     → entry.rs (ConfigSnapshot: key → Option<value>)
//!     → filter_by_prefix → ConfigCategory (sorted by key)
//! ```
//!
//! # Design Decisions
//! - Fixed key list, never a wildcard scan of the source
//! - Unset keys are retained and shown as `null`
//! - Filtering is a pure function of the snapshot and the prefixes

pub mod entry;
pub mod keys;

pub use entry::{ConfigCategory, ConfigEntry, ConfigSnapshot, NULL_VALUE};
