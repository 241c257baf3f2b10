//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the category table is well formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BootstrapConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

use crate::config::schema::BootstrapConfig;

/// A single semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("service.host must not be empty")]
    EmptyHost,

    #[error("service.base_path must start with '/': {0:?}")]
    InvalidBasePath(String),

    #[error("http.request_timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level is not a level: {0:?}")]
    InvalidLogLevel(String),

    #[error("observability.metrics_address is not a socket address: {0:?}")]
    InvalidMetricsAddress(String),

    #[error("report category name must not be empty")]
    EmptyCategoryName,

    #[error("report category {0:?} is declared more than once")]
    DuplicateCategory(String),

    #[error("report category {0:?} has no prefixes")]
    EmptyCategory(String),
}

pub fn validate_config(config: &BootstrapConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.service.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }
    if !config.service.base_path.starts_with('/') {
        errors.push(ValidationError::InvalidBasePath(config.service.base_path.clone()));
    }
    if config.http.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    let obs = &config.observability;
    if obs.log_level.parse::<LevelFilter>().is_err() {
        errors.push(ValidationError::InvalidLogLevel(obs.log_level.clone()));
    }
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(obs.metrics_address.clone()));
    }

    let mut seen = HashSet::new();
    for rule in config.report.categories.iter() {
        if rule.name.trim().is_empty() {
            errors.push(ValidationError::EmptyCategoryName);
            continue;
        }
        if !seen.insert(rule.name.as_str()) {
            errors.push(ValidationError::DuplicateCategory(rule.name.clone()));
        }
        if rule.prefixes.is_empty() {
            errors.push(ValidationError::EmptyCategory(rule.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::categories::{CategoryRule, CategoryTable};

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&BootstrapConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = BootstrapConfig::default();
        config.service.host = " ".into();
        config.service.base_path = "actuator".into();
        config.http.request_timeout_secs = 0;
        config.observability.log_level = "loud".into();
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyHost,
                ValidationError::InvalidBasePath("actuator".into()),
                ValidationError::ZeroTimeout,
                ValidationError::InvalidLogLevel("loud".into()),
                ValidationError::InvalidMetricsAddress("nowhere".into()),
            ]
        );
    }

    #[test]
    fn test_metrics_address_ignored_when_disabled() {
        let mut config = BootstrapConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_category_table_checks() {
        let mut config = BootstrapConfig::default();
        config.report.categories = CategoryTable::new(vec![
            CategoryRule::new("Base", ["server.port"]),
            CategoryRule::new("Base", ["spring.application.name"]),
            CategoryRule::new("Empty", Vec::<String>::new()),
            CategoryRule::new("", ["logging"]),
        ]);

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicateCategory("Base".into()),
                ValidationError::EmptyCategory("Empty".into()),
                ValidationError::EmptyCategoryName,
            ]
        );
    }
}
