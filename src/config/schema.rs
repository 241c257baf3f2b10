//! Configuration schema definitions.
//!
//! This module defines the bootstrap configuration file. Every section has
//! defaults so a service can start from an empty file; the free-form
//! `[properties]` table is the service's resolved key/value configuration.

use serde::{Deserialize, Serialize};

use crate::config::source::PropertiesSource;
use crate::report::categories::CategoryTable;

/// Root configuration for a service process.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Listener and probe-route settings.
    pub service: ServiceConfig,

    /// HTTP middleware settings.
    pub http: HttpConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,

    /// Startup report settings.
    pub report: ReportConfig,

    /// Service properties as a nested table (`server.port`,
    /// `spring.cloud.nacos.discovery.server-addr`, ...).
    pub properties: toml::Table,
}

impl BootstrapConfig {
    /// Key/value view of `[properties]`.
    pub fn properties_source(&self) -> PropertiesSource {
        PropertiesSource::from_table(&self.properties)
    }
}

/// Listener and probe-route configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Interface to bind (e.g., "0.0.0.0").
    pub host: String,

    /// Base path the probe routes are mounted under.
    pub base_path: String,

    /// Human-readable description served by the info route.
    pub description: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            base_path: "/actuator".to_string(),
            description: None,
        }
    }
}

/// HTTP middleware configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error, off).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Startup report configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Emit the report at startup.
    pub enabled: bool,

    /// Category membership table, in display order.
    pub categories: CategoryTable,

    /// Keys inspected in addition to the built-in list.
    pub extra_keys: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            categories: CategoryTable::default(),
            extra_keys: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::ConfigSource;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: BootstrapConfig = toml::from_str("").unwrap();
        assert_eq!(config.service.base_path, "/actuator");
        assert_eq!(config.http.request_timeout_secs, 10);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert!(config.report.enabled);
        assert_eq!(config.report.categories.len(), 7);
        assert!(config.properties.is_empty());
    }

    #[test]
    fn test_sections_and_properties() {
        let config: BootstrapConfig = toml::from_str(
            r#"
            [service]
            base_path = "/probes"
            description = "User service"

            [observability]
            log_format = "json"

            [report]
            extra_keys = ["spring.profiles.active"]

            [properties]
            server.port = 28081
            spring.application.name = "user-service"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.base_path, "/probes");
        assert_eq!(config.service.host, "0.0.0.0");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.report.extra_keys, vec!["spring.profiles.active"]);

        let source = config.properties_source();
        assert_eq!(source.get("server.port").as_deref(), Some("28081"));
        assert_eq!(source.get("spring.application.name").as_deref(), Some("user-service"));
    }
}
