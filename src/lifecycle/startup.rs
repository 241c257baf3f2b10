//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve service identity (name, port) from configuration
//! - Take the configuration snapshot and emit the startup report
//! - Build the health endpoint and HTTP server
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - One generic bootstrap, parameterized per service by its profile
//! - Fail fast: any startup error is fatal
//! - The report is written before the listener starts accepting

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::config::validation::validate_config;
use crate::config::{BootstrapConfig, ConfigError, ConfigSource};
use crate::discovery;
use crate::health::{HealthEndpoint, ReadinessGate, ReadinessGates};
use crate::http::HttpServer;
use crate::report::{CategoryTable, ReportSink, StartupReport, StartupReporter, WriterSink};
use crate::services::ServiceProfile;
use crate::snapshot::keys::{APPLICATION_NAME, SERVER_PORT};
use crate::snapshot::ConfigSnapshot;

/// Errors that stop a service from starting.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("server.port is not a valid port: {value:?}")]
    InvalidPort { value: String },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// A configured service instance, ready to report and serve.
pub struct Bootstrap {
    profile: ServiceProfile,
    service_name: String,
    port: u16,
    snapshot: ConfigSnapshot,
    reporter: StartupReporter,
    report_enabled: bool,
    endpoint: HealthEndpoint,
    config: BootstrapConfig,
}

impl Bootstrap {
    pub fn builder(profile: ServiceProfile) -> BootstrapBuilder {
        BootstrapBuilder {
            profile,
            config: BootstrapConfig::default(),
            source: None,
            port: None,
            categories: None,
            sink: None,
            gates: ReadinessGates::new(),
            extra_keys: Vec::new(),
        }
    }

    pub fn profile(&self) -> &ServiceProfile {
        &self.profile
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn snapshot(&self) -> &ConfigSnapshot {
        &self.snapshot
    }

    pub fn endpoint(&self) -> &HealthEndpoint {
        &self.endpoint
    }

    /// Render the startup report and hand it to the sink.
    pub fn report(&self) -> StartupReport {
        self.reporter.report(&self.service_name, &self.snapshot)
    }

    pub fn http_server(&self) -> HttpServer {
        HttpServer::new(
            self.endpoint.clone(),
            &self.config.service.base_path,
            &self.config.http,
        )
    }

    /// Bind `service.host:port`.
    pub async fn bind(&self) -> Result<TcpListener, BootstrapError> {
        let address = format!("{}:{}", self.config.service.host, self.port);
        TcpListener::bind(&address)
            .await
            .map_err(|source| BootstrapError::Bind { address, source })
    }

    /// Serve the probe routes on `listener` until `shutdown` fires.
    pub async fn serve(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), BootstrapError> {
        self.http_server()
            .run(listener, shutdown)
            .await
            .map_err(BootstrapError::Serve)
    }

    /// Report, bind and serve.
    pub async fn run(self, shutdown: broadcast::Receiver<()>) -> Result<(), BootstrapError> {
        if self.report_enabled {
            self.report();
        }
        let listener = self.bind().await?;
        let addr = listener.local_addr().map_err(BootstrapError::Serve)?;

        tracing::info!(
            service = %self.service_name,
            registry_name = %discovery::registry_name(&self.service_name),
            address = %addr,
            "{} started",
            self.profile.display_name
        );

        self.serve(listener, shutdown).await
    }
}

/// Builder for [`Bootstrap`].
pub struct BootstrapBuilder {
    profile: ServiceProfile,
    config: BootstrapConfig,
    source: Option<Box<dyn ConfigSource>>,
    port: Option<u16>,
    categories: Option<CategoryTable>,
    sink: Option<Arc<dyn ReportSink>>,
    gates: ReadinessGates,
    extra_keys: Vec<String>,
}

impl BootstrapBuilder {
    /// Use a loaded configuration file; its `[properties]` become the
    /// default source.
    pub fn config(mut self, config: BootstrapConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the key/value source (e.g. env layered over file).
    pub fn source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Listen port, overriding `server.port` and the profile default.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Category table, overriding the one from the config file.
    pub fn categories(mut self, table: CategoryTable) -> Self {
        self.categories = Some(table);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn readiness_gate(mut self, gate: Arc<dyn ReadinessGate>) -> Self {
        self.gates.push(gate);
        self
    }

    pub fn extra_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.extra_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Validate the configuration and resolve the service identity.
    pub fn build(self) -> Result<Bootstrap, BootstrapError> {
        validate_config(&self.config).map_err(ConfigError::Validation)?;

        let source: Box<dyn ConfigSource> = match self.source {
            Some(source) => source,
            None => Box::new(self.config.properties_source()),
        };

        let mut keys = vec![self.profile.mapper_logging_key()];
        keys.extend(self.config.report.extra_keys.iter().cloned());
        keys.extend(self.extra_keys);
        let snapshot = ConfigSnapshot::load_with(&*source, keys.as_slice());

        let service_name = snapshot
            .value(APPLICATION_NAME)
            .unwrap_or(self.profile.name)
            .to_string();
        let port = match (self.port, snapshot.value(SERVER_PORT)) {
            (Some(port), _) => port,
            (None, Some(raw)) => parse_port(raw)?,
            (None, None) => self.profile.port,
        };

        let table = self
            .categories
            .unwrap_or_else(|| self.config.report.categories.clone());
        let sink: Arc<dyn ReportSink> = match self.sink {
            Some(sink) => sink,
            None => Arc::new(WriterSink::stdout()),
        };
        let reporter = StartupReporter::new(table, sink);

        let description = self
            .config
            .service
            .description
            .clone()
            .unwrap_or_else(|| self.profile.description.to_string());
        let endpoint = HealthEndpoint::builder(service_name.clone(), port)
            .description(description)
            .gates(self.gates)
            .build();

        tracing::debug!(
            service = %service_name,
            port,
            keys = snapshot.len(),
            "Bootstrap configured"
        );

        Ok(Bootstrap {
            profile: self.profile,
            service_name,
            port,
            snapshot,
            reporter,
            report_enabled: self.config.report.enabled,
            endpoint,
            config: self.config,
        })
    }
}

fn parse_port(raw: &str) -> Result<u16, BootstrapError> {
    raw.trim()
        .parse()
        .map_err(|_| BootstrapError::InvalidPort {
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_config, MapSource, ValidationError};
    use crate::report::{Environment, MemorySink};
    use crate::services::{GATEWAY, TRADE, USER};
    use crate::snapshot::keys::DISCOVERY_SERVER_ADDR;

    #[test]
    fn test_identity_from_source() {
        let source = MapSource::new()
            .with(SERVER_PORT, "9100")
            .with(APPLICATION_NAME, "user-service-canary");
        let bootstrap = Bootstrap::builder(USER).source(source).build().unwrap();

        assert_eq!(bootstrap.service_name(), "user-service-canary");
        assert_eq!(bootstrap.port(), 9100);
        assert_eq!(bootstrap.endpoint().service(), "user-service-canary");
    }

    #[test]
    fn test_identity_falls_back_to_profile() {
        let bootstrap = Bootstrap::builder(GATEWAY).source(MapSource::new()).build().unwrap();
        assert_eq!(bootstrap.service_name(), "api-gateway");
        assert_eq!(bootstrap.port(), 28080);
        assert_eq!(bootstrap.endpoint().info().description, GATEWAY.description);
    }

    #[test]
    fn test_explicit_port_wins() {
        let source = MapSource::new().with(SERVER_PORT, "9100");
        let bootstrap = Bootstrap::builder(TRADE).source(source).port(0).build().unwrap();
        assert_eq!(bootstrap.port(), 0);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let source = MapSource::new().with(SERVER_PORT, "eighty");
        let err = Bootstrap::builder(USER).source(source).build().err().unwrap();
        assert!(matches!(err, BootstrapError::InvalidPort { ref value } if value == "eighty"));
    }

    #[test]
    fn test_profile_mapper_key_is_queried() {
        let source = MapSource::new().with(USER.mapper_logging_key(), "debug");
        let bootstrap = Bootstrap::builder(USER).source(source).build().unwrap();
        assert_eq!(
            bootstrap.snapshot().value("logging.level.com.cao.ecommerce.user.mapper"),
            Some("debug")
        );
    }

    #[test]
    fn test_config_file_drives_bootstrap() {
        let config = parse_config(
            r#"
            [service]
            description = "Users"

            [report]
            extra_keys = ["spring.profiles.active"]

            [[report.categories]]
            name = "Profiles"
            prefixes = ["spring.profiles"]

            [properties.server]
            port = 28081
            [properties.spring.application]
            name = "user-service"
            [properties.spring.profiles]
            active = "docker"
            [properties.spring.cloud.nacos.discovery]
            server-addr = "nacos:8848"
            "#,
        )
        .unwrap();

        let sink = Arc::new(MemorySink::new());
        let bootstrap = Bootstrap::builder(USER)
            .config(config)
            .sink(sink.clone())
            .build()
            .unwrap();

        let report = bootstrap.report();
        assert_eq!(report.environment(), Environment::Container);
        assert_eq!(report.categories().len(), 1);
        let profiles = report.category("Profiles").unwrap();
        assert_eq!(profiles.get("spring.profiles.active").unwrap().display_value(), "docker");
        assert_eq!(bootstrap.endpoint().info().description, "Users");
        assert_eq!(sink.reports().len(), 1);
    }

    #[test]
    fn test_categories_override() {
        let source = MapSource::new().with(DISCOVERY_SERVER_ADDR, "localhost:18848");
        let bootstrap = Bootstrap::builder(USER)
            .source(source)
            .categories(CategoryTable::new(vec![crate::report::CategoryRule::new(
                "Discovery",
                ["spring.cloud.nacos"],
            )]))
            .sink(Arc::new(MemorySink::new()))
            .build()
            .unwrap();

        let report = bootstrap.report();
        assert_eq!(report.categories().len(), 1);
        assert_eq!(report.environment(), Environment::Local);
    }

    #[test]
    fn test_invalid_config_is_rejected_at_build() {
        let mut config = BootstrapConfig::default();
        config.service.base_path = "actuator".into();

        let err = Bootstrap::builder(USER)
            .config(config)
            .source(MapSource::new())
            .build()
            .err()
            .unwrap();
        match err {
            BootstrapError::Config(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::InvalidBasePath("actuator".into())]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = taken.local_addr().unwrap().port();

        let mut config = BootstrapConfig::default();
        config.service.host = "127.0.0.1".into();
        let bootstrap = Bootstrap::builder(USER)
            .config(config)
            .source(MapSource::new())
            .port(port)
            .build()
            .unwrap();

        let err = bootstrap.bind().await.unwrap_err();
        assert!(matches!(err, BootstrapError::Bind { .. }));
    }
}
