//! E-commerce service bootstrap.
//!
//! Starts one of the backend services with its startup report and probe
//! routes.
//!
//! # Architecture Overview
//!
//! ```text
//!     config file ──▶ BootstrapConfig ──▶ [properties] ─┐
//!                                                       ├─▶ LayeredSource
//!     process env ──▶ EnvSource (SERVER_PORT, ...) ─────┘        │
//!                                                                ▼
//!                                                         ConfigSnapshot
//!                                                                │
//!                         ┌──────────────────────────────────────┤
//!                         ▼                                      ▼
//!                  StartupReporter                        HealthEndpoint
//!                  (categories, env,                      (health, liveness,
//!                   truncation) ──▶ sink                   readiness, info)
//!                                                                │
//!                                                                ▼
//!     Probe request ─────────────────────────────────────▶  HttpServer
//!                                                         <base>/health ...
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use ecommerce_bootstrap::config::{
    load_config, BootstrapConfig, EnvSource, LayeredSource, LogFormat,
};
use ecommerce_bootstrap::lifecycle::{Bootstrap, Shutdown};
use ecommerce_bootstrap::observability::{logging, metrics};
use ecommerce_bootstrap::report::TracingSink;
use ecommerce_bootstrap::services::ServiceKind;

#[derive(Parser)]
#[command(name = "ecommerce-bootstrap")]
#[command(about = "Start an e-commerce backend service", long_about = None)]
struct Args {
    /// Service to start.
    #[arg(short, long, value_enum)]
    service: ServiceKind,

    /// Path to the service's TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port, overriding `server.port`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => BootstrapConfig::default(),
    };

    logging::init_logging(&config.observability)?;

    let profile = args.service.profile();
    tracing::info!(
        service = profile.name,
        config = ?args.config,
        "{} starting",
        profile.display_name
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let source = LayeredSource::new()
        .with_layer(EnvSource::from_env())
        .with_layer(config.properties_source());

    // JSON logs are machine-read; keep the report inside that stream.
    let json_logs = config.observability.log_format == LogFormat::Json;

    let mut builder = Bootstrap::builder(profile).config(config).source(source);
    if json_logs {
        builder = builder.sink(Arc::new(TracingSink));
    }
    if let Some(port) = args.port {
        builder = builder.port(port);
    }
    let bootstrap = builder.build()?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    bootstrap.run(shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
