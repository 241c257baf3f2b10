//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the probe handlers under the base path
//! - Wire up middleware (tracing, timeout, cache headers)
//! - Serve on a bound listener until shutdown is signalled

use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::HttpConfig;
use crate::health::HealthEndpoint;
use crate::http::handlers;

/// HTTP server exposing the probe routes.
pub struct HttpServer {
    router: Router,
    base_path: String,
}

impl HttpServer {
    /// Create a new HTTP server answering for `endpoint`.
    pub fn new(endpoint: HealthEndpoint, base_path: &str, config: &HttpConfig) -> Self {
        let base_path = normalize_base_path(base_path);
        let router = Self::build_router(endpoint, &base_path, config);
        Self { router, base_path }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(endpoint: HealthEndpoint, base_path: &str, config: &HttpConfig) -> Router {
        let probes = Router::new()
            .route("/health", get(handlers::health))
            .route("/liveness", get(handlers::liveness))
            .route("/readiness", get(handlers::readiness))
            .route("/info", get(handlers::info))
            .with_state(endpoint);

        let router = if base_path.is_empty() {
            probes
        } else {
            Router::new().nest(base_path, probes)
        };

        router
            .layer(SetResponseHeaderLayer::overriding(
                header::CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            ))
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Router with every layer applied, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            base_path = %self.base_path,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// `/actuator/` → `/actuator`; `actuator` → `/actuator`; `/` → `` (routes
/// mounted at the root).
fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
