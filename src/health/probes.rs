//! Probe payloads and the per-instance health endpoint.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::health::readiness::{ReadinessGate, ReadinessGates};

/// Overall health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthState {
    #[serde(rename = "UP")]
    Up,
    #[serde(rename = "DOWN")]
    Down,
}

impl HealthState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

/// Liveness outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Liveness {
    Alive,
    NotAlive,
}

impl Liveness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alive => "alive",
            Self::NotAlive => "not_alive",
        }
    }
}

/// Readiness outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    NotReady,
}

impl Readiness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::NotReady => "not_ready",
        }
    }
}

fn port_as_string<S: Serializer>(port: &u16, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(port)
}

/// `GET <base>/health` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: HealthState,
    pub service: String,
    #[serde(serialize_with = "port_as_string")]
    pub port: u16,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// `GET <base>/liveness` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LivenessStatus {
    pub status: Liveness,
    pub service: String,
}

/// `GET <base>/readiness` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessStatus {
    pub status: Readiness,
    pub service: String,
    /// Gates that are not ready; omitted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failing: Vec<String>,
}

impl ReadinessStatus {
    pub fn is_ready(&self) -> bool {
        self.status == Readiness::Ready
    }
}

/// `GET <base>/info` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub service: String,
    #[serde(serialize_with = "port_as_string")]
    pub port: u16,
    pub description: String,
    pub version: &'static str,
    pub instance: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
struct EndpointInner {
    service: String,
    port: u16,
    description: String,
    instance: Uuid,
    gates: ReadinessGates,
}

/// Answers the probes for one service instance.
///
/// Holds only values fixed at startup. Cloning is cheap and every clone
/// answers identically, so it can be shared across request handlers.
#[derive(Debug, Clone)]
pub struct HealthEndpoint {
    inner: Arc<EndpointInner>,
}

impl HealthEndpoint {
    pub fn new(service: impl Into<String>, port: u16) -> Self {
        Self::builder(service, port).build()
    }

    pub fn builder(service: impl Into<String>, port: u16) -> HealthEndpointBuilder {
        HealthEndpointBuilder {
            service: service.into(),
            port,
            description: None,
            gates: ReadinessGates::new(),
        }
    }

    pub fn service(&self) -> &str {
        &self.inner.service
    }

    pub fn port(&self) -> u16 {
        self.inner.port
    }

    pub fn instance(&self) -> Uuid {
        self.inner.instance
    }

    /// Always `UP` while the process can answer at all.
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: HealthState::Up,
            service: self.inner.service.clone(),
            port: self.inner.port,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Always `alive` while the process can answer at all.
    pub fn liveness(&self) -> LivenessStatus {
        LivenessStatus {
            status: Liveness::Alive,
            service: self.inner.service.clone(),
        }
    }

    /// `ready` when every gate passes; with no gates, always `ready`.
    pub fn readiness(&self) -> ReadinessStatus {
        let failing = self.inner.gates.failing();
        let status = if failing.is_empty() {
            Readiness::Ready
        } else {
            Readiness::NotReady
        };
        ReadinessStatus {
            status,
            service: self.inner.service.clone(),
            failing,
        }
    }

    pub fn info(&self) -> ServiceInfo {
        ServiceInfo {
            service: self.inner.service.clone(),
            port: self.inner.port,
            description: self.inner.description.clone(),
            version: env!("CARGO_PKG_VERSION"),
            instance: self.inner.instance,
            timestamp: Utc::now(),
        }
    }
}

/// Builder for [`HealthEndpoint`].
pub struct HealthEndpointBuilder {
    service: String,
    port: u16,
    description: Option<String>,
    gates: ReadinessGates,
}

impl HealthEndpointBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn gate(mut self, gate: Arc<dyn ReadinessGate>) -> Self {
        self.gates.push(gate);
        self
    }

    pub fn gates(mut self, gates: ReadinessGates) -> Self {
        self.gates = gates;
        self
    }

    pub fn build(self) -> HealthEndpoint {
        let description = self
            .description
            .unwrap_or_else(|| self.service.clone());
        HealthEndpoint {
            inner: Arc::new(EndpointInner {
                service: self.service,
                port: self.port,
                description,
                instance: Uuid::new_v4(),
                gates: self.gates,
            }),
        }
    }
}
