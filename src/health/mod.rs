//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! GET <base>/health | /liveness | /readiness | /info
//!     → http handlers
//!     → probes.rs (HealthEndpoint builds the payload on demand)
//!     → readiness.rs (gates evaluated for /readiness only)
//! ```
//!
//! # Design Decisions
//! - Probes are pure functions of values fixed at startup
//! - Health and liveness never self-report a negative state; an
//!   unreachable process is the down signal
//! - Readiness is extended through gates rather than hard-coded checks

pub mod probes;
pub mod readiness;

pub use probes::{
    HealthEndpoint, HealthEndpointBuilder, HealthState, HealthStatus, Liveness, LivenessStatus,
    Readiness, ReadinessStatus, ServiceInfo,
};
pub use readiness::{FnGate, ReadinessGate, ReadinessGates};
