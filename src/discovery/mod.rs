//! Service discovery hooks.
//!
//! The discovery client itself lives outside this crate. What the bootstrap
//! needs from it is a registration status it can consult for readiness, and
//! the naming convention every service registers under.

pub mod registration;

pub use registration::{DiscoveryRegistration, RegistrationFlag, RegistrationGate};

/// Prefix applied to service names in the registry.
pub const SERVICE_NAME_PREFIX: &str = "ecommerce-";

/// Name a service registers under, e.g. `ecommerce-user-service`.
pub fn registry_name(service: &str) -> String {
    format!("{SERVICE_NAME_PREFIX}{service}")
}
