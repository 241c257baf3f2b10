//! Registration status as seen by readiness.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::health::readiness::ReadinessGate;

/// Whether this instance has announced itself to the registry.
pub trait DiscoveryRegistration: Send + Sync {
    fn is_registered(&self) -> bool;
}

/// Flag a discovery client flips once registration completes.
#[derive(Debug, Default)]
pub struct RegistrationFlag {
    registered: AtomicBool,
}

impl RegistrationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_registered(&self) {
        self.registered.store(true, Ordering::Release);
        tracing::info!("Discovery registration complete");
    }

    pub fn mark_deregistered(&self) {
        self.registered.store(false, Ordering::Release);
        tracing::info!("Discovery registration withdrawn");
    }
}

impl DiscoveryRegistration for RegistrationFlag {
    fn is_registered(&self) -> bool {
        self.registered.load(Ordering::Acquire)
    }
}

/// Readiness gate that passes once the registration reports success.
pub struct RegistrationGate<R: ?Sized> {
    registration: Arc<R>,
}

impl<R: DiscoveryRegistration + ?Sized> RegistrationGate<R> {
    pub const NAME: &'static str = "discovery-registration";

    pub fn new(registration: Arc<R>) -> Self {
        Self { registration }
    }
}

impl<R: DiscoveryRegistration + ?Sized> ReadinessGate for RegistrationGate<R> {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_ready(&self) -> bool {
        self.registration.is_registered()
    }
}
