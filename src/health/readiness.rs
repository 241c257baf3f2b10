//! Readiness gates.
//!
//! # Responsibilities
//! - Define the capability a readiness dependency must provide
//! - Evaluate every registered gate on each readiness probe
//!
//! # Design Decisions
//! - No gates means ready; the skeleton services register none
//! - Gates are evaluated on demand, results are never cached

use std::fmt;
use std::sync::Arc;

/// A dependency that must be satisfied before the service takes traffic.
pub trait ReadinessGate: Send + Sync {
    /// Stable name reported when the gate fails.
    fn name(&self) -> &str;

    fn is_ready(&self) -> bool;
}

/// Gate backed by a closure, e.g. a datastore ping flag.
pub struct FnGate<F> {
    name: String,
    check: F,
}

impl<F> FnGate<F>
where
    F: Fn() -> bool + Send + Sync,
{
    pub fn new(name: impl Into<String>, check: F) -> Self {
        Self {
            name: name.into(),
            check,
        }
    }
}

impl<F> ReadinessGate for FnGate<F>
where
    F: Fn() -> bool + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ready(&self) -> bool {
        (self.check)()
    }
}

/// The set of gates a service's readiness depends on.
#[derive(Clone, Default)]
pub struct ReadinessGates {
    gates: Vec<Arc<dyn ReadinessGate>>,
}

impl ReadinessGates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, gate: Arc<dyn ReadinessGate>) {
        self.gates.push(gate);
    }

    pub fn len(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Names of the gates that are not ready, in registration order.
    pub fn failing(&self) -> Vec<String> {
        self.gates
            .iter()
            .filter(|gate| !gate.is_ready())
            .map(|gate| gate.name().to_string())
            .collect()
    }
}

impl fmt::Debug for ReadinessGates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.gates.iter().map(|g| g.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_no_gates_nothing_failing() {
        assert!(ReadinessGates::new().failing().is_empty());
    }

    #[test]
    fn test_failing_gates_in_order() {
        let mut gates = ReadinessGates::new();
        gates.push(Arc::new(FnGate::new("datastore", || false)));
        gates.push(Arc::new(FnGate::new("cache", || true)));
        gates.push(Arc::new(FnGate::new("discovery-registration", || false)));

        assert_eq!(gates.len(), 3);
        assert_eq!(gates.failing(), ["datastore", "discovery-registration"]);
    }

    #[test]
    fn test_gate_reevaluated_each_time() {
        let flag = Arc::new(AtomicBool::new(false));
        let observed = flag.clone();
        let mut gates = ReadinessGates::new();
        gates.push(Arc::new(FnGate::new("datastore", move || {
            observed.load(Ordering::Acquire)
        })));

        assert_eq!(gates.failing().len(), 1);
        flag.store(true, Ordering::Release);
        assert!(gates.failing().is_empty());
    }
}
