//! Deployment environment classification.
//!
//! A substring heuristic over the discovery-server address. It is shown to
//! operators at startup and nothing else branches on it.

use std::fmt;

use serde::Serialize;

use crate::snapshot::keys::DISCOVERY_SERVER_ADDR;
use crate::snapshot::ConfigSnapshot;

/// Hostname token the discovery server is reachable under inside the
/// container network.
pub const CONTAINER_HOST_TOKEN: &str = "nacos:";

const LOCAL_HOST_TOKENS: [&str; 2] = ["localhost", "127.0.0.1"];

/// Where the service appears to be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Local,
    Container,
    #[default]
    Unknown,
}

impl Environment {
    /// Classify a discovery-server address.
    pub fn classify(server_addr: Option<&str>) -> Self {
        match server_addr {
            Some(addr) if LOCAL_HOST_TOKENS.iter().any(|t| addr.contains(t)) => Self::Local,
            Some(addr) if addr.contains(CONTAINER_HOST_TOKEN) => Self::Container,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Local => "local development",
            Self::Container => "container",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify from the snapshot's discovery-server address.
pub fn classify_environment(snapshot: &ConfigSnapshot) -> Environment {
    Environment::classify(snapshot.value(DISCOVERY_SERVER_ADDR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::MapSource;

    #[test]
    fn test_local_addresses() {
        assert_eq!(Environment::classify(Some("localhost:18848")), Environment::Local);
        assert_eq!(Environment::classify(Some("127.0.0.1:8848")), Environment::Local);
    }

    #[test]
    fn test_container_address() {
        assert_eq!(Environment::classify(Some("nacos:8848")), Environment::Container);
    }

    #[test]
    fn test_unknown_addresses() {
        assert_eq!(Environment::classify(None), Environment::Unknown);
        assert_eq!(Environment::classify(Some("")), Environment::Unknown);
        assert_eq!(Environment::classify(Some("10.0.3.7:8848")), Environment::Unknown);
        // Host without the port separator is not the container token.
        assert_eq!(Environment::classify(Some("nacos")), Environment::Unknown);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let addr = Some("nacos:8848");
        assert_eq!(Environment::classify(addr), Environment::classify(addr));
    }

    #[test]
    fn test_classify_from_snapshot() {
        let snapshot = ConfigSnapshot::load(&MapSource::new());
        assert_eq!(classify_environment(&snapshot), Environment::Unknown);

        let source = MapSource::new().with(DISCOVERY_SERVER_ADDR, "localhost:18848");
        let snapshot = ConfigSnapshot::load(&source);
        assert_eq!(classify_environment(&snapshot), Environment::Local);
    }

    #[test]
    fn test_serialized_form() {
        assert_eq!(serde_json::to_string(&Environment::Container).unwrap(), "\"container\"");
    }
}
