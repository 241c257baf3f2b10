//! Catalog of the backend services sharing this bootstrap.

use clap::ValueEnum;

use crate::snapshot::keys::mapper_logging_key;

/// Static identity of one deployable service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceProfile {
    /// Registry and health-payload name.
    pub name: &'static str,
    /// Title used in the startup report.
    pub display_name: &'static str,
    /// Package segment used for per-service logger keys.
    pub module: &'static str,
    /// Default listen port.
    pub port: u16,
    pub description: &'static str,
}

impl ServiceProfile {
    /// Logger key for this service's data mappers.
    pub fn mapper_logging_key(&self) -> String {
        mapper_logging_key(self.module)
    }
}

pub const GATEWAY: ServiceProfile = ServiceProfile {
    name: "api-gateway",
    display_name: "API Gateway",
    module: "gateway",
    port: 28080,
    description: "E-commerce API gateway",
};

pub const USER: ServiceProfile = ServiceProfile {
    name: "user-service",
    display_name: "User Service",
    module: "user",
    port: 28081,
    description: "User registration, login and profile management",
};

pub const PRODUCT: ServiceProfile = ServiceProfile {
    name: "product-service",
    display_name: "Product Service",
    module: "product",
    port: 28082,
    description: "Product catalog",
};

pub const TRADE: ServiceProfile = ServiceProfile {
    name: "trade-service",
    display_name: "Trade Service",
    module: "trade",
    port: 28083,
    description: "Orders and payments",
};

pub const ALL: [ServiceProfile; 4] = [GATEWAY, USER, PRODUCT, TRADE];

/// Service selector for the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ServiceKind {
    Gateway,
    User,
    Product,
    Trade,
}

impl ServiceKind {
    pub fn profile(self) -> ServiceProfile {
        match self {
            Self::Gateway => GATEWAY,
            Self::User => USER,
            Self::Product => PRODUCT,
            Self::Trade => TRADE,
        }
    }
}

/// Look a profile up by registry name (`user-service`) or module (`user`).
pub fn find(name: &str) -> Option<ServiceProfile> {
    ALL.into_iter()
        .find(|p| p.name == name || p.module == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ports_are_distinct() {
        let ports: HashSet<u16> = ALL.iter().map(|p| p.port).collect();
        assert_eq!(ports.len(), ALL.len());

        let names: HashSet<&str> = ALL.iter().map(|p| p.name).collect();
        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn test_default_ports() {
        let ports: Vec<u16> = ALL.iter().map(|p| p.port).collect();
        assert_eq!(ports, [28080, 28081, 28082, 28083]);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("user-service"), Some(USER));
        assert_eq!(find("trade"), Some(TRADE));
        assert_eq!(find("inventory"), None);
    }

    #[test]
    fn test_kind_to_profile() {
        assert_eq!(ServiceKind::Gateway.profile().port, 28080);
        assert_eq!(ServiceKind::Product.profile().name, "product-service");
    }

    #[test]
    fn test_mapper_logging_key() {
        assert_eq!(
            USER.mapper_logging_key(),
            "logging.level.com.cao.ecommerce.user.mapper"
        );
    }
}
