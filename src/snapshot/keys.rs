//! Configuration keys inspected at startup.
//!
//! The list is explicit; the snapshot never scans a source for keys it
//! does not name.

pub const SERVER_PORT: &str = "server.port";
pub const APPLICATION_NAME: &str = "spring.application.name";

pub const DISCOVERY_SERVER_ADDR: &str = "spring.cloud.nacos.discovery.server-addr";
pub const DISCOVERY_NAMESPACE: &str = "spring.cloud.nacos.discovery.namespace";
pub const DISCOVERY_GROUP: &str = "spring.cloud.nacos.discovery.group";
pub const DISCOVERY_USERNAME: &str = "spring.cloud.nacos.discovery.username";
pub const DISCOVERY_PASSWORD: &str = "spring.cloud.nacos.discovery.password";
pub const DISCOVERY_ENABLED: &str = "spring.cloud.nacos.discovery.enabled";
pub const DISCOVERY_REGISTER_ENABLED: &str = "spring.cloud.nacos.discovery.register-enabled";

pub const DATASOURCE_DRIVER: &str = "spring.datasource.driver-class-name";
pub const DATASOURCE_URL: &str = "spring.datasource.url";
pub const DATASOURCE_USERNAME: &str = "spring.datasource.username";
pub const DATASOURCE_PASSWORD: &str = "spring.datasource.password";

pub const REDIS_HOST: &str = "spring.data.redis.host";
pub const REDIS_PORT: &str = "spring.data.redis.port";
pub const REDIS_PASSWORD: &str = "spring.data.redis.password";
pub const REDIS_DATABASE: &str = "spring.data.redis.database";

pub const ORM_UNDERSCORE_TO_CAMEL: &str = "mybatis-plus.configuration.map-underscore-to-camel-case";
pub const ORM_LOG_IMPL: &str = "mybatis-plus.configuration.log-impl";
pub const ORM_LOGIC_DELETE_FIELD: &str = "mybatis-plus.global-config.db-config.logic-delete-field";
pub const ORM_LOGIC_DELETE_VALUE: &str = "mybatis-plus.global-config.db-config.logic-delete-value";
pub const ORM_LOGIC_NOT_DELETE_VALUE: &str =
    "mybatis-plus.global-config.db-config.logic-not-delete-value";

/// Root package logger shared by every service.
pub const LOGGING_LEVEL_ROOT: &str = "logging.level.com.cao.ecommerce";
pub const LOGGING_PATTERN_CONSOLE: &str = "logging.pattern.console";

pub const MANAGEMENT_EXPOSURE_INCLUDE: &str = "management.endpoints.web.exposure.include";
pub const MANAGEMENT_HEALTH_SHOW_DETAILS: &str = "management.endpoint.health.show-details";

/// Every key the snapshot pulls, grouped the way the report shows them.
pub const KNOWN_KEYS: &[&str] = &[
    SERVER_PORT,
    APPLICATION_NAME,
    DISCOVERY_SERVER_ADDR,
    DISCOVERY_NAMESPACE,
    DISCOVERY_GROUP,
    DISCOVERY_USERNAME,
    DISCOVERY_PASSWORD,
    DISCOVERY_ENABLED,
    DISCOVERY_REGISTER_ENABLED,
    DATASOURCE_DRIVER,
    DATASOURCE_URL,
    DATASOURCE_USERNAME,
    DATASOURCE_PASSWORD,
    REDIS_HOST,
    REDIS_PORT,
    REDIS_PASSWORD,
    REDIS_DATABASE,
    ORM_UNDERSCORE_TO_CAMEL,
    ORM_LOG_IMPL,
    ORM_LOGIC_DELETE_FIELD,
    ORM_LOGIC_DELETE_VALUE,
    ORM_LOGIC_NOT_DELETE_VALUE,
    LOGGING_LEVEL_ROOT,
    LOGGING_PATTERN_CONSOLE,
    MANAGEMENT_EXPOSURE_INCLUDE,
    MANAGEMENT_HEALTH_SHOW_DETAILS,
];

/// Mapper logger key for a service module, e.g. `user`.
pub fn mapper_logging_key(module: &str) -> String {
    format!("{LOGGING_LEVEL_ROOT}.{module}.mapper")
}
