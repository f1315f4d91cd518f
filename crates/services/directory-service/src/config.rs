//! Directory service configuration.

use std::env;

use common::{DatabaseConfig, ServiceConfig};

const SERVICE_NAME: &str = "directory-service";
const DEFAULT_PORT: u16 = 50052;

/// Directory service configuration.
#[derive(Debug, Clone)]
pub struct DirectoryServiceConfig {
    /// Bind address and logging defaults
    pub service: ServiceConfig,
    /// Persistent store
    pub database: DatabaseConfig,
}

impl DirectoryServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Service-prefixed variables win over the generic ones.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service: ServiceConfig {
                service_name: SERVICE_NAME.to_string(),
                host: env::var("DIRECTORY_SERVICE_HOST").unwrap_or(defaults.service.host),
                port: env::var("DIRECTORY_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.service.port),
                log_level: env::var("DIRECTORY_SERVICE_LOG_LEVEL")
                    .unwrap_or(defaults.service.log_level),
            },
            database: DatabaseConfig {
                url: env::var("DIRECTORY_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.database.url),
                max_connections: env::var("DIRECTORY_SERVICE_DB_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.max_connections),
                min_connections: env::var("DIRECTORY_SERVICE_DB_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.database.min_connections),
            },
        }
    }
}

impl Default for DirectoryServiceConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                service_name: SERVICE_NAME.to_string(),
                port: DEFAULT_PORT,
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DirectoryServiceConfig::default();
        assert_eq!(config.service.service_name, "directory-service");
        assert_eq!(config.service.port, 50052);
        assert_eq!(config.service.host, "0.0.0.0");
        assert_eq!(config.database.max_connections, 10);
    }
}
