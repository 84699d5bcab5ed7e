//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults suitable for a single-shop deployment.

use serde::{Deserialize, Serialize};
use std::env;

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Maximum database pool connections
    pub max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// | --- | --- |
    /// | `WARUNG_HTTP_PORT` | `3000` |
    /// | `WARUNG_DATABASE_PATH` | `./warung.db` |
    /// | `WARUNG_MAX_CONNECTIONS` | `5` |
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("WARUNG_HTTP_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("WARUNG_HTTP_PORT".to_string()))?,

            database_path: env::var("WARUNG_DATABASE_PATH")
                .unwrap_or_else(|_| "./warung.db".to_string()),

            max_connections: env::var("WARUNG_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("WARUNG_MAX_CONNECTIONS".to_string()))?,
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test drives every case sequentially: the process environment is
    // shared, so parallel tests touching the same variables would race.
    #[test]
    fn test_load_from_environment() {
        env::set_var("WARUNG_HTTP_PORT", "4000");
        env::set_var("WARUNG_DATABASE_PATH", "/tmp/warung-test.db");
        env::set_var("WARUNG_MAX_CONNECTIONS", "9");
        let config = ServerConfig::load().unwrap();
        assert_eq!(config.http_port, 4000);
        assert_eq!(config.database_path, "/tmp/warung-test.db");
        assert_eq!(config.max_connections, 9);

        env::set_var("WARUNG_HTTP_PORT", "not-a-port");
        assert!(matches!(
            ServerConfig::load(),
            Err(ConfigError::InvalidValue(_))
        ));

        env::remove_var("WARUNG_HTTP_PORT");
        env::remove_var("WARUNG_DATABASE_PATH");
        env::remove_var("WARUNG_MAX_CONNECTIONS");
        let config = ServerConfig::load().unwrap();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.database_path, "./warung.db");
        assert_eq!(config.max_connections, 5);
    }
}
