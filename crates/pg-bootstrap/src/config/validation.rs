//! Configuration validation.

use super::Config;
use crate::error::{BootstrapError, Result};

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    if config.database.host.is_empty() {
        return Err(BootstrapError::Config("database.host is required".into()));
    }
    if config.database.database.is_empty() {
        return Err(BootstrapError::Config(
            "database.database is required".into(),
        ));
    }
    if config.database.user.is_empty() {
        return Err(BootstrapError::Config("database.user is required".into()));
    }
    if config.database.port == 0 {
        return Err(BootstrapError::Config(
            "database.port must be at least 1".into(),
        ));
    }
    if config.database.pool_size == 0 {
        return Err(BootstrapError::Config(
            "database.pool_size must be at least 1".into(),
        ));
    }
    if config.schema.file.as_os_str().is_empty() {
        return Err(BootstrapError::Config("schema.file is required".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, SchemaConfig};

    fn valid_config() -> Config {
        Config {
            database: DatabaseConfig {
                host: "localhost".to_string(),
                port: 5432,
                database: "app_db".to_string(),
                user: "postgres".to_string(),
                password: "password".to_string(),
                pool_size: 1,
            },
            schema: SchemaConfig::default(),
        }
    }

    #[test]
    fn test_valid_config() {
        let config = valid_config();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_missing_host() {
        let mut config = valid_config();
        config.database.host = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_database() {
        let mut config = valid_config();
        config.database.database = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_missing_user() {
        let mut config = valid_config();
        config.database.user = "".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_pool_size() {
        let mut config = valid_config();
        config.database.pool_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_database_config_debug_redacts_password() {
        let mut config = valid_config();
        config.database.password = "super_secret_password_123".to_string();
        let debug_output = format!("{:?}", config.database);
        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_password_123"),
            "Debug output should not contain actual password value"
        );
    }
}
