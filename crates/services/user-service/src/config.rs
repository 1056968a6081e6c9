//! User service configuration.

use common::{CacheConfig, DatabaseConfig};

/// User service configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct UserServiceConfig {
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
}

impl UserServiceConfig {
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
        }
    }
}
