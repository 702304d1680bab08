//! Configuration loader with layered sources.

use crate::{AppConfig, DEFAULT_JWT_SECRET};
use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use std::sync::Arc;
use storefront_core::StorefrontError;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Prefix for environment variable overrides, e.g. `STOREFRONT_CACHE__TTL_SECS`.
pub const ENV_PREFIX: &str = "STOREFRONT";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `STOREFRONT_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, StorefrontError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, StorefrontError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), StorefrontError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, StorefrontError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("STOREFRONT_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_storefront_error)?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_storefront_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Gets a specific configuration value by key path, e.g. `cache.ttl_secs`.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Rejects configurations the server cannot run with.
pub fn validate_config(config: &AppConfig) -> Result<(), StorefrontError> {
    if config.app.environment == "production" && config.security.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("Using default JWT secret in production! This is a security risk.");
    }

    if config.database.url.is_empty() {
        return Err(StorefrontError::Configuration(
            "Database URL is required".to_string(),
        ));
    }

    if config.redis.enabled && config.redis.url.is_empty() {
        return Err(StorefrontError::Configuration(
            "Redis URL is required when redis is enabled".to_string(),
        ));
    }

    if config.cache.ttl_secs == 0 {
        return Err(StorefrontError::Configuration(
            "cache.ttl_secs must be greater than zero".to_string(),
        ));
    }

    if config.cache.operation_timeout_ms == 0 {
        return Err(StorefrontError::Configuration(
            "cache.operation_timeout_ms must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_storefront_error(err: ConfigError) -> StorefrontError {
    StorefrontError::Configuration(err.to_string())
}
