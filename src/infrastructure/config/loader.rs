use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project config file, read from the working directory
pub const CONFIG_FILE: &str = "mission-relay.yaml";

/// Optional local overrides, read from the working directory
pub const LOCAL_CONFIG_FILE: &str = "mission-relay.local.yaml";

/// Prefix of environment overrides; nested keys are split on `__`
pub const ENV_PREFIX: &str = "MISSION_RELAY_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port: {0}. Must be between 1 and 65535")]
    InvalidPort(u16),

    #[error("Photo root directory cannot be empty")]
    EmptyPhotoRoot,

    #[error("Invalid latest_limit: {0}. Must be at least 1")]
    InvalidLatestLimit(usize),

    #[error("Invalid min_confidence: {0}. Must be between 0.0 and 1.0")]
    InvalidMinConfidence(f64),

    #[error("Invalid detection timeout: {0}. Must be at least 1 second")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Detection is enabled but no endpoint is configured")]
    EmptyDetectionEndpoint,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. mission-relay.yaml
    /// 3. mission-relay.local.yaml (optional)
    /// 4. Environment variables (MISSION_RELAY_* prefix)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(CONFIG_FILE))
            .merge(Yaml::file(LOCAL_CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, still honouring environment
    /// overrides
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.server.port == 0 {
            return Err(ConfigError::InvalidPort(config.server.port));
        }

        if config.photos.root_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyPhotoRoot);
        }

        if config.photos.latest_limit == 0 {
            return Err(ConfigError::InvalidLatestLimit(config.photos.latest_limit));
        }

        let detection = &config.detection;
        if !(0.0..=1.0).contains(&detection.min_confidence) {
            return Err(ConfigError::InvalidMinConfidence(detection.min_confidence));
        }

        if detection.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(detection.timeout_secs));
        }

        if detection.enabled && detection.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyDetectionEndpoint);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}
