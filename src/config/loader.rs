//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration and seed data from YAML files.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;

use crate::error::{EngineError, EngineResult};

use super::types::{AppConfig, SeedConfig};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "PAYROLL_CONFIG_DIR";

const DEFAULT_CONFIG_DIR: &str = "./config";

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── app.yaml   # Server, logging and check-in settings
/// └── seed.yaml  # Organizations and employees loaded at start-up
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Listening on port {}", loader.app().server.port);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    app: AppConfig,
    seed: SeedConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `app.yaml` or `seed.yaml` is missing or contains
    /// invalid YAML, if the check-in code lifetime is not positive, or if a
    /// seeded compensation is out of range.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let app_path = path.join("app.yaml");
        let app = Self::load_yaml::<AppConfig>(&app_path)?;
        if app.attendance.otp_ttl_minutes <= 0 {
            return Err(EngineError::ConfigParseError {
                path: app_path.display().to_string(),
                message: format!(
                    "attendance.otp_ttl_minutes must be positive, got {}",
                    app.attendance.otp_ttl_minutes
                ),
            });
        }

        let seed_path = path.join("seed.yaml");
        let seed = Self::load_yaml::<SeedConfig>(&seed_path)?;
        seed.validate()
            .map_err(|message| EngineError::ConfigParseError {
                path: seed_path.display().to_string(),
                message,
            })?;

        Ok(Self { app, seed })
    }

    /// Returns the configuration directory: `$PAYROLL_CONFIG_DIR`, or `./config`.
    pub fn config_dir() -> PathBuf {
        std::env::var_os(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR))
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    pub fn seed(&self) -> &SeedConfig {
        &self.seed
    }

    /// Lifetime of an issued check-in code.
    pub fn otp_ttl(&self) -> Duration {
        Duration::minutes(self.app.attendance.otp_ttl_minutes)
    }
}
