//! Configuration loading for the payroll service.
//!
//! This module loads the service settings and the seed data from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load(ConfigLoader::config_dir()).unwrap();
//! println!("Check-in codes live for {} minutes", config.otp_ttl().num_minutes());
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_DIR_ENV, ConfigLoader};
pub use types::{
    AppConfig, AttendanceConfig, LoggingConfig, SeedCompensation, SeedConfig, SeedEmployee,
    SeedOrganization, ServerConfig,
};
