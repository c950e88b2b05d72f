//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `NAK_BOOKING` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use nak_booking_client::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Talking to {}", config.api.resolved_base_url());
//! ```

mod api;
mod error;
mod logging;
mod session;

pub use api::{ApiConfig, ApiEnvironment};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use session::SessionConfig;

use serde::Deserialize;

/// Root client configuration
///
/// Every section has defaults, so an empty environment yields a client for
/// the demo backend with an in-memory session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Backend API (environment, base URL, timeout, locale)
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence
    #[serde(default)]
    pub session: SessionConfig,

    /// Tracing subscriber setup
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `NAK_BOOKING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `NAK_BOOKING__API__ENVIRONMENT=production` -> `api.environment = production`
    /// - `NAK_BOOKING__SESSION__STORAGE_PATH=...` -> `session.storage_path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("NAK_BOOKING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.api.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Check if talking to the production backend
    pub fn is_production(&self) -> bool {
        self.api.is_production()
    }
}
