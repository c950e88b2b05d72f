//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid request timeout: must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("API base URL must use HTTPS in production")]
    BaseUrlMustBeHttps,

    #[error("Locale cannot be empty")]
    EmptyLocale,

    #[error("Refresh path cannot be empty")]
    EmptyRefreshPath,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
