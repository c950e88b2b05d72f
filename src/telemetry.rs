//! Tracing subscriber setup for binaries and examples embedding the client.
//!
//! The library itself only emits `tracing` events; installing a subscriber is
//! left to the application, which calls [`init_tracing`] once at start-up.

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Tracing subscriber already installed: {0}")]
    AlreadyInitialized(String),
}

/// Builds the filter: `RUST_LOG` when set, otherwise the configured directive.
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| TelemetryError::InvalidFilter(e.to_string())),
    }
}

/// Installs a global subscriber with pretty or JSON output.
///
/// Fails instead of panicking when a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let result = if config.json {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_an_error_not_a_panic() {
        let config = LoggingConfig::default();
        let first = init_tracing(&config);
        let second = init_tracing(&config);

        // Another test may have installed a subscriber first; either way the
        // second call must fail cleanly.
        let _ = first;
        assert!(matches!(second, Err(TelemetryError::AlreadyInitialized(_))));
    }

    #[test]
    fn invalid_filter_is_reported() {
        let config = LoggingConfig {
            filter: "nak_booking_client=notalevel".to_string(),
            json: false,
        };
        if std::env::var("RUST_LOG").is_err() {
            assert!(matches!(
                build_filter(&config),
                Err(TelemetryError::InvalidFilter(_))
            ));
        }
    }
}
