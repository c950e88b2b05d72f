//! Backend API configuration

use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::error::ValidationError;

/// Backend deployment the client talks to
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApiEnvironment {
    #[serde(alias = "dev")]
    Development,
    Test,
    #[serde(alias = "prod")]
    Production,
    #[default]
    Demo,
}

impl ApiEnvironment {
    /// Base URL of this deployment
    pub fn base_url(&self) -> &'static str {
        match self {
            ApiEnvironment::Development => "https://api-mobile.dev.nak-sports.diversius.com/v1/",
            ApiEnvironment::Test => "https://api-mobile.test.nak-sports.diversius.com/v1/",
            ApiEnvironment::Production => "https://mobile-api.manager.nak-sports.com/v1/",
            ApiEnvironment::Demo => "https://mobile-api.manager-demo.nak-sports.com/v1/",
        }
    }
}

impl fmt::Display for ApiEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiEnvironment::Development => "development",
            ApiEnvironment::Test => "test",
            ApiEnvironment::Production => "production",
            ApiEnvironment::Demo => "demo",
        };
        f.write_str(s)
    }
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Deployment to use when no explicit base URL is set
    #[serde(default)]
    pub environment: ApiEnvironment,

    /// Explicit base URL, overriding the environment's
    pub base_url: Option<String>,

    /// Overall per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Initial value of the locale header
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Relative path of the refresh endpoint
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
}

impl ApiConfig {
    /// Base URL actually used: the override if set, else the environment's
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.environment.base_url())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_production(&self) -> bool {
        self.environment == ApiEnvironment::Production
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        let url = Url::parse(self.resolved_base_url())
            .map_err(|e| ValidationError::InvalidBaseUrl(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
            return Err(ValidationError::InvalidBaseUrl(
                "must be an http(s) URL with a host".to_string(),
            ));
        }
        if self.is_production() && url.scheme() != "https" {
            return Err(ValidationError::BaseUrlMustBeHttps);
        }

        if self.locale.trim().is_empty() {
            return Err(ValidationError::EmptyLocale);
        }
        if self.refresh_path.trim().is_empty() {
            return Err(ValidationError::EmptyRefreshPath);
        }
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: ApiEnvironment::default(),
            base_url: None,
            timeout_secs: default_timeout(),
            locale: default_locale(),
            refresh_path: default_refresh_path(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_refresh_path() -> String {
    "auth/token".to_string()
}
