//! Shipment Service connection settings, loaded from environment variables.

use std::time::Duration;

use shipdesk_shared::constants::{DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_URL};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the Shipment Service.
    /// Env: `SHIPDESK_API_URL`
    /// Default: `http://localhost:8080`
    pub base_url: String,

    /// Per-request timeout. No retry happens on top of it.
    /// Env: `SHIPDESK_API_TIMEOUT_SECS`
    /// Default: `30`
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SHIPDESK_API_URL") {
            if url.trim().is_empty() {
                tracing::warn!("Empty SHIPDESK_API_URL, using default");
            } else {
                config.base_url = url;
            }
        }

        if let Ok(val) = std::env::var("SHIPDESK_API_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => tracing::warn!(value = %val, "Invalid SHIPDESK_API_TIMEOUT_SECS, using default"),
            }
        }

        config
    }

    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
