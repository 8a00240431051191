//! Client configuration, loaded from environment variables.

use std::path::PathBuf;

use shipdesk_api::ApiConfig;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Shipment Service connection settings.
    pub api: ApiConfig,

    /// SQLite file backing the Local Draft Store.
    /// Env: `SHIPDESK_DB_PATH`
    /// Default: `shipdesk.db` in the platform data directory
    pub db_path: Option<PathBuf>,

    /// Keep drafts in memory only; nothing survives a restart.
    /// Env: `SHIPDESK_IN_MEMORY_STORE`
    /// Default: `false`
    pub in_memory_store: bool,
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self {
            api: ApiConfig::from_env(),
            ..Self::default()
        };

        if let Ok(path) = std::env::var("SHIPDESK_DB_PATH") {
            if !path.trim().is_empty() {
                config.db_path = Some(PathBuf::from(path));
            }
        }

        if let Ok(val) = std::env::var("SHIPDESK_IN_MEMORY_STORE") {
            match parse_flag(&val) {
                Some(flag) => config.in_memory_store = flag,
                None => {
                    tracing::warn!(value = %val, "Invalid SHIPDESK_IN_MEMORY_STORE, using default")
                }
            }
        }

        config
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
