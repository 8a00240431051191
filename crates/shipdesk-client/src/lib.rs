//! # shipdesk-client
//!
//! Host glue for the shipment wizard: owns the [`AppState`](state::AppState)
//! shared by every command handler, loads configuration and sets up logging.

pub mod commands;
pub mod config;
pub mod events;
pub mod state;

use std::sync::{Arc, Mutex};

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ClientConfig;
use crate::state::{AppState, SharedState};

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the default
/// filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "shipdesk_client=debug,shipdesk_wizard=debug,shipdesk_api=info,shipdesk_store=info,warn",
        )
    });

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Set up logging and open the application state from the environment.
pub fn init() -> anyhow::Result<SharedState> {
    init_logging();

    let config = ClientConfig::from_env();
    tracing::info!(api = %config.api.base_url(), "Starting Shipdesk client");

    let state = AppState::open(config).context("Failed to initialise application state")?;
    Ok(Arc::new(Mutex::new(state)))
}
