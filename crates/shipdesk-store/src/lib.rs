//! # shipdesk-store
//!
//! The Local Draft Store: durable key-value storage that survives reloads and
//! holds the wizard's draft shipment, current step and auth token.
//!
//! Storage is reached through the [`DraftStore`] trait so the backing store
//! can be swapped. Two implementations ship here: [`MemoryStore`] for tests
//! and ephemeral sessions, and the SQLite-backed [`Database`].

pub mod database;
pub mod kv;
pub mod migrations;
pub mod state;

mod error;

pub use database::Database;
pub use error::StoreError;
pub use kv::{DraftStore, MemoryStore, SharedStore};
pub use state::DraftState;
