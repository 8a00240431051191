//! Typed access to the wizard's persisted keys.
//!
//! Three keys live in the store: the JSON-serialised draft (overwritten in
//! full after every confirmed server update), the current step as a
//! string-encoded integer, and the auth token written by the login screen.

use shipdesk_shared::DraftShipment;

use crate::error::{Result, StoreError};
use crate::kv::DraftStore;

pub const KEY_SHIPMENT: &str = "shipment";
pub const KEY_STEP: &str = "step";
pub const KEY_TOKEN: &str = "token";

pub struct DraftState<S> {
    store: S,
}

impl<S: DraftStore> DraftState<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load_draft(&self) -> Result<Option<DraftShipment>> {
        let Some(json) = self.store.get(KEY_SHIPMENT)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: KEY_SHIPMENT.to_string(),
                source,
            })
    }

    pub fn save_draft(&self, draft: &DraftShipment) -> Result<()> {
        let json = serde_json::to_string(draft).map_err(|source| StoreError::Json {
            key: KEY_SHIPMENT.to_string(),
            source,
        })?;
        self.store.set(KEY_SHIPMENT, &json)
    }

    /// The persisted step number. Unparseable values read as `None`.
    pub fn load_step(&self) -> Result<Option<u8>> {
        let step = self.store.get(KEY_STEP)?;
        Ok(step.and_then(|s| match s.trim().parse::<u8>() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::warn!(value = %s, "ignoring unparseable stored step");
                None
            }
        }))
    }

    pub fn save_step(&self, step: u8) -> Result<()> {
        self.store.set(KEY_STEP, &step.to_string())
    }

    /// Bearer token stored by the login flow. Read-only for the wizard.
    pub fn auth_token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(KEY_TOKEN)?
            .filter(|token| !token.trim().is_empty()))
    }

    /// Forget the draft and step, keeping the auth token.
    pub fn discard_progress(&self) -> Result<()> {
        self.store.remove(KEY_SHIPMENT)?;
        self.store.remove(KEY_STEP)
    }
}
