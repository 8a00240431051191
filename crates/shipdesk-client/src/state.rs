//! Application state shared across all command handlers.
//!
//! [`AppState`] is wrapped in `Arc<Mutex<>>`. Handlers take the lock only for
//! synchronous work and release it before awaiting the Shipment Service.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::Context;
use tokio::sync::broadcast;

use shipdesk_api::{ApiError, HttpShipmentService, ShipmentService};
use shipdesk_store::{Database, DraftState, MemoryStore, SharedStore};
use shipdesk_wizard::{PhotosForm, Wizard, WizardError};

use crate::config::ClientConfig;
use crate::events::WizardEvent;

pub type SharedState = Arc<Mutex<AppState>>;

pub struct AppState {
    pub config: ClientConfig,

    /// The Local Draft Store.
    pub store: SharedStore,

    /// Shipment Service client. Built on first use from the stored auth token.
    pub api: Option<Arc<dyn ShipmentService>>,

    /// The running wizard. `None` until a shipment is started, resumed or
    /// opened for editing.
    pub wizard: Option<Wizard<SharedStore>>,

    /// Photos picked on step 3 but not yet uploaded.
    pub photos: PhotosForm,

    events: broadcast::Sender<WizardEvent>,
}

impl AppState {
    /// Open the configured Local Draft Store.
    pub fn open(config: ClientConfig) -> anyhow::Result<Self> {
        let store: SharedStore = if config.in_memory_store {
            tracing::info!("Using in-memory draft store");
            Arc::new(MemoryStore::new())
        } else {
            let db = match &config.db_path {
                Some(path) => Database::open_at(path),
                None => Database::new(),
            }
            .context("Failed to open draft store")?;
            Arc::new(Mutex::new(db))
        };

        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: ClientConfig, store: SharedStore) -> Self {
        let (events, _) = broadcast::channel(32);
        Self {
            config,
            store,
            api: None,
            wizard: None,
            photos: PhotosForm::new(),
            events,
        }
    }

    /// Use `api` instead of building an HTTP client.
    pub fn with_api(mut self, api: Arc<dyn ShipmentService>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn draft_state(&self) -> DraftState<SharedStore> {
        DraftState::new(self.store.clone())
    }

    /// The Shipment Service client, authenticated with the stored token.
    pub fn api(&mut self) -> Result<Arc<dyn ShipmentService>, WizardError> {
        if let Some(api) = &self.api {
            return Ok(api.clone());
        }

        let token = self
            .draft_state()
            .auth_token()?
            .ok_or(ApiError::Unauthenticated)?;
        let api: Arc<dyn ShipmentService> =
            Arc::new(HttpShipmentService::new(&self.config.api, token)?);
        self.api = Some(api.clone());
        Ok(api)
    }

    pub fn wizard(&self) -> Result<&Wizard<SharedStore>, String> {
        self.wizard
            .as_ref()
            .ok_or_else(|| "No shipment in progress".to_string())
    }

    pub fn wizard_mut(&mut self) -> Result<&mut Wizard<SharedStore>, String> {
        self.wizard
            .as_mut()
            .ok_or_else(|| "No shipment in progress".to_string())
    }

    /// Install `wizard`, aborting whatever the previous one had in flight.
    pub fn replace_wizard(&mut self, wizard: Wizard<SharedStore>) {
        self.close_wizard();
        self.wizard = Some(wizard);
    }

    pub fn close_wizard(&mut self) {
        if let Some(previous) = self.wizard.take() {
            previous.abort_handle().cancel();
        }
        self.photos = PhotosForm::new();
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WizardEvent> {
        self.events.subscribe()
    }

    pub fn emit(&self, event: WizardEvent) {
        tracing::debug!(?event, "wizard event");
        // No subscriber is not an error: the caller also gets the event back.
        let _ = self.events.send(event);
    }
}

pub(crate) fn lock(state: &SharedState) -> Result<MutexGuard<'_, AppState>, String> {
    state.lock().map_err(|e| format!("Lock poisoned: {e}"))
}
