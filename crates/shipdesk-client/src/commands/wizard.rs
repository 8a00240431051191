//! Wizard lifecycle and step submission commands.

use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use shipdesk_shared::{DraftShipment, PackageType, ServiceType, ShipmentId};
use shipdesk_store::DraftStore;
use shipdesk_wizard::{
    DeliveryForm, DetailsForm, DimensionsForm, PickupForm, Wizard, WizardError, WizardStep,
};

use super::run_step;
use crate::events::WizardEvent;
use crate::state::{lock, SharedState};

/// Snapshot of the wizard for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardView {
    pub step: u8,
    pub title: &'static str,
    pub submitting: bool,
    pub draft: DraftShipment,
}

fn view<S: DraftStore>(wizard: &Wizard<S>) -> WizardView {
    WizardView {
        step: wizard.step().number(),
        title: wizard.step().title(),
        submitting: wizard.is_submitting(),
        draft: wizard.draft().clone(),
    }
}

fn user_message(e: WizardError) -> String {
    e.user_message()
}

/// Start a new shipment of `service_type` at step 1.
pub fn start_shipment(state: &SharedState, service_type: String) -> Result<WizardView, String> {
    let mut guard = lock(state)?;

    let wizard = Wizard::start(guard.draft_state(), ServiceType::from(service_type))
        .map_err(user_message)?;
    let view = view(&wizard);

    guard.replace_wizard(wizard);
    guard.emit(WizardEvent::entered(WizardStep::FIRST));

    Ok(view)
}

/// Continue the draft left in the Local Draft Store, e.g. after a reload.
pub fn resume_wizard(state: &SharedState) -> Result<WizardView, String> {
    let mut guard = lock(state)?;

    let wizard = Wizard::restore(guard.draft_state()).map_err(user_message)?;
    let view = view(&wizard);
    let step = wizard.step();

    guard.replace_wizard(wizard);
    guard.emit(WizardEvent::entered(step));

    Ok(view)
}

/// Open an existing shipment in the wizard, starting at step 1.
pub async fn edit_shipment(state: &SharedState, shipment_id: String) -> Result<WizardView, String> {
    let id = ShipmentId::new(shipment_id);

    let (api, draft_state) = {
        let mut guard = lock(state)?;
        let api = guard.api().map_err(user_message)?;
        (api, guard.draft_state())
    };

    let wizard = Wizard::edit(draft_state, api.as_ref(), &id)
        .await
        .map_err(user_message)?;
    let view = view(&wizard);

    let mut guard = lock(state)?;
    guard.replace_wizard(wizard);
    guard.emit(WizardEvent::entered(WizardStep::FIRST));

    info!(shipment_id = %id, "Shipment opened for editing");
    Ok(view)
}

pub fn current_wizard(state: &SharedState) -> Result<WizardView, String> {
    let guard = lock(state)?;
    Ok(view(guard.wizard()?))
}

pub async fn submit_details(
    state: &SharedState,
    package_type: Option<String>,
    package_description: String,
    fragile: bool,
) -> Result<WizardEvent, String> {
    let package_type = package_type
        .filter(|t| !t.is_empty())
        .map(|t| PackageType::from_str(&t))
        .transpose()?;

    let form = {
        let guard = lock(state)?;
        let draft = guard.wizard()?.draft();
        // the form prefills the only option and the fixed airfreight text
        let mut form = DetailsForm::from_draft(draft);
        if package_type.is_some() {
            form.package_type = package_type;
        }
        if DetailsForm::description_editable(&draft.service_type) {
            form.package_description = package_description;
        }
        form.fragile = fragile;
        form
    };

    run_step(state, form).await
}

pub async fn submit_delivery(
    state: &SharedState,
    pickup_address: String,
    delivery_address: String,
    recipient_name: String,
    recipient_phone: String,
) -> Result<WizardEvent, String> {
    let form = DeliveryForm {
        pickup_address,
        delivery_address,
        recipient_name,
        recipient_phone,
    };
    run_step(state, form).await
}

/// Upload the photos picked so far.
pub async fn submit_photos(state: &SharedState) -> Result<WizardEvent, String> {
    let form = lock(state)?.photos.clone();
    let event = run_step(state, form).await?;

    lock(state)?.photos = Default::default();
    Ok(event)
}

/// Confirm the pickup date at `index` of [`super::options::pickup_options`].
pub async fn submit_pickup(state: &SharedState, index: usize) -> Result<WizardEvent, String> {
    let mut form = PickupForm::today();
    form.select_index(index).map_err(|e| e.to_string())?;
    run_step(state, form).await
}

pub async fn submit_dimensions(
    state: &SharedState,
    width: Option<f64>,
    height: Option<f64>,
    length: Option<f64>,
) -> Result<WizardEvent, String> {
    let form = DimensionsForm {
        width,
        height,
        length,
    };
    run_step(state, form).await
}

/// Move on without submitting the current step.
pub fn skip_step(state: &SharedState) -> Result<WizardEvent, String> {
    let mut guard = lock(state)?;
    let transition = guard.wizard_mut()?.skip().map_err(user_message)?;

    let event = WizardEvent::from_transition(&transition);
    guard.emit(event.clone());
    Ok(event)
}

/// Previous step, or leave the wizard from step 1.
pub fn go_back(state: &SharedState) -> Result<WizardEvent, String> {
    let mut guard = lock(state)?;
    let transition = guard.wizard_mut()?.retreat().map_err(user_message)?;

    let event = WizardEvent::from_transition(&transition);
    guard.emit(event.clone());
    Ok(event)
}

/// Drop the stored draft and step. The auth token stays.
pub fn discard_shipment(state: &SharedState) -> Result<(), String> {
    let mut guard = lock(state)?;
    guard.close_wizard();
    guard
        .draft_state()
        .discard_progress()
        .map_err(|e| format!("Failed to discard draft: {e}"))?;

    info!("Shipment draft discarded");
    Ok(())
}
