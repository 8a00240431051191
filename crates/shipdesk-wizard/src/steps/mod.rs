//! Per-step forms.
//!
//! Each form validates its own input and, on submit, issues exactly one
//! Shipment Service call. The controller decides when a form may be sent.

mod delivery;
mod details;
mod dimensions;
mod photos;
mod pickup;

pub use delivery::DeliveryForm;
pub use details::DetailsForm;
pub use dimensions::DimensionsForm;
pub use photos::PhotosForm;
pub use pickup::PickupForm;

use async_trait::async_trait;

use shipdesk_api::ShipmentService;
use shipdesk_shared::{DraftShipment, ShipmentId, ValidationErrors};

use crate::error::WizardError;
use crate::step::WizardStep;

#[async_trait]
pub trait StepForm: Send + Sync {
    /// The step this form belongs to.
    const STEP: WizardStep;

    fn validate(&self, draft: &DraftShipment) -> Result<(), ValidationErrors>;

    /// True when the draft already holds exactly what this form would send,
    /// so continuing needs no server round-trip.
    fn is_confirmed(&self, draft: &DraftShipment) -> bool;

    /// Issue this step's single Shipment Service call.
    async fn send(
        &self,
        api: &dyn ShipmentService,
        draft: &DraftShipment,
    ) -> Result<DraftShipment, WizardError>;
}

pub(crate) fn require_id(draft: &DraftShipment) -> Result<&ShipmentId, WizardError> {
    draft.id.as_ref().ok_or(WizardError::MissingShipmentId)
}
