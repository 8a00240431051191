use async_trait::async_trait;

use shipdesk_api::{ShipmentService, ShipmentUpdate};
use shipdesk_shared::{DeliveryDetails, DraftShipment, ValidationErrors};

use super::{require_id, StepForm};
use crate::error::WizardError;
use crate::step::WizardStep;

/// Step 2: where the package is collected and who receives it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryForm {
    pub pickup_address: String,
    pub delivery_address: String,
    pub recipient_name: String,
    pub recipient_phone: String,
}

impl DeliveryForm {
    pub fn from_draft(draft: &DraftShipment) -> Self {
        match &draft.delivery {
            Some(d) => Self {
                pickup_address: d.pickup_address.clone(),
                delivery_address: d.delivery_address.clone(),
                recipient_name: d.recipient_name.clone(),
                recipient_phone: d.recipient_phone.clone(),
            },
            None => Self::default(),
        }
    }

    fn details(&self) -> DeliveryDetails {
        DeliveryDetails {
            pickup_address: self.pickup_address.trim().to_string(),
            delivery_address: self.delivery_address.trim().to_string(),
            recipient_name: self.recipient_name.trim().to_string(),
            recipient_phone: self.recipient_phone.trim().to_string(),
        }
    }
}

#[async_trait]
impl StepForm for DeliveryForm {
    const STEP: WizardStep = WizardStep::Delivery;

    fn validate(&self, _draft: &DraftShipment) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let required = [
            ("pickupAddress", &self.pickup_address, "Enter the pickup address"),
            ("deliveryAddress", &self.delivery_address, "Enter the delivery address"),
            ("recipientName", &self.recipient_name, "Enter the recipient's name"),
            ("recipientPhone", &self.recipient_phone, "Enter the recipient's phone number"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.add(field, message);
            }
        }
        errors.into_result()
    }

    fn is_confirmed(&self, draft: &DraftShipment) -> bool {
        draft.delivery.as_ref() == Some(&self.details())
    }

    async fn send(
        &self,
        api: &dyn ShipmentService,
        draft: &DraftShipment,
    ) -> Result<DraftShipment, WizardError> {
        let id = require_id(draft)?;
        let update = ShipmentUpdate::Delivery {
            delivery: self.details(),
        };
        Ok(api.update_shipment(id, &update).await?)
    }
}
