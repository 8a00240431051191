use async_trait::async_trait;

use shipdesk_api::{ShipmentDetails, ShipmentService, ShipmentUpdate};
use shipdesk_shared::constants::MIN_DESCRIPTION_CHARS;
use shipdesk_shared::packaging::{allowed_package_types, is_package_type_allowed};
use shipdesk_shared::{DraftShipment, PackageType, ServiceType, ValidationErrors};

use super::StepForm;
use crate::error::WizardError;
use crate::step::WizardStep;

/// Step 1: package type, description and fragility.
///
/// Submitting creates the shipment when the draft has no id yet, and updates
/// it otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailsForm {
    pub package_type: Option<PackageType>,
    pub package_description: String,
    pub fragile: bool,
}

impl DetailsForm {
    pub fn from_draft(draft: &DraftShipment) -> Self {
        let options = allowed_package_types(&draft.service_type);
        let package_type = match (draft.package_type, options.as_slice()) {
            (Some(t), _) => Some(t),
            (None, [only]) => Some(*only),
            (None, _) => None,
        };

        Self {
            package_type,
            package_description: draft.package_description.clone(),
            fragile: draft.fragile,
        }
    }

    /// Package types to display for the draft's service type.
    pub fn package_type_options(draft: &DraftShipment) -> Vec<PackageType> {
        allowed_package_types(&draft.service_type)
    }

    /// Whether the description input is shown at all.
    pub fn description_editable(service_type: &ServiceType) -> bool {
        service_type.fixed_description().is_none()
    }

    fn description_for(&self, service_type: &ServiceType) -> String {
        match service_type.fixed_description() {
            Some(fixed) => fixed.to_string(),
            None => self.package_description.trim().to_string(),
        }
    }

    fn details(&self, draft: &DraftShipment) -> Result<ShipmentDetails, ValidationErrors> {
        let package_type = self
            .package_type
            .ok_or_else(|| ValidationErrors::single("packageType", "Select a package type"))?;

        Ok(ShipmentDetails {
            service_type: draft.service_type.clone(),
            package_type,
            package_description: self.description_for(&draft.service_type),
            fragile: self.fragile,
        })
    }
}

#[async_trait]
impl StepForm for DetailsForm {
    const STEP: WizardStep = WizardStep::Details;

    fn validate(&self, draft: &DraftShipment) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match self.package_type {
            None => errors.add("packageType", "Select a package type"),
            Some(t) if !is_package_type_allowed(&draft.service_type, t) => errors.add(
                "packageType",
                format!("{t} is not available for {}", draft.service_type),
            ),
            Some(_) => {}
        }

        if Self::description_editable(&draft.service_type)
            && self.package_description.trim().chars().count() < MIN_DESCRIPTION_CHARS
        {
            errors.add(
                "packageDescription",
                format!("Description must be at least {MIN_DESCRIPTION_CHARS} characters"),
            );
        }

        errors.into_result()
    }

    fn is_confirmed(&self, draft: &DraftShipment) -> bool {
        draft.is_created()
            && draft.package_type.is_some()
            && draft.package_type == self.package_type
            && draft.package_description == self.description_for(&draft.service_type)
            && draft.fragile == self.fragile
    }

    async fn send(
        &self,
        api: &dyn ShipmentService,
        draft: &DraftShipment,
    ) -> Result<DraftShipment, WizardError> {
        let details = self.details(draft)?;
        let saved = match &draft.id {
            None => api.create_shipment(&details).await?,
            Some(id) => {
                api.update_shipment(id, &ShipmentUpdate::Details(details))
                    .await?
            }
        };
        Ok(saved)
    }
}
