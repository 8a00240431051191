use async_trait::async_trait;

use shipdesk_api::ShipmentService;
use shipdesk_shared::{Dimensions, DraftShipment, ValidationErrors};

use super::{require_id, StepForm};
use crate::error::WizardError;
use crate::step::WizardStep;

/// Step 5: width, height and length.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DimensionsForm {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub length: Option<f64>,
}

impl DimensionsForm {
    pub fn new(width: f64, height: f64, length: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            length: Some(length),
        }
    }

    pub fn from_draft(draft: &DraftShipment) -> Self {
        match draft.dimensions {
            Some(d) => Self::new(d.width, d.height, d.length),
            None => Self::default(),
        }
    }

    fn dimensions(&self) -> Option<Dimensions> {
        Some(Dimensions {
            width: self.width?,
            height: self.height?,
            length: self.length?,
        })
    }
}

#[async_trait]
impl StepForm for DimensionsForm {
    const STEP: WizardStep = WizardStep::Dimensions;

    fn validate(&self, _draft: &DraftShipment) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, label, value) in [
            ("width", "Width", self.width),
            ("height", "Height", self.height),
            ("length", "Length", self.length),
        ] {
            match value {
                None => errors.add(field, format!("{label} is required")),
                Some(v) if !v.is_finite() || v <= 0.0 => {
                    errors.add(field, format!("{label} must be a positive number"))
                }
                Some(_) => {}
            }
        }
        errors.into_result()
    }

    fn is_confirmed(&self, draft: &DraftShipment) -> bool {
        draft.dimensions.is_some() && draft.dimensions == self.dimensions()
    }

    async fn send(
        &self,
        api: &dyn ShipmentService,
        draft: &DraftShipment,
    ) -> Result<DraftShipment, WizardError> {
        let id = require_id(draft)?;
        let dimensions = self.dimensions().ok_or_else(|| {
            ValidationErrors::single("dimensions", "Enter width, height and length")
        })?;
        Ok(api.update_dimensions(id, &dimensions).await?)
    }
}
