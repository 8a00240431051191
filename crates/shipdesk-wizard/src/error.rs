use chrono::NaiveDate;
use thiserror::Error;

use shipdesk_api::ApiError;
use shipdesk_shared::{ShipmentId, ValidationErrors};
use shipdesk_store::StoreError;

use crate::camera::CameraError;
use crate::step::WizardStep;

#[derive(Error, Debug)]
pub enum WizardError {
    /// Local form validation failed; nothing was sent.
    #[error("Invalid form: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Shipment Service error: {0}")]
    Api(#[from] ApiError),

    #[error("Draft store error: {0}")]
    Store(#[from] StoreError),

    #[error("Camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("Cannot submit step {form} while on step {current}")]
    WrongStep {
        current: WizardStep,
        form: WizardStep,
    },

    #[error("A submission is already in progress")]
    AlreadySubmitting,

    #[error("The shipment has not been created yet")]
    MissingShipmentId,

    #[error("No draft shipment to resume")]
    NoDraft,

    #[error("Shipment {0} not found")]
    ShipmentNotFound(ShipmentId),

    #[error("Server answered with shipment {returned:?} while editing {expected}")]
    IdMismatch {
        expected: ShipmentId,
        returned: Option<ShipmentId>,
    },

    #[error("No valid 10:00 pickup time exists on {0}")]
    InvalidPickupTime(NaiveDate),

    /// The step was left before its request finished.
    #[error("Request cancelled")]
    Cancelled,
}

impl WizardError {
    /// Text for the inline banner of the current step.
    pub fn user_message(&self) -> String {
        match self {
            WizardError::Validation(errors) => errors.to_string(),
            WizardError::Api(e) => e.user_message().to_string(),
            WizardError::Camera(e) => e.user_message().to_string(),
            WizardError::MissingShipmentId => {
                "Save the package details before continuing.".to_string()
            }
            WizardError::AlreadySubmitting => "Still saving, please wait.".to_string(),
            WizardError::Cancelled => "The request was cancelled.".to_string(),
            WizardError::ShipmentNotFound(_) => "That shipment no longer exists.".to_string(),
            other => {
                tracing::error!(error = %other, "unexpected wizard error");
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}
