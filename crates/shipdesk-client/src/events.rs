//! Wizard events for the UI layer, and where each one navigates.

use serde::Serialize;
use shipdesk_wizard::{Transition, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum WizardEvent {
    #[serde(rename_all = "camelCase")]
    StepChanged {
        step: u8,
        title: &'static str,
        skipped: bool,
    },
    #[serde(rename_all = "camelCase")]
    Completed { shipment_id: Option<String> },
    LeftWizard,
}

/// Where the UI should go after an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "camelCase")]
pub enum Navigation {
    To(String),
    Back,
}

impl WizardEvent {
    pub fn entered(step: WizardStep) -> Self {
        Self::StepChanged {
            step: step.number(),
            title: step.title(),
            skipped: false,
        }
    }

    pub fn from_transition(transition: &Transition) -> Self {
        match transition {
            Transition::Moved(step) => Self::entered(*step),
            Transition::Skipped(step) => Self::StepChanged {
                step: step.number(),
                title: step.title(),
                skipped: true,
            },
            Transition::Completed(id) => Self::Completed {
                shipment_id: id.as_ref().map(|id| id.to_string()),
            },
            Transition::LeaveWizard => Self::LeftWizard,
        }
    }

    /// `None` while the wizard stays on screen.
    pub fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::StepChanged { .. } => None,
            Self::Completed {
                shipment_id: Some(id),
            } => Some(Navigation::To(format!("/shipments/{id}"))),
            Self::Completed { shipment_id: None } => Some(Navigation::To("/shipments".into())),
            Self::LeftWizard => Some(Navigation::Back),
        }
    }
}
