//! # shipdesk-wizard
//!
//! The shipment creation/editing wizard: five steps (details, delivery,
//! photos, pickup, dimensions), each bound to one Shipment Service call, with
//! progress persisted to the Local Draft Store after every confirmed update.
//!
//! [`Wizard`] owns the step state machine; the forms in [`steps`] validate
//! input and issue the calls; [`camera`] captures photos without leaking the
//! camera stream.

pub mod camera;
pub mod controller;
pub mod error;
pub mod step;
pub mod steps;

pub use controller::{Prepared, SubmitTicket, Wizard};
pub use error::WizardError;
pub use step::{Transition, WizardStep};
pub use steps::{DeliveryForm, DetailsForm, DimensionsForm, PhotosForm, PickupForm, StepForm};
