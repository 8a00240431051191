//! # shipdesk-shared
//!
//! Domain types and pure policy functions shared by every Shipdesk crate:
//! the draft shipment model, package-type filtering, pickup-date candidates
//! and the photo cap.

pub mod constants;
pub mod error;
pub mod packaging;
pub mod photos;
pub mod pickup;
pub mod types;

pub use error::{FieldError, ValidationErrors};
pub use photos::{PhotoFile, PhotoSelection};
pub use types::*;
