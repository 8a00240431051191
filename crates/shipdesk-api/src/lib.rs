//! # shipdesk-api
//!
//! Thin client for the remote Shipment Service. Every wizard step maps to
//! exactly one call on [`ShipmentService`]; [`HttpShipmentService`] is the
//! bearer-authenticated `reqwest` implementation.

pub mod config;
pub mod error;
pub mod http;
pub mod requests;
pub mod service;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use config::ApiConfig;
pub use error::{ApiError, Result};
pub use http::HttpShipmentService;
pub use requests::{PickupTimeRequest, ShipmentDetails, ShipmentUpdate};
pub use service::ShipmentService;
