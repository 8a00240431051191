//! Request bodies sent to the Shipment Service.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use shipdesk_shared::{DeliveryDetails, PackageType, ServiceType};

/// Package details set by the first step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDetails {
    pub service_type: ServiceType,
    pub package_type: PackageType,
    pub package_description: String,
    pub fragile: bool,
}

/// Partial update of an existing shipment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ShipmentUpdate {
    Details(ShipmentDetails),
    Delivery { delivery: DeliveryDetails },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PickupTimeRequest {
    pub scheduled_pickup_time: DateTime<FixedOffset>,
}
