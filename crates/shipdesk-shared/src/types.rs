use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::AIRFREIGHT_DESCRIPTION;

// Server-assigned shipment identifier. Opaque to this layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ShipmentId(pub String);

impl ShipmentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShipmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level shipment category. Unknown categories are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServiceType {
    Airfreight,
    Seafreight,
    Other(String),
}

impl ServiceType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Airfreight => "airfreight",
            Self::Seafreight => "seafreight",
            Self::Other(s) => s,
        }
    }

    /// Air freight descriptions are fixed and never typed by the user.
    pub fn fixed_description(&self) -> Option<&'static str> {
        match self {
            Self::Airfreight => Some(AIRFREIGHT_DESCRIPTION),
            _ => None,
        }
    }
}

impl From<String> for ServiceType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "airfreight" => Self::Airfreight,
            "seafreight" => Self::Seafreight,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for ServiceType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<ServiceType> for String {
    fn from(t: ServiceType) -> Self {
        match t {
            ServiceType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageType {
    Items,
    Parcel,
    Pallet,
    Container,
}

impl PackageType {
    /// Every package type, in display order.
    pub const ALL: [PackageType; 4] = [
        PackageType::Items,
        PackageType::Parcel,
        PackageType::Pallet,
        PackageType::Container,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Items => "items",
            Self::Parcel => "parcel",
            Self::Pallet => "pallet",
            Self::Container => "container",
        }
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown package type: {s}"))
    }
}

/// How a photo was acquired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcquisitionMethod {
    Camera,
    Gallery,
}

/// A photo already attached to the shipment on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<AcquisitionMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub pickup_address: String,
    pub delivery_address: String,
    pub recipient_name: String,
    pub recipient_phone: String,
}

/// Width/height/length triple. Units are interpreted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub length: f64,
}

/// The shipment record under construction.
///
/// The server response is authoritative: the whole object is replaced after
/// every successful step, and fields this layer does not model are carried
/// through `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftShipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ShipmentId>,
    pub service_type: ServiceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<PackageType>,
    #[serde(default)]
    pub package_description: String,
    #[serde(default)]
    pub fragile: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryDetails>,
    #[serde(default)]
    pub images: Vec<PhotoRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_pickup_time: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DraftShipment {
    /// A fresh, unsaved draft for the given service type.
    pub fn new(service_type: ServiceType) -> Self {
        Self {
            id: None,
            service_type,
            package_type: None,
            package_description: String::new(),
            fragile: false,
            delivery: None,
            images: Vec::new(),
            scheduled_pickup_time: None,
            dimensions: None,
            extra: serde_json::Map::new(),
        }
    }

    pub fn is_created(&self) -> bool {
        self.id.is_some()
    }
}
