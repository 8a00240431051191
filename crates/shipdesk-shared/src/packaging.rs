//! Package-type options offered for a service type.
//!
//! This is a display-time filter only; the backend keeps its own rules.

use crate::types::{PackageType, ServiceType};

/// Package types selectable for `service_type`, in display order.
///
/// Air freight only ships parcels; sea freight ships anything but parcels;
/// every other service type offers the full set.
pub fn allowed_package_types(service_type: &ServiceType) -> Vec<PackageType> {
    match service_type {
        ServiceType::Airfreight => vec![PackageType::Parcel],
        ServiceType::Seafreight => PackageType::ALL
            .into_iter()
            .filter(|t| *t != PackageType::Parcel)
            .collect(),
        ServiceType::Other(_) => PackageType::ALL.to_vec(),
    }
}

pub fn is_package_type_allowed(service_type: &ServiceType, package_type: PackageType) -> bool {
    allowed_package_types(service_type).contains(&package_type)
}
