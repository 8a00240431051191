use async_trait::async_trait;

use shipdesk_shared::{Dimensions, DraftShipment, PhotoFile, ShipmentId};

use crate::error::Result;
use crate::requests::{PickupTimeRequest, ShipmentDetails, ShipmentUpdate};

/// The remote Shipment Service.
///
/// Every successful call returns the full, authoritative draft.
#[async_trait]
pub trait ShipmentService: Send + Sync {
    /// Create a shipment; the response carries the newly minted id.
    async fn create_shipment(&self, details: &ShipmentDetails) -> Result<DraftShipment>;

    async fn update_shipment(
        &self,
        id: &ShipmentId,
        update: &ShipmentUpdate,
    ) -> Result<DraftShipment>;

    async fn update_photos(&self, id: &ShipmentId, photos: &[PhotoFile]) -> Result<DraftShipment>;

    async fn update_pickup_time(
        &self,
        id: &ShipmentId,
        request: &PickupTimeRequest,
    ) -> Result<DraftShipment>;

    async fn update_dimensions(
        &self,
        id: &ShipmentId,
        dimensions: &Dimensions,
    ) -> Result<DraftShipment>;

    /// Every shipment visible to the caller; filtering happens client-side.
    async fn list_shipments(&self) -> Result<Vec<DraftShipment>>;
}
