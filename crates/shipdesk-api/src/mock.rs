//! In-memory Shipment Service used by tests.
//!
//! Behaves like a well-mannered backend: ids are minted on create, updates
//! return the full draft, and every call is recorded so tests can assert on
//! exactly what went over the wire.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use shipdesk_shared::{Dimensions, DraftShipment, PhotoFile, PhotoRef, ShipmentId};

use crate::error::{ApiError, Result};
use crate::requests::{PickupTimeRequest, ShipmentDetails, ShipmentUpdate};
use crate::service::ShipmentService;

#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Create(ShipmentDetails),
    Update(ShipmentId, ShipmentUpdate),
    Photos(ShipmentId, Vec<String>),
    PickupTime(ShipmentId, PickupTimeRequest),
    Dimensions(ShipmentId, Dimensions),
    List,
}

#[derive(Default)]
struct Inner {
    shipments: Vec<DraftShipment>,
    calls: Vec<MockCall>,
    fail_next: Option<u16>,
    next_id: u32,
}

#[derive(Default)]
pub struct MockShipmentService {
    inner: Mutex<Inner>,
    held: AtomicBool,
    release: Notify,
}

impl MockShipmentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the backend, e.g. for the edit flow.
    pub fn with_shipments(shipments: Vec<DraftShipment>) -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().shipments = shipments;
        mock
    }

    /// Make the next call fail with `status`.
    pub fn fail_next(&self, status: u16) {
        self.inner.lock().unwrap().fail_next = Some(status);
    }

    /// Keep calls pending until [`MockShipmentService::release`].
    pub fn hold(&self) {
        self.held.store(true, Ordering::SeqCst);
    }

    pub fn release(&self) {
        self.held.store(false, Ordering::SeqCst);
        self.release.notify_waiters();
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    pub fn shipment(&self, id: &ShipmentId) -> Option<DraftShipment> {
        self.inner
            .lock()
            .unwrap()
            .shipments
            .iter()
            .find(|s| s.id.as_ref() == Some(id))
            .cloned()
    }

    async fn enter(&self, call: MockCall) -> Result<()> {
        let fail = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(call);
            inner.fail_next.take()
        };

        if self.held.load(Ordering::SeqCst) {
            self.release.notified().await;
        }

        match fail {
            Some(status) => Err(ApiError::Status {
                status,
                body: "mock failure".into(),
            }),
            None => Ok(()),
        }
    }

    fn modify<F>(&self, id: &ShipmentId, f: F) -> Result<DraftShipment>
    where
        F: FnOnce(&mut DraftShipment),
    {
        let mut inner = self.inner.lock().unwrap();
        let shipment = inner
            .shipments
            .iter_mut()
            .find(|s| s.id.as_ref() == Some(id))
            .ok_or_else(|| ApiError::Status {
                status: 404,
                body: format!("shipment {id} not found"),
            })?;
        f(shipment);
        Ok(shipment.clone())
    }
}

#[async_trait]
impl ShipmentService for MockShipmentService {
    async fn create_shipment(&self, details: &ShipmentDetails) -> Result<DraftShipment> {
        self.enter(MockCall::Create(details.clone())).await?;

        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let mut shipment = DraftShipment::new(details.service_type.clone());
        shipment.id = Some(ShipmentId::new(format!("shp-{}", inner.next_id)));
        shipment.package_type = Some(details.package_type);
        shipment.package_description = details.package_description.clone();
        shipment.fragile = details.fragile;
        shipment
            .extra
            .insert("status".into(), serde_json::json!("draft"));
        inner.shipments.push(shipment.clone());
        Ok(shipment)
    }

    async fn update_shipment(
        &self,
        id: &ShipmentId,
        update: &ShipmentUpdate,
    ) -> Result<DraftShipment> {
        self.enter(MockCall::Update(id.clone(), update.clone()))
            .await?;

        self.modify(id, |shipment| match update {
            ShipmentUpdate::Details(details) => {
                shipment.package_type = Some(details.package_type);
                shipment.package_description = details.package_description.clone();
                shipment.fragile = details.fragile;
            }
            ShipmentUpdate::Delivery { delivery } => {
                shipment.delivery = Some(delivery.clone());
            }
        })
    }

    async fn update_photos(&self, id: &ShipmentId, photos: &[PhotoFile]) -> Result<DraftShipment> {
        let names = photos.iter().map(|p| p.file_name.clone()).collect();
        self.enter(MockCall::Photos(id.clone(), names)).await?;

        self.modify(id, |shipment| {
            shipment.images = photos
                .iter()
                .map(|p| PhotoRef {
                    url: format!("https://files.test/{id}/{}", p.file_name),
                    method: Some(p.method),
                    taken_at: Some(p.taken_at),
                })
                .collect();
        })
    }

    async fn update_pickup_time(
        &self,
        id: &ShipmentId,
        request: &PickupTimeRequest,
    ) -> Result<DraftShipment> {
        self.enter(MockCall::PickupTime(id.clone(), request.clone()))
            .await?;

        self.modify(id, |shipment| {
            shipment.scheduled_pickup_time = Some(request.scheduled_pickup_time);
        })
    }

    async fn update_dimensions(
        &self,
        id: &ShipmentId,
        dimensions: &Dimensions,
    ) -> Result<DraftShipment> {
        self.enter(MockCall::Dimensions(id.clone(), *dimensions))
            .await?;

        self.modify(id, |shipment| {
            shipment.dimensions = Some(*dimensions);
        })
    }

    async fn list_shipments(&self) -> Result<Vec<DraftShipment>> {
        self.enter(MockCall::List).await?;
        Ok(self.inner.lock().unwrap().shipments.clone())
    }
}
