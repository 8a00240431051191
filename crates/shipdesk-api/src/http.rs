//! `reqwest` implementation of [`ShipmentService`].

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use shipdesk_shared::{Dimensions, DraftShipment, PhotoFile, ShipmentId};

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::requests::{PickupTimeRequest, ShipmentDetails, ShipmentUpdate};
use crate::service::ShipmentService;

/// Bearer-authenticated HTTP client for the Shipment Service.
#[derive(Clone, Debug)]
pub struct HttpShipmentService {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpShipmentService {
    pub fn new(config: &ApiConfig, token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ApiError::Unauthenticated);
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.bearer_auth(&self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), "Shipment Service rejected request");
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ShipmentService for HttpShipmentService {
    async fn create_shipment(&self, details: &ShipmentDetails) -> Result<DraftShipment> {
        debug!(service_type = %details.service_type, "creating shipment");
        let request = self.client.post(self.url("/shipments")).json(details);
        self.send(request).await
    }

    async fn update_shipment(
        &self,
        id: &ShipmentId,
        update: &ShipmentUpdate,
    ) -> Result<DraftShipment> {
        debug!(shipment_id = %id, "updating shipment");
        let request = self
            .client
            .put(self.url(&format!("/shipments/{id}")))
            .json(update);
        self.send(request).await
    }

    async fn update_photos(&self, id: &ShipmentId, photos: &[PhotoFile]) -> Result<DraftShipment> {
        debug!(shipment_id = %id, photos = photos.len(), "uploading photos");

        let mut form = Form::new().text("packageId", id.to_string());
        for photo in photos {
            let part = Part::bytes(photo.bytes.to_vec())
                .file_name(photo.file_name.clone())
                .mime_str(&photo.content_type)?;
            form = form.part("file", part);
        }

        let request = self
            .client
            .post(self.url("/shipments/photos"))
            .multipart(form);
        self.send(request).await
    }

    async fn update_pickup_time(
        &self,
        id: &ShipmentId,
        request: &PickupTimeRequest,
    ) -> Result<DraftShipment> {
        debug!(
            shipment_id = %id,
            at = %request.scheduled_pickup_time.to_rfc3339(),
            "setting pickup time"
        );
        let request = self
            .client
            .put(self.url(&format!("/shipments/{id}/pickup-time")))
            .json(request);
        self.send(request).await
    }

    async fn update_dimensions(
        &self,
        id: &ShipmentId,
        dimensions: &Dimensions,
    ) -> Result<DraftShipment> {
        debug!(shipment_id = %id, "setting dimensions");
        let request = self
            .client
            .put(self.url(&format!("/shipments/{id}/dimensions")))
            .json(dimensions);
        self.send(request).await
    }

    async fn list_shipments(&self) -> Result<Vec<DraftShipment>> {
        let request = self.client.get(self.url("/shipments"));
        self.send(request).await
    }
}
