use async_trait::async_trait;

use shipdesk_api::ShipmentService;
use shipdesk_shared::{DraftShipment, PhotoFile, PhotoSelection, ValidationErrors};

use super::{require_id, StepForm};
use crate::error::WizardError;
use crate::step::WizardStep;

/// Step 3: up to four photos, from the camera or the gallery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotosForm {
    selection: PhotoSelection,
}

impl PhotosForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_photos<I>(photos: I) -> Self
    where
        I: IntoIterator<Item = PhotoFile>,
    {
        let mut form = Self::new();
        form.add_photos(photos);
        form
    }

    /// Add photos, keeping only as many as fit under the cap.
    pub fn add_photos<I>(&mut self, photos: I) -> usize
    where
        I: IntoIterator<Item = PhotoFile>,
    {
        let added = self.selection.add(photos);
        tracing::debug!(added, total = self.selection.len(), "photos added");
        added
    }

    pub fn remove_photo(&mut self, index: usize) -> Option<PhotoFile> {
        self.selection.remove(index)
    }

    pub fn selection(&self) -> &PhotoSelection {
        &self.selection
    }
}

#[async_trait]
impl StepForm for PhotosForm {
    const STEP: WizardStep = WizardStep::Photos;

    fn validate(&self, draft: &DraftShipment) -> Result<(), ValidationErrors> {
        if self.selection.is_empty() && draft.images.is_empty() {
            return Err(ValidationErrors::single("images", "Add at least one photo"));
        }
        Ok(())
    }

    // Nothing newly picked and photos already on the server: keep them.
    fn is_confirmed(&self, draft: &DraftShipment) -> bool {
        self.selection.is_empty() && !draft.images.is_empty()
    }

    async fn send(
        &self,
        api: &dyn ShipmentService,
        draft: &DraftShipment,
    ) -> Result<DraftShipment, WizardError> {
        let id = require_id(draft)?;
        Ok(api.update_photos(id, self.selection.photos()).await?)
    }
}
