//! Photo selection for step 3: gallery files and camera captures.
//!
//! Picked photos stay local until [`super::wizard::submit_photos`] uploads
//! them. The selection never holds more than four.

use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use shipdesk_shared::constants::MAX_PHOTOS;
use shipdesk_shared::{AcquisitionMethod, PhotoFile};
use shipdesk_wizard::camera::{self, CameraDevice};

use crate::state::{lock, SharedState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSummary {
    /// Photos accepted by this call.
    pub added: usize,
    pub file_names: Vec<String>,
    pub remaining: usize,
}

fn summary(state: &SharedState, added: usize) -> Result<PhotoSummary, String> {
    let guard = lock(state)?;
    let selection = guard.photos.selection();
    Ok(PhotoSummary {
        added,
        file_names: selection
            .photos()
            .iter()
            .map(|p| p.file_name.clone())
            .collect(),
        remaining: selection.remaining(),
    })
}

fn content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Add photos chosen from the gallery. Files past the cap are ignored.
pub async fn add_gallery_photos(
    state: &SharedState,
    paths: Vec<String>,
) -> Result<PhotoSummary, String> {
    let room = lock(state)?.photos.selection().remaining();

    let mut photos = Vec::new();
    for file_path in paths.iter().take(room) {
        let path = Path::new(file_path);
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("photo")
            .to_string();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| format!("Failed to read {file_name}: {e}"))?;

        photos.push(PhotoFile::new(
            file_name,
            content_type(path),
            bytes,
            AcquisitionMethod::Gallery,
        ));
    }

    if paths.len() > room {
        warn!(
            picked = paths.len(),
            room,
            max = MAX_PHOTOS,
            "photo selection truncated"
        );
    }

    let added = lock(state)?.photos.add_photos(photos);
    info!(added, "Gallery photos added");
    summary(state, added)
}

/// Take one photo with `device`. The camera is released before this returns.
pub async fn capture_photo<D: CameraDevice>(
    state: &SharedState,
    device: &D,
) -> Result<PhotoSummary, String> {
    if lock(state)?.photos.selection().is_full() {
        return Err(format!("You can add at most {MAX_PHOTOS} photos"));
    }

    let photo = camera::capture_photo(device)
        .await
        .map_err(|e| e.user_message().to_string())?;

    let added = lock(state)?.photos.add_photos([photo]);
    info!(added, "Camera photo added");
    summary(state, added)
}

pub fn remove_photo(state: &SharedState, index: usize) -> Result<PhotoSummary, String> {
    let removed = lock(state)?.photos.remove_photo(index);
    if removed.is_none() {
        return Err(format!("No photo at position {}", index + 1));
    }
    summary(state, 0)
}

pub fn list_photos(state: &SharedState) -> Result<PhotoSummary, String> {
    summary(state, 0)
}
