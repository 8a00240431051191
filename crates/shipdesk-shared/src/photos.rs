//! Locally selected photos and the four-photo cap.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_PHOTOS;
use crate::types::AcquisitionMethod;

/// A photo picked from the gallery or captured from the camera, not yet
/// uploaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoFile {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Bytes,
    pub method: AcquisitionMethod,
    pub taken_at: DateTime<Utc>,
}

impl PhotoFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
        method: AcquisitionMethod,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
            method,
            taken_at: Utc::now(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Ordered photo selection, never longer than [`MAX_PHOTOS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoSelection {
    photos: Vec<PhotoFile>,
}

impl PhotoSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append as many of `incoming` as still fit, in order; the rest are
    /// dropped. Returns how many were added.
    pub fn add<I>(&mut self, incoming: I) -> usize
    where
        I: IntoIterator<Item = PhotoFile>,
    {
        let before = self.photos.len();
        self.photos.extend(incoming.into_iter().take(self.remaining()));
        self.photos.len() - before
    }

    pub fn remove(&mut self, index: usize) -> Option<PhotoFile> {
        (index < self.photos.len()).then(|| self.photos.remove(index))
    }

    pub fn remaining(&self) -> usize {
        MAX_PHOTOS.saturating_sub(self.photos.len())
    }

    pub fn is_full(&self) -> bool {
        self.remaining() == 0
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photos(&self) -> &[PhotoFile] {
        &self.photos
    }

    pub fn clear(&mut self) {
        self.photos.clear();
    }
}
