//! Single-frame photo capture.
//!
//! The camera stream is held only for the duration of one capture: every
//! track is stopped as soon as the frame is grabbed, whether or not the grab
//! succeeded.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use shipdesk_shared::{AcquisitionMethod, PhotoFile};

#[derive(Error, Debug)]
pub enum CameraError {
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("No camera available")]
    NoDevice,

    #[error("Capture failed: {0}")]
    Capture(String),
}

impl CameraError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CameraError::PermissionDenied => {
                "Camera access was denied. You can still choose photos from your gallery."
            }
            CameraError::NoDevice => {
                "No camera is available. You can still choose photos from your gallery."
            }
            CameraError::Capture(_) => "Could not take the photo. Please try again.",
        }
    }
}

/// One encoded still image.
#[derive(Debug, Clone)]
pub struct Frame {
    pub bytes: Bytes,
    pub content_type: String,
}

/// An open camera stream.
pub trait MediaStream: Send {
    fn capture_frame(&mut self) -> Result<Frame, CameraError>;

    /// Stop every track so the device is released.
    fn stop_tracks(&mut self);
}

#[async_trait]
pub trait CameraDevice: Send + Sync {
    type Stream: MediaStream;

    async fn open(&self) -> Result<Self::Stream, CameraError>;
}

struct ActiveStream<S: MediaStream>(S);

impl<S: MediaStream> Drop for ActiveStream<S> {
    fn drop(&mut self) {
        self.0.stop_tracks();
        debug!("camera tracks stopped");
    }
}

/// Open the camera, grab one frame, release the camera.
pub async fn capture_photo<D: CameraDevice>(device: &D) -> Result<PhotoFile, CameraError> {
    let stream = device.open().await.map_err(|e| {
        warn!(error = %e, "camera unavailable");
        e
    })?;

    let frame = {
        let mut active = ActiveStream(stream);
        active.0.capture_frame()
    }?;

    let extension = match frame.content_type.as_str() {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    };

    Ok(PhotoFile::new(
        format!("capture-{}.{extension}", Uuid::new_v4()),
        frame.content_type,
        frame.bytes,
        AcquisitionMethod::Camera,
    ))
}
