use crate::domain::model::{CameraConstraints, Frame, ImageUpload};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The QR decoding collaborator.
#[async_trait]
pub trait QrDecoder: Send + Sync {
    /// Per-frame attempt. `None` is the normal outcome for most frames.
    fn decode_frame(&self, frame: &Frame) -> Option<String>;

    /// One-shot decode of a still image; errors when no code is found.
    async fn decode_image(&self, image: &ImageUpload) -> Result<String>;
}

/// An open camera feed. Dropping it without calling `stop` leaks the device,
/// so callers hold it through a guard.
#[async_trait]
pub trait VideoStream: Send {
    /// `Ok(None)` once the feed has ended.
    async fn next_frame(&mut self) -> Result<Option<Frame>>;

    fn stop(&mut self);
}

#[async_trait]
pub trait Camera: Send + Sync {
    type Stream: VideoStream;

    async fn open(&self, constraints: &CameraConstraints) -> Result<Self::Stream>;
}

pub trait ImageStore: Send + Sync {
    fn read_image(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<ImageUpload>> + Send;
}
