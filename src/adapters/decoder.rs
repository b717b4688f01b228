use crate::domain::model::{Frame, ImageUpload};
use crate::domain::ports::QrDecoder;
use crate::utils::error::{QrAuthError, Result};
use async_trait::async_trait;

/// QR decoding backed by `rqrr`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RqrrDecoder;

impl RqrrDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes the first readable grid in the frame.
    fn decode_luma(frame: &Frame) -> std::result::Result<String, String> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err("empty frame".to_string());
        }

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            frame.width() as usize,
            frame.height() as usize,
            |x, y| frame.pixel(x as u32, y as u32),
        );
        let grids = prepared.detect_grids();
        if grids.is_empty() {
            return Err("no QR code found".to_string());
        }

        let mut last_error = String::new();
        for grid in grids {
            match grid.decode() {
                Ok((_meta, content)) => return Ok(content),
                Err(e) => last_error = format!("{:?}", e),
            }
        }
        Err(format!("QR code unreadable: {}", last_error))
    }
}

/// Converts any supported image format into a grayscale frame.
pub fn frame_from_image_bytes(bytes: &[u8]) -> Result<Frame> {
    let gray = image::load_from_memory(bytes)?.to_luma8();
    Frame::new(gray.width(), gray.height(), gray.into_raw())
}

#[async_trait]
impl QrDecoder for RqrrDecoder {
    fn decode_frame(&self, frame: &Frame) -> Option<String> {
        Self::decode_luma(frame).ok()
    }

    async fn decode_image(&self, image: &ImageUpload) -> Result<String> {
        let frame = frame_from_image_bytes(&image.bytes)?;
        tracing::debug!(
            "Decoding {} ({}x{})",
            image.name,
            frame.width(),
            frame.height()
        );
        Self::decode_luma(&frame).map_err(|message| QrAuthError::DecodeFailed { message })
    }
}
