use crate::utils::error::{QrAuthError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A brand and the only domain its genuine QR codes may point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BrandEntry {
    pub name: &'static str,
    pub domain: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanSource {
    Camera,
    Upload,
    /// Typed in rather than decoded.
    Manual,
}

impl fmt::Display for ScanSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Camera => write!(f, "camera"),
            Self::Upload => write!(f, "upload"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Raw text decoded from a QR code. Not necessarily a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanPayload {
    pub text: String,
    pub source: ScanSource,
}

impl ScanPayload {
    pub fn new(text: impl Into<String>, source: ScanSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationStatus {
    Authenticated,
    Unauthenticated,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated => write!(f, "Authenticated"),
            Self::Unauthenticated => write!(f, "Unauthenticated"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    MalformedUrl,
    DomainMismatch,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedUrl => write!(f, "malformed URL"),
            Self::DomainMismatch => write!(f, "domain does not belong to the brand"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub is_valid: bool,
    pub status: VerificationStatus,
    pub reason: Option<RejectionReason>,
    pub brand: String,
    pub expected_domain: String,
    pub actual_domain: Option<String>,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanMode {
    #[default]
    Idle,
    Scanning,
    Decoding,
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Scanning => write!(f, "scanning"),
            Self::Decoding => write!(f, "decoding"),
        }
    }
}

/// The uploaded image, shown as soon as it is picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePreview {
    pub name: String,
    pub size_bytes: usize,
}

/// A detected code and where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPreview {
    pub source: ScanSource,
    pub data: String,
}

impl QrPreview {
    pub fn caption(&self) -> &'static str {
        match self.source {
            ScanSource::Camera => "Scanned with Camera",
            ScanSource::Upload => "QR Code Detected",
            ScanSource::Manual => "Entered Manually",
        }
    }
}

/// Grayscale frame handed to the decoder, one byte per pixel, row major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    luma: Vec<u8>,
}

impl Frame {
    /// Fails unless `luma` holds exactly `width * height` pixels.
    pub fn new(width: u32, height: u32, luma: Vec<u8>) -> Result<Self> {
        let expected = (width as usize) * (height as usize);
        if luma.len() != expected {
            return Err(QrAuthError::InvalidFrame {
                width,
                height,
                actual: luma.len(),
            });
        }
        Ok(Self {
            width,
            height,
            luma,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn luma(&self) -> &[u8] {
        &self.luma
    }

    /// Panics when `(x, y)` lies outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.luma[(y as usize) * (self.width as usize) + x as usize]
    }
}

/// A user supplied image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn preview(&self) -> ImagePreview {
        ImagePreview {
            name: self.name.clone(),
            size_bytes: self.bytes.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    #[default]
    Environment,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CameraConstraints {
    pub facing_mode: FacingMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rejects_short_buffer() {
        let err = Frame::new(2, 2, vec![0, 0, 0]).unwrap_err();
        assert!(matches!(
            err,
            QrAuthError::InvalidFrame {
                width: 2,
                height: 2,
                actual: 3
            }
        ));
        assert!(Frame::new(2, 2, vec![0; 5]).is_err());
    }

    #[test]
    fn test_frame_pixels_are_row_major() {
        let frame = Frame::new(2, 2, vec![10, 20, 30, 40]).unwrap();
        assert_eq!(frame.pixel(1, 0), 20);
        assert_eq!(frame.pixel(0, 1), 30);
        assert_eq!(frame.luma().len(), 4);
    }

    #[test]
    fn test_empty_frame_is_allowed() {
        let frame = Frame::new(0, 0, vec![]).unwrap();
        assert_eq!(frame.width(), 0);
    }
}
