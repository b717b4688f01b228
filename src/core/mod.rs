pub mod controller;
pub mod extract;
pub mod registry;
pub mod scanner;
pub mod verifier;

pub use crate::domain::model::{BrandEntry, ScanPayload, VerificationResult};
pub use crate::domain::ports::{Camera, ImageStore, QrDecoder, VideoStream};
pub use crate::utils::error::Result;
