pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

#[cfg(feature = "decoder")]
pub use adapters::{FrameDirCamera, RqrrDecoder};

pub use adapters::LocalImageStore;
pub use app::AuthenticatorSession;
pub use config::AppConfig;
pub use crate::core::{controller::VerificationController, extract::extract_domain, verifier::verify};
pub use domain::model::{BrandEntry, ScanPayload, ScanSource, VerificationResult, VerificationStatus};
pub use utils::error::{QrAuthError, Result};
