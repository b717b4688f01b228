use crate::core::controller::VerificationController;
use crate::core::scanner::{self, CameraSettings};
use crate::domain::model::{BrandEntry, ScanPayload, ScanSource, VerificationResult};
use crate::domain::ports::{Camera, ImageStore, QrDecoder};
use crate::utils::error::Result;
use std::future::Future;

/// One user's verification session: a controller wired to a decoder and an
/// image source.
pub struct AuthenticatorSession<D: QrDecoder, S: ImageStore> {
    controller: VerificationController,
    decoder: D,
    store: S,
}

impl<D: QrDecoder, S: ImageStore> AuthenticatorSession<D, S> {
    pub fn new(decoder: D, store: S) -> Self {
        Self {
            controller: VerificationController::new(),
            decoder,
            store,
        }
    }

    pub fn controller(&self) -> &VerificationController {
        &self.controller
    }

    pub fn select_brand(&mut self, name: &str) -> Result<&'static BrandEntry> {
        let brand = self.controller.select_brand(name)?;
        tracing::info!("🏷️ Brand selected: {} ({})", brand.name, brand.domain);
        Ok(brand)
    }

    pub fn check(&mut self) -> Result<VerificationResult> {
        self.controller.check_authenticity().cloned()
    }

    /// Verifies text that was decoded elsewhere.
    pub fn check_payload(&mut self, text: &str) -> Result<VerificationResult> {
        self.controller
            .set_payload(ScanPayload::new(text, ScanSource::Manual));
        self.check()
    }

    pub async fn scan_image(&mut self, path: &str) -> Result<ScanPayload> {
        let upload = self.store.read_image(path).await?;
        scanner::scan_upload(&mut self.controller, &self.decoder, upload).await
    }

    pub async fn scan_camera<C, F>(
        &mut self,
        camera: &C,
        settings: &CameraSettings,
        stop: F,
    ) -> Result<ScanPayload>
    where
        C: Camera,
        F: Future<Output = ()>,
    {
        scanner::scan_camera(&mut self.controller, camera, &self.decoder, settings, stop).await
    }

    pub fn clear(&mut self) {
        self.controller.clear();
    }
}
