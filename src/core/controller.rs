use crate::core::{registry, verifier};
use crate::domain::model::{
    BrandEntry, ImagePreview, QrPreview, ScanMode, ScanPayload, ScanSource, VerificationResult,
};
use crate::utils::error::{QrAuthError, Result};

/// All transient state of one verification session.
///
/// Every mutation goes through a named transition below; a result that no
/// longer matches the selected brand or payload is dropped.
#[derive(Debug, Default)]
pub struct VerificationController {
    selected_brand: Option<&'static BrandEntry>,
    payload: Option<ScanPayload>,
    mode: ScanMode,
    image_preview: Option<ImagePreview>,
    qr_preview: Option<QrPreview>,
    result: Option<VerificationResult>,
}

impl VerificationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_brand(&self) -> Option<&'static BrandEntry> {
        self.selected_brand
    }

    pub fn payload(&self) -> Option<&ScanPayload> {
        self.payload.as_ref()
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn image_preview(&self) -> Option<&ImagePreview> {
        self.image_preview.as_ref()
    }

    pub fn qr_preview(&self) -> Option<&QrPreview> {
        self.qr_preview.as_ref()
    }

    pub fn result(&self) -> Option<&VerificationResult> {
        self.result.as_ref()
    }

    /// Whether "check authenticity" is enabled.
    pub fn can_check(&self) -> bool {
        self.selected_brand.is_some() && self.payload.as_ref().is_some_and(|p| !p.text.is_empty())
    }

    /// Whether there is anything for "clear" to reset.
    pub fn can_clear(&self) -> bool {
        self.image_preview.is_some() || self.qr_preview.is_some() || self.payload.is_some()
    }

    pub fn select_brand(&mut self, name: &str) -> Result<&'static BrandEntry> {
        let brand = registry::resolve(name)?;
        let changed = self.selected_brand.map(|b| b.name) != Some(brand.name);
        if changed && self.result.take().is_some() {
            tracing::debug!("Brand changed to {}, dropping previous verdict", brand.name);
        }
        self.selected_brand = Some(brand);
        Ok(brand)
    }

    /// Direct entry of a payload, bypassing the decoder.
    pub fn set_payload(&mut self, payload: ScanPayload) {
        self.result = None;
        self.qr_preview = Some(QrPreview {
            source: payload.source,
            data: payload.text.clone(),
        });
        self.payload = Some(payload);
    }

    fn begin(&mut self, next: ScanMode) -> Result<()> {
        if self.mode != ScanMode::Idle {
            return Err(QrAuthError::ScanInProgress {
                mode: self.mode.to_string(),
            });
        }
        self.mode = next;
        Ok(())
    }

    pub fn begin_camera_scan(&mut self) -> Result<()> {
        self.begin(ScanMode::Scanning)?;
        self.result = None;
        tracing::debug!("idle -> scanning");
        Ok(())
    }

    pub fn camera_scan_found(&mut self, text: String) {
        if self.mode != ScanMode::Scanning {
            tracing::warn!("Ignoring camera result while {}", self.mode);
            return;
        }
        self.mode = ScanMode::Idle;
        self.image_preview = None;
        self.set_payload(ScanPayload::new(text, ScanSource::Camera));
        tracing::debug!("scanning -> idle (payload stored)");
    }

    /// User stop, stream end or camera error.
    pub fn camera_scan_ended(&mut self) {
        if self.mode == ScanMode::Scanning {
            self.mode = ScanMode::Idle;
            tracing::debug!("scanning -> idle");
        }
    }

    /// Shows the picked image immediately, before decoding finishes.
    pub fn begin_upload(&mut self, preview: ImagePreview) -> Result<()> {
        self.begin(ScanMode::Decoding)?;
        self.image_preview = Some(preview);
        tracing::debug!("idle -> decoding");
        Ok(())
    }

    pub fn upload_decoded(&mut self, text: String) {
        if self.mode != ScanMode::Decoding {
            tracing::warn!("Ignoring upload result while {}", self.mode);
            return;
        }
        self.mode = ScanMode::Idle;
        self.set_payload(ScanPayload::new(text, ScanSource::Upload));
        tracing::debug!("decoding -> idle (payload stored)");
    }

    pub fn upload_failed(&mut self) {
        if self.mode == ScanMode::Decoding {
            self.mode = ScanMode::Idle;
        }
        self.image_preview = None;
        tracing::debug!("decoding -> idle (preview cleared)");
    }

    pub fn check_authenticity(&mut self) -> Result<&VerificationResult> {
        let (brand, payload) = match (self.selected_brand, self.payload.as_ref()) {
            (Some(brand), Some(payload)) if !payload.text.is_empty() => (brand, payload),
            _ => return Err(QrAuthError::MissingInput),
        };

        let result = verifier::verify(brand, &payload.text);
        Ok(&*self.result.insert(result))
    }

    /// Resets payload, previews and verdict. The brand stays selected.
    pub fn clear(&mut self) {
        self.payload = None;
        self.image_preview = None;
        self.qr_preview = None;
        self.result = None;
        tracing::debug!("Cleared scanned QR code");
    }
}
