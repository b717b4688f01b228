use crate::core::controller::VerificationController;
use crate::domain::model::{CameraConstraints, ImageUpload, ScanPayload, ScanSource};
use crate::domain::ports::{Camera, QrDecoder, VideoStream};
use crate::utils::error::{QrAuthError, Result};
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct CameraSettings {
    pub constraints: CameraConstraints,
    /// Pause between two frames; zero feeds frames as fast as they arrive.
    pub frame_interval: Duration,
}

/// One camera session. Dropping it stops the stream, if one was opened, and
/// puts the controller back to idle, whichever way the scan ends.
struct CameraSession<'a, S: VideoStream> {
    controller: &'a mut VerificationController,
    stream: Option<S>,
}

impl<S: VideoStream> CameraSession<'_, S> {
    fn release(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            tracing::debug!("Camera stream released");
        }
    }
}

impl<S: VideoStream> Drop for CameraSession<'_, S> {
    fn drop(&mut self) {
        self.release();
        self.controller.camera_scan_ended();
    }
}

/// Upload mode: one decode attempt on a still image.
///
/// The preview is recorded before decoding; a failed decode clears it again
/// and is reported to the caller.
pub async fn scan_upload<D>(
    controller: &mut VerificationController,
    decoder: &D,
    upload: ImageUpload,
) -> Result<ScanPayload>
where
    D: QrDecoder + ?Sized,
{
    controller.begin_upload(upload.preview())?;
    tracing::info!("🔍 Decoding uploaded image {}", upload.name);

    match decoder.decode_image(&upload).await {
        Ok(text) => {
            tracing::info!("📷 QR code detected in {}", upload.name);
            controller.upload_decoded(text.clone());
            Ok(ScanPayload::new(text, ScanSource::Upload))
        }
        Err(e) => {
            tracing::warn!("Could not detect QR code in {}: {}", upload.name, e);
            controller.upload_failed();
            Err(e)
        }
    }
}

/// Camera mode: feeds frames to the decoder until the first hit.
///
/// Runs without a timeout. `stop` resolving ends the session with
/// [`QrAuthError::ScanCancelled`]; the stream is stopped on success, cancel
/// and error alike, and the controller is back to idle even when this future
/// is dropped mid-scan.
pub async fn scan_camera<C, D, F>(
    controller: &mut VerificationController,
    camera: &C,
    decoder: &D,
    settings: &CameraSettings,
    stop: F,
) -> Result<ScanPayload>
where
    C: Camera,
    D: QrDecoder + ?Sized,
    F: Future<Output = ()>,
{
    controller.begin_camera_scan()?;
    let mut session: CameraSession<'_, C::Stream> = CameraSession {
        controller,
        stream: None,
    };
    tokio::pin!(stop);

    // 等待相機權限時也要能取消
    let opened = tokio::select! {
        _ = &mut stop => {
            tracing::info!("⏹️ Scanning stopped before the camera opened");
            return Err(QrAuthError::ScanCancelled);
        }
        opened = camera.open(&settings.constraints) => opened,
    };
    let stream = match opened {
        Ok(stream) => stream,
        Err(e) => {
            tracing::error!("Could not access camera: {}", e);
            return Err(e);
        }
    };
    tracing::info!("🎥 Camera opened, scanning for a QR code");

    let stream = session.stream.insert(stream);
    let outcome = decode_until_found(stream, decoder, settings.frame_interval, &mut stop).await;
    session.release();

    let text = outcome?;
    session.controller.camera_scan_found(text.clone());
    Ok(ScanPayload::new(text, ScanSource::Camera))
}

async fn decode_until_found<S, D, F>(
    stream: &mut S,
    decoder: &D,
    frame_interval: Duration,
    mut stop: F,
) -> Result<String>
where
    S: VideoStream,
    D: QrDecoder + ?Sized,
    F: Future<Output = ()> + Unpin,
{
    let mut frames: u64 = 0;

    loop {
        let next = tokio::select! {
            _ = &mut stop => {
                tracing::info!("⏹️ Scanning stopped after {} frames", frames);
                return Err(QrAuthError::ScanCancelled);
            }
            frame = stream.next_frame() => frame?,
        };

        let Some(frame) = next else {
            return Err(QrAuthError::CameraUnavailable {
                message: format!("camera feed ended after {} frames", frames),
            });
        };
        frames += 1;

        if let Some(text) = decoder.decode_frame(&frame) {
            tracing::info!("📷 QR code found in frame {}", frames);
            return Ok(text);
        }
        // 單一影格解碼失敗是常態，不回報
        tracing::trace!("No QR code in frame {}", frames);

        if !frame_interval.is_zero() {
            tokio::select! {
                _ = &mut stop => {
                    tracing::info!("⏹️ Scanning stopped after {} frames", frames);
                    return Err(QrAuthError::ScanCancelled);
                }
                _ = tokio::time::sleep(frame_interval) => {}
            }
        }
    }
}
