#![allow(dead_code)]

use async_trait::async_trait;
use qr_authenticator::domain::model::{CameraConstraints, Frame, ImageUpload};
use qr_authenticator::domain::ports::{Camera, QrDecoder, VideoStream};
use qr_authenticator::{QrAuthError, Result};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

const MARKER: &[u8] = b"QR:";

/// Frame whose pixels spell `QR:<text>`; the fake decoder reads it back.
pub fn code_frame(text: &str) -> Frame {
    let mut luma = MARKER.to_vec();
    luma.extend_from_slice(text.as_bytes());
    Frame::new(luma.len() as u32, 1, luma).unwrap()
}

pub fn blank_frame() -> Frame {
    Frame::new(4, 1, vec![255; 4]).unwrap()
}

fn read_marker(bytes: &[u8]) -> Option<String> {
    bytes
        .strip_prefix(MARKER)
        .map(|rest| String::from_utf8_lossy(rest).into_owned())
}

#[derive(Debug, Default)]
pub struct FakeDecoder {
    pub frames_seen: AtomicUsize,
}

#[async_trait]
impl QrDecoder for FakeDecoder {
    fn decode_frame(&self, frame: &Frame) -> Option<String> {
        self.frames_seen.fetch_add(1, Ordering::SeqCst);
        read_marker(frame.luma())
    }

    async fn decode_image(&self, image: &ImageUpload) -> Result<String> {
        read_marker(&image.bytes).ok_or_else(|| QrAuthError::DecodeFailed {
            message: "no QR code found".to_string(),
        })
    }
}

/// What the fake stream does once its scripted frames run out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterScript {
    End,
    Fail,
    BlankForever,
}

#[derive(Debug, Clone)]
pub struct FakeCamera {
    frames: Vec<Frame>,
    after: AfterScript,
    deny_access: bool,
    hang_on_open: bool,
    pub opened: Arc<AtomicUsize>,
    pub stopped: Arc<AtomicBool>,
    /// Signalled after every frame handed out.
    pub frame_served: Arc<Notify>,
}

impl FakeCamera {
    pub fn new(frames: Vec<Frame>, after: AfterScript) -> Self {
        Self {
            frames,
            after,
            deny_access: false,
            hang_on_open: false,
            opened: Arc::new(AtomicUsize::new(0)),
            stopped: Arc::new(AtomicBool::new(false)),
            frame_served: Arc::new(Notify::new()),
        }
    }

    pub fn denied() -> Self {
        Self {
            deny_access: true,
            ..Self::new(vec![], AfterScript::End)
        }
    }

    /// A permission prompt nobody answers.
    pub fn hanging() -> Self {
        Self {
            hang_on_open: true,
            ..Self::new(vec![], AfterScript::End)
        }
    }

    pub fn was_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Camera for FakeCamera {
    type Stream = FakeStream;

    async fn open(&self, _constraints: &CameraConstraints) -> Result<FakeStream> {
        if self.hang_on_open {
            std::future::pending::<()>().await;
        }
        if self.deny_access {
            return Err(QrAuthError::CameraUnavailable {
                message: "permission denied".to_string(),
            });
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(FakeStream {
            frames: self.frames.clone().into(),
            after: self.after,
            stopped: self.stopped.clone(),
            frame_served: self.frame_served.clone(),
        })
    }
}

pub struct FakeStream {
    frames: VecDeque<Frame>,
    after: AfterScript,
    stopped: Arc<AtomicBool>,
    frame_served: Arc<Notify>,
}

#[async_trait]
impl VideoStream for FakeStream {
    async fn next_frame(&mut self) -> Result<Option<Frame>> {
        // 讓出執行權，模擬等待下一個影格
        tokio::task::yield_now().await;

        let frame = match self.frames.pop_front() {
            Some(frame) => frame,
            None => match self.after {
                AfterScript::End => return Ok(None),
                AfterScript::Fail => {
                    return Err(QrAuthError::CameraUnavailable {
                        message: "device unplugged".to_string(),
                    })
                }
                AfterScript::BlankForever => blank_frame(),
            },
        };
        self.frame_served.notify_one();
        Ok(Some(frame))
    }

    fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
