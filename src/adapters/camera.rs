use crate::adapters::decoder::frame_from_image_bytes;
use crate::domain::model::{CameraConstraints, Frame};
use crate::domain::ports::{Camera, VideoStream};
use crate::utils::error::{QrAuthError, Result};
use crate::utils::validation::IMAGE_EXTENSIONS;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

/// A camera that replays captured frames, one image file per frame, in file
/// name order.
#[derive(Debug, Clone)]
pub struct FrameDirCamera {
    dir: PathBuf,
}

impl FrameDirCamera {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
}

#[async_trait]
impl Camera for FrameDirCamera {
    type Stream = FrameDirStream;

    async fn open(&self, constraints: &CameraConstraints) -> Result<FrameDirStream> {
        let unavailable = |message: String| QrAuthError::CameraUnavailable { message };

        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| unavailable(format!("{}: {}", self.dir.display(), e)))?;

        let mut frames = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| unavailable(e.to_string()))?
        {
            let path = entry.path();
            if is_frame_file(&path) {
                frames.push(path);
            }
        }

        if frames.is_empty() {
            return Err(unavailable(format!(
                "no frames found in {}",
                self.dir.display()
            )));
        }
        frames.sort();

        tracing::debug!(
            "Opened frame camera {} ({} frames, facing {:?})",
            self.dir.display(),
            frames.len(),
            constraints.facing_mode
        );
        Ok(FrameDirStream {
            frames: frames.into(),
            stopped: false,
        })
    }
}

#[derive(Debug)]
pub struct FrameDirStream {
    frames: VecDeque<PathBuf>,
    stopped: bool,
}

impl FrameDirStream {
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[async_trait]
impl VideoStream for FrameDirStream {
    async fn next_frame(&mut self) -> Result<Option<Frame>> {
        while !self.stopped {
            let Some(path) = self.frames.pop_front() else {
                return Ok(None);
            };
            let bytes = tokio::fs::read(&path).await?;
            match frame_from_image_bytes(&bytes) {
                Ok(frame) => return Ok(Some(frame)),
                // 壞掉的影格直接跳過
                Err(e) => tracing::warn!("Skipping unreadable frame {}: {}", path.display(), e),
            }
        }
        Ok(None)
    }

    fn stop(&mut self) {
        self.stopped = true;
        self.frames.clear();
    }
}
