use crate::domain::model::ImageUpload;
use crate::domain::ports::ImageStore;
use crate::utils::error::Result;
use crate::utils::validation::validate_image_file;
use std::path::Path;

/// Reads uploaded images from the local file system.
#[derive(Debug, Clone, Default)]
pub struct LocalImageStore {
    base_path: Option<String>,
}

impl LocalImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative paths against `base_path`.
    pub fn with_base_path(base_path: String) -> Self {
        Self {
            base_path: Some(base_path),
        }
    }
}

impl ImageStore for LocalImageStore {
    async fn read_image(&self, path: &str) -> Result<ImageUpload> {
        validate_image_file("image", path)?;

        let full_path = match &self.base_path {
            Some(base) => Path::new(base).join(path),
            None => Path::new(path).to_path_buf(),
        };
        let bytes = tokio::fs::read(&full_path).await?;
        let name = full_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string();

        tracing::debug!("Read {} ({} bytes)", full_path.display(), bytes.len());
        Ok(ImageUpload { name, bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::QrAuthError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_image_relative_to_base() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("code.png"), b"png-bytes").unwrap();

        let store = LocalImageStore::with_base_path(dir.path().to_str().unwrap().to_string());
        let upload = store.read_image("code.png").await.unwrap();

        assert_eq!(upload.name, "code.png");
        assert_eq!(upload.bytes, b"png-bytes");
        assert_eq!(upload.preview().size_bytes, 9);
    }

    #[tokio::test]
    async fn test_rejects_non_image_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();

        let store = LocalImageStore::with_base_path(dir.path().to_str().unwrap().to_string());
        let err = store.read_image("notes.txt").await.unwrap_err();
        assert!(matches!(err, QrAuthError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let store = LocalImageStore::new();
        let err = tokio_test::block_on(store.read_image("/definitely/not/here/code.png"))
            .unwrap_err();
        assert!(matches!(err, QrAuthError::IoError(_)));
    }
}
