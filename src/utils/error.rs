use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrAuthError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[cfg(feature = "decoder")]
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown brand: {name}")]
    UnknownBrand { name: String },

    #[error("Please select a brand and scan/upload a QR code")]
    MissingInput,

    #[error("A scan is already in progress ({mode})")]
    ScanInProgress { mode: String },

    #[error("Could not access camera: {message}")]
    CameraUnavailable { message: String },

    #[error("Frame buffer holds {actual} pixels, expected {width}x{height}")]
    InvalidFrame { width: u32, height: u32, actual: usize },

    #[error("Could not detect QR code: {message}")]
    DecodeFailed { message: String },

    #[error("Scan cancelled before a QR code was found")]
    ScanCancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Scan,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QrAuthError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownBrand { .. } | Self::MissingInput | Self::ScanInProgress { .. } => {
                ErrorCategory::Input
            }
            Self::CameraUnavailable { .. }
            | Self::DecodeFailed { .. }
            | Self::InvalidFrame { .. }
            | Self::ScanCancelled => ErrorCategory::Scan,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            #[cfg(feature = "decoder")]
            Self::ImageError(_) => ErrorCategory::Scan,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ScanCancelled => ErrorSeverity::Low,
            Self::CameraUnavailable { .. } | Self::DecodeFailed { .. } | Self::InvalidFrame { .. } => {
                ErrorSeverity::Medium
            }
            #[cfg(feature = "decoder")]
            Self::ImageError(_) => ErrorSeverity::Medium,
            Self::UnknownBrand { .. }
            | Self::MissingInput
            | Self::ScanInProgress { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    /// Short message meant for the person holding the phone, not the log.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingInput => "Please select a brand and scan/upload a QR code".to_string(),
            Self::UnknownBrand { name } => format!("'{}' is not a supported brand", name),
            Self::CameraUnavailable { .. } => {
                "Could not access camera. Please check permissions.".to_string()
            }
            Self::DecodeFailed { .. } => {
                "Could not detect QR code in the uploaded image".to_string()
            }
            #[cfg(feature = "decoder")]
            Self::ImageError(_) => "The uploaded file could not be read as an image".to_string(),
            Self::InvalidFrame { .. } => "The camera delivered a corrupted frame".to_string(),
            Self::ScanCancelled => "Scanning stopped".to_string(),
            Self::ScanInProgress { .. } => "Another scan is still running".to_string(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                format!("Unexpected system error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Run `qr-authenticator brands` to see the supported brands",
            ErrorCategory::Scan => {
                "Try again with a sharper image or hold the code steady in front of the camera"
            }
            ErrorCategory::Configuration => "Check the config file and command line flags",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, QrAuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_errors_are_retryable() {
        let err = QrAuthError::DecodeFailed {
            message: "no grids".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Scan);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(
            err.user_friendly_message(),
            "Could not detect QR code in the uploaded image"
        );
    }

    #[test]
    fn test_corrupted_frame_is_a_scan_error() {
        let err = QrAuthError::InvalidFrame {
            width: 4,
            height: 4,
            actual: 3,
        };
        assert_eq!(err.category(), ErrorCategory::Scan);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(err.to_string(), "Frame buffer holds 3 pixels, expected 4x4");
    }

    #[test]
    fn test_missing_input_prompt() {
        let err = QrAuthError::MissingInput;
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(
            err.to_string(),
            "Please select a brand and scan/upload a QR code"
        );
    }

    #[test]
    fn test_cancel_is_low_severity() {
        assert_eq!(QrAuthError::ScanCancelled.severity(), ErrorSeverity::Low);
    }
}
