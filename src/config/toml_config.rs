use crate::core::scanner::CameraSettings;
use crate::domain::model::{CameraConstraints, FacingMode};
use crate::utils::error::{QrAuthError, Result};
use crate::utils::validation::{validate_one_of, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const MAX_FRAME_INTERVAL_MS: u64 = 10_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub camera: CameraConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub facing_mode: String,
    pub frame_interval_ms: u64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            facing_mode: "environment".to_string(),
            frame_interval_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub json: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QrAuthError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| QrAuthError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables
    /// are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QrAuthError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn facing_mode(&self) -> FacingMode {
        match self.camera.facing_mode.as_str() {
            "user" => FacingMode::User,
            _ => FacingMode::Environment,
        }
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            constraints: CameraConstraints {
                facing_mode: self.facing_mode(),
            },
            frame_interval: Duration::from_millis(self.camera.frame_interval_ms),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_one_of(
            "camera.facing_mode",
            &self.camera.facing_mode,
            &["environment", "user"],
        )?;
        validate_range(
            "camera.frame_interval_ms",
            self.camera.frame_interval_ms,
            0,
            MAX_FRAME_INTERVAL_MS,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.facing_mode(), FacingMode::Environment);
        assert_eq!(config.camera.frame_interval_ms, 100);
        assert!(!config.output.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[camera]
facing_mode = "user"
frame_interval_ms = 0

[output]
json = true

[logging]
json = true
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.facing_mode(), FacingMode::User);
        assert!(config.camera_settings().frame_interval.is_zero());
        assert!(config.output.json);
        assert!(config.logging.json);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QR_AUTH_TEST_FACING", "user");

        let toml_content = r#"
[camera]
facing_mode = "${QR_AUTH_TEST_FACING}"
"#;
        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.camera.facing_mode, "user");

        std::env::remove_var("QR_AUTH_TEST_FACING");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[camera]
facing_mode = "sideways"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str(
            r#"
[camera]
frame_interval_ms = 60000
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[camera\n").unwrap_err();
        assert!(matches!(err, QrAuthError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\njson = true\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert!(config.output.json);
    }
}
