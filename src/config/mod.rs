//! Configuration management for jpgscale

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::{Result, JpgScaleError};
use crate::processing::FilterType;

pub mod job;
pub use job::*;

/// Default ceiling on decoded image size (width * height)
pub const DEFAULT_MAX_IMAGE_PIXELS: u64 = 500_000_000;

/// Settings file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Resampling settings
    pub resize: ResizeSettings,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Resampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeSettings {
    /// Filter used when shrinking
    pub filter: FilterType,

    /// Maximum image dimensions (width * height) accepted for decoding
    pub max_image_pixels: u64,
}

impl Default for ResizeSettings {
    fn default() -> Self {
        Self {
            filter: FilterType::default(),
            max_image_pixels: DEFAULT_MAX_IMAGE_PIXELS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON logging
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
        }
    }
}

impl Settings {
    /// Load settings from a `.toml` or `.yaml` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| JpgScaleError::config(
                format!("Failed to read config file {:?}: {}", path.as_ref(), e)
            ))?;

        match file_extension(path.as_ref()).as_str() {
            "toml" => toml::from_str(&content).map_err(Into::into),
            "yaml" | "yml" => serde_yaml::from_str(&content).map_err(Into::into),
            _ => Err(JpgScaleError::config(
                "Unsupported config file format. Use .toml or .yaml"
            )),
        }
    }

    /// Save settings to a `.toml` or `.yaml` file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = match file_extension(path.as_ref()).as_str() {
            "toml" => toml::to_string_pretty(self)
                .map_err(|e| JpgScaleError::config(format!("TOML serialization failed: {}", e)))?,
            "yaml" | "yml" => serde_yaml::to_string(self)
                .map_err(|e| JpgScaleError::config(format!("YAML serialization failed: {}", e)))?,
            _ => return Err(JpgScaleError::config(
                "Unsupported config file format. Use .toml or .yaml"
            )),
        };

        std::fs::write(&path, content)
            .map_err(|e| JpgScaleError::config(
                format!("Failed to write config file {:?}: {}", path.as_ref(), e)
            ))?;

        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        tracing_subscriber::EnvFilter::try_new(&self.logging.level)
            .map_err(|e| JpgScaleError::config(
                format!("Invalid log level '{}': {}", self.logging.level, e)
            ))?;

        if self.resize.max_image_pixels == 0 {
            return Err(JpgScaleError::config(
                "max_image_pixels must be greater than 0"
            ));
        }

        Ok(())
    }
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(matches!(settings.resize.filter, FilterType::CatmullRom));
        assert_eq!(settings.logging.level, "warn");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_file_io() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::default();
        settings.resize.filter = FilterType::Lanczos3;

        let toml_path = dir.path().join("jpgscale.toml");
        settings.to_file(&toml_path).unwrap();
        let loaded = Settings::from_file(&toml_path).unwrap();
        assert!(matches!(loaded.resize.filter, FilterType::Lanczos3));

        let yaml_path = dir.path().join("jpgscale.yaml");
        settings.to_file(&yaml_path).unwrap();
        let loaded = Settings::from_file(&yaml_path).unwrap();
        assert!(matches!(loaded.resize.filter, FilterType::Lanczos3));
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: Settings = toml::from_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.resize.max_image_pixels, DEFAULT_MAX_IMAGE_PIXELS);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("jpgscale.ini");
        assert!(Settings::default().to_file(&path).is_err());
        assert!(Settings::from_file(&path).is_err());
    }

    #[test]
    fn test_invalid_settings() {
        let mut settings = Settings::default();
        settings.resize.max_image_pixels = 0;
        assert!(settings.validate().is_err());
    }
}
