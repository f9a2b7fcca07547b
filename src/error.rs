//! Error types and handling for jpgscale

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for jpgscale operations
pub type Result<T> = std::result::Result<T, JpgScaleError>;

/// Main error type for jpgscale operations
#[derive(Debug, Error)]
pub enum JpgScaleError {
    /// Caller supplied a percentage or dimension outside the accepted domain
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Source file does not exist
    #[error("File not found: {file:?}")]
    NotFound { file: PathBuf },

    /// I/O related errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Decode, resample or encode errors from the codec
    #[error("Image processing error: {0}")]
    ImageError(#[from] image::ImageError),

    /// File is not a JPEG
    #[error("Unsupported image format: {format} (file: {file:?})")]
    UnsupportedFormat {
        format: String,
        file: Option<PathBuf>,
    },

    /// Image dimensions too large
    #[error("Image too large: {width}x{height} pixels (limit: {limit} pixels, file: {file:?})")]
    ImageTooLarge {
        width: u32,
        height: u32,
        limit: u64,
        file: Option<PathBuf>,
    },

    /// File validation errors
    #[error("File validation failed: {message} (file: {file:?})")]
    ValidationError {
        message: String,
        file: Option<PathBuf>,
    },

    /// Settings file errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    SerdeError(String),
}

impl JpgScaleError {
    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new not found error
    pub fn not_found(file: PathBuf) -> Self {
        Self::NotFound { file }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format<S: Into<String>>(format: S, file: Option<PathBuf>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
            file,
        }
    }

    /// Create a new image too large error
    pub fn image_too_large(width: u32, height: u32, limit: u64, file: Option<PathBuf>) -> Self {
        Self::ImageTooLarge {
            width,
            height,
            limit,
            file,
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S, file: Option<PathBuf>) -> Self {
        Self::ValidationError {
            message: message.into(),
            file,
        }
    }

    /// True when the error comes from bad caller input rather than the file
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Get the diagnostic shown to the end user
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { file } => {
                format!("Error: The file '{}' was not found.", file.display())
            }
            Self::UnsupportedFormat { format, .. } => format!(
                "An error occurred during image processing: unsupported image format '{}', only JPEG is supported",
                format
            ),
            other => format!("An error occurred during image processing: {}", other),
        }
    }
}

// Convert serde errors to our error type
impl From<toml::de::Error> for JpgScaleError {
    fn from(err: toml::de::Error) -> Self {
        Self::SerdeError(format!("TOML parsing error: {}", err))
    }
}

impl From<serde_yaml::Error> for JpgScaleError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerdeError(format!("YAML parsing error: {}", err))
    }
}

/// Error context extension for adding file path information
pub trait ErrorContext<T> {
    /// Add file context to an error
    fn with_file_context(self, file: PathBuf) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<JpgScaleError>,
{
    fn with_file_context(self, file: PathBuf) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();

            // A missing file surfaces as NotFound rather than a bare io error
            if let JpgScaleError::IoError(io) = &error {
                if io.kind() == std::io::ErrorKind::NotFound {
                    return JpgScaleError::not_found(file);
                }
            }

            match &mut error {
                JpgScaleError::UnsupportedFormat { file: ref mut f, .. }
                | JpgScaleError::ImageTooLarge { file: ref mut f, .. }
                | JpgScaleError::ValidationError { file: ref mut f, .. } => {
                    if f.is_none() {
                        *f = Some(file);
                    }
                }
                _ => {}
            }

            error
        })
    }
}
