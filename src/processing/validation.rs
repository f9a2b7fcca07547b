//! Source and destination checks run before decoding

use std::fs;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::config::DEFAULT_MAX_IMAGE_PIXELS;
use crate::error::{Result, JpgScaleError};
use crate::processing::formats::{describe_header, ensure_jpeg_path, is_jpeg_header};

/// Bytes read from the start of a file for header sniffing
const HEADER_LEN: usize = 32;

/// Image validator for checking file integrity and compatibility
#[derive(Debug, Clone)]
pub struct ImageValidator {
    max_image_pixels: u64,
}

/// What validation learned about a source file
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub file_size: u64,
}

impl ImageValidator {
    /// Create a new image validator with default limits
    pub fn new() -> Self {
        Self {
            max_image_pixels: DEFAULT_MAX_IMAGE_PIXELS,
        }
    }

    /// Create a validator with a custom pixel limit
    pub fn with_max_pixels(max_image_pixels: u64) -> Self {
        Self { max_image_pixels }
    }

    /// Validate a source file for processing
    pub fn validate_source<P: AsRef<Path>>(&self, path: P) -> Result<ValidationReport> {
        let path = path.as_ref();
        debug!("Validating source: {:?}", path);

        let metadata = fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                JpgScaleError::not_found(path.to_path_buf())
            } else {
                JpgScaleError::validation(
                    format!("Cannot access file: {}", e),
                    Some(path.to_path_buf()),
                )
            }
        })?;

        if !metadata.is_file() {
            return Err(JpgScaleError::validation(
                "Path is not a regular file",
                Some(path.to_path_buf()),
            ));
        }

        let file_size = metadata.len();
        if file_size == 0 {
            return Err(JpgScaleError::validation(
                "File is empty",
                Some(path.to_path_buf()),
            ));
        }

        ensure_jpeg_path(path)?;
        self.validate_header(path)?;

        Ok(ValidationReport { file_size })
    }

    /// Validate the destination path
    pub fn validate_destination<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Validating destination: {:?}", path);

        if path.is_dir() {
            return Err(JpgScaleError::validation(
                "Destination is a directory, expected a .jpg file name",
                Some(path.to_path_buf()),
            ));
        }

        ensure_jpeg_path(path)
    }

    /// Validate file header (magic bytes)
    fn validate_header(&self, path: &Path) -> Result<()> {
        let mut file = fs::File::open(path).map_err(|e| JpgScaleError::validation(
            format!("Cannot open file for header validation: {}", e),
            Some(path.to_path_buf()),
        ))?;

        let mut header = Vec::with_capacity(HEADER_LEN);
        file.by_ref()
            .take(HEADER_LEN as u64)
            .read_to_end(&mut header)
            .map_err(|e| JpgScaleError::validation(
                format!("Cannot read file header: {}", e),
                Some(path.to_path_buf()),
            ))?;

        if !is_jpeg_header(&header) {
            return Err(JpgScaleError::unsupported_format(
                describe_header(&header),
                Some(path.to_path_buf()),
            ));
        }

        Ok(())
    }

    /// Validate image dimensions from loaded image
    pub fn validate_dimensions(&self, width: u32, height: u32, path: Option<&Path>) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(JpgScaleError::validation(
                "Image has zero width or height",
                path.map(Path::to_path_buf),
            ));
        }

        let total_pixels = u64::from(width) * u64::from(height);
        if total_pixels > self.max_image_pixels {
            return Err(JpgScaleError::image_too_large(
                width,
                height,
                self.max_image_pixels,
                path.map(Path::to_path_buf),
            ));
        }

        Ok(())
    }
}

impl Default for ImageValidator {
    fn default() -> Self {
        Self::new()
    }
}
