//! JPEG detection by extension and by magic bytes

use std::path::Path;
use crate::error::{Result, JpgScaleError};

/// Extensions recognized as JPEG, lower case
pub const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg", "jpe", "jfif"];

/// JPEG quality used when encoding, matching the common codec default
pub const JPEG_QUALITY: u8 = 75;

/// Check if a file extension names a JPEG
pub fn is_jpeg_extension(extension: &str) -> bool {
    JPEG_EXTENSIONS
        .iter()
        .any(|&ext| ext.eq_ignore_ascii_case(extension))
}

/// Require a JPEG extension on `path`
pub fn ensure_jpeg_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| JpgScaleError::unsupported_format(
            "Unknown".to_string(),
            Some(path.to_path_buf()),
        ))?;

    if is_jpeg_extension(extension) {
        Ok(())
    } else {
        Err(JpgScaleError::unsupported_format(
            extension.to_string(),
            Some(path.to_path_buf()),
        ))
    }
}

/// Check the leading bytes of a file for the JPEG SOI marker
pub fn is_jpeg_header(data: &[u8]) -> bool {
    infer::image::is_jpeg(data)
}

/// Describe what the header looks like, for diagnostics
pub fn describe_header(data: &[u8]) -> String {
    infer::get(data)
        .map(|kind| kind.mime_type().to_string())
        .unwrap_or_else(|| "Unknown (magic bytes)".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: [u8; 12] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01];
    const PNG_HEADER: [u8; 12] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D];

    #[test]
    fn test_jpeg_extensions() {
        assert!(is_jpeg_extension("jpg"));
        assert!(is_jpeg_extension("JPEG"));
        assert!(is_jpeg_extension("jfif"));
        assert!(!is_jpeg_extension("png"));
        assert!(!is_jpeg_extension(""));
    }

    #[test]
    fn test_ensure_jpeg_path() {
        assert!(ensure_jpeg_path("photo.jpg").is_ok());
        assert!(ensure_jpeg_path("dir/photo.JPG").is_ok());

        let err = ensure_jpeg_path("photo.png").unwrap_err();
        assert!(matches!(err, JpgScaleError::UnsupportedFormat { ref format, .. } if format == "png"));

        assert!(ensure_jpeg_path("photo").is_err());
    }

    #[test]
    fn test_header_detection() {
        assert!(is_jpeg_header(&JPEG_HEADER));
        assert!(!is_jpeg_header(&PNG_HEADER));
        assert!(!is_jpeg_header(b"not an image"));
    }

    #[test]
    fn test_describe_header() {
        assert_eq!(describe_header(&PNG_HEADER), "image/png");
        assert_eq!(describe_header(b"plain"), "Unknown (magic bytes)");
    }
}
