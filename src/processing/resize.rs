//! Percentage-based resizing
//!
//! Target dimensions are `round(original * percentage / 100)` per axis, with
//! halves rounded up. A dimension that would round to zero is clamped to one
//! pixel. A percentage of 100 or more leaves the image untouched.

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, JpgScaleError};

/// Percentages at or above this value are a no-op
pub const NOOP_THRESHOLD: f64 = 100.0;

/// Input to [`compute_target_size`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeRequest {
    pub original_width: u32,
    pub original_height: u32,
    pub percentage: f64,
}

impl ResizeRequest {
    pub fn new(original_width: u32, original_height: u32, percentage: f64) -> Self {
        Self {
            original_width,
            original_height,
            percentage,
        }
    }

    /// Compute the target size for this request
    pub fn compute(&self) -> Result<ResizeResult> {
        compute_target_size(self.original_width, self.original_height, self.percentage)
    }
}

/// Dimensions to resample to, and whether resampling happens at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeResult {
    pub new_width: u32,
    pub new_height: u32,
    /// `false` when the request was a no-op
    pub applied: bool,
}

/// Reject percentages that can never yield an image
pub fn validate_percentage(percentage: f64) -> Result<()> {
    if percentage.is_nan() {
        return Err(JpgScaleError::invalid_argument("Percentage must be a number, got NaN"));
    }
    // Covers -inf; +inf falls through to the no-op branch
    if percentage <= 0.0 {
        return Err(JpgScaleError::invalid_argument(
            format!("Percentage must be greater than 0, got {}", percentage)
        ));
    }
    Ok(())
}

/// Compute the new pixel dimensions for shrinking by `percentage`
pub fn compute_target_size(
    original_width: u32,
    original_height: u32,
    percentage: f64,
) -> Result<ResizeResult> {
    if original_width == 0 || original_height == 0 {
        return Err(JpgScaleError::invalid_argument(
            format!("Original dimensions must be positive, got {}x{}", original_width, original_height)
        ));
    }
    validate_percentage(percentage)?;

    if percentage >= NOOP_THRESHOLD {
        return Ok(ResizeResult {
            new_width: original_width,
            new_height: original_height,
            applied: false,
        });
    }

    Ok(ResizeResult {
        new_width: scale_dimension(original_width, percentage),
        new_height: scale_dimension(original_height, percentage),
        applied: true,
    })
}

fn scale_dimension(original: u32, percentage: f64) -> u32 {
    // percentage < 100 keeps the product below u32::MAX
    let scaled = (f64::from(original) * percentage / 100.0).round() as u32;
    scaled.clamp(1, original)
}

/// Resampling filters offered by the codec
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterType {
    /// Nearest neighbor (fastest, lowest quality)
    Nearest,
    /// Triangle (linear interpolation)
    Triangle,
    /// Catmull-Rom cubic spline
    #[default]
    CatmullRom,
    /// Gaussian blur
    Gaussian,
    /// Lanczos with radius 3
    Lanczos3,
}

impl From<FilterType> for image::imageops::FilterType {
    fn from(filter: FilterType) -> Self {
        match filter {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Triangle => image::imageops::FilterType::Triangle,
            FilterType::CatmullRom => image::imageops::FilterType::CatmullRom,
            FilterType::Gaussian => image::imageops::FilterType::Gaussian,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Shrinks decoded images by a percentage
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageResizer {
    filter: FilterType,
}

impl ImageResizer {
    /// Create a new resizer with the default filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resizer with custom filter
    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }

    /// Resize `image` by `percentage`, returning it unchanged for a no-op
    pub fn resize(
        &self,
        image: DynamicImage,
        percentage: f64,
    ) -> Result<(DynamicImage, ResizeResult)> {
        let result = compute_target_size(image.width(), image.height(), percentage)?;

        if !result.applied {
            debug!(
                "No resize needed at {}%, keeping {}x{}",
                percentage,
                image.width(),
                image.height()
            );
            return Ok((image, result));
        }

        debug!(
            "Resizing {}x{} -> {}x{} using {:?}",
            image.width(),
            image.height(),
            result.new_width,
            result.new_height,
            self.filter
        );

        let resized = image.resize_exact(result.new_width, result.new_height, self.filter.into());
        Ok((resized, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn create_test_image(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            let intensity = ((x + y) % 255) as u8;
            Rgb([intensity, intensity, intensity])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn test_scale_consistency() {
        let result = compute_target_size(200, 100, 50.0).unwrap();
        assert_eq!(
            result,
            ResizeResult { new_width: 100, new_height: 50, applied: true }
        );
    }

    #[test]
    fn test_rounds_half_up() {
        let result = compute_target_size(101, 101, 50.0).unwrap();
        assert_eq!((result.new_width, result.new_height), (51, 51));
        assert!(result.applied);

        // 0.4 of a pixel rounds down, 0.6 rounds up
        assert_eq!(compute_target_size(7, 8, 20.0).unwrap().new_width, 1);
        assert_eq!(compute_target_size(8, 8, 20.0).unwrap().new_width, 2);
    }

    #[test]
    fn test_noop_at_and_above_hundred() {
        for percentage in [100.0, 101.0, 200.0] {
            let result = compute_target_size(100, 200, percentage).unwrap();
            assert_eq!(
                result,
                ResizeResult { new_width: 100, new_height: 200, applied: false }
            );
        }
    }

    #[test]
    fn test_infinite_percentage_is_noop() {
        let result = compute_target_size(800, 600, f64::INFINITY).unwrap();
        assert_eq!(
            result,
            ResizeResult { new_width: 800, new_height: 600, applied: false }
        );
    }

    #[test]
    fn test_noop_is_idempotent() {
        let first = compute_target_size(640, 480, 100.0).unwrap();
        let second = compute_target_size(first.new_width, first.new_height, 100.0).unwrap();
        assert_eq!(first, second);
        assert_eq!((second.new_width, second.new_height), (640, 480));
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(compute_target_size(800, 600, 0.0).unwrap_err().is_invalid_argument());
        assert!(compute_target_size(800, 600, -10.0).unwrap_err().is_invalid_argument());
        assert!(compute_target_size(800, 600, f64::NAN).unwrap_err().is_invalid_argument());
        assert!(compute_target_size(800, 600, f64::NEG_INFINITY).unwrap_err().is_invalid_argument());
        assert!(compute_target_size(0, 600, 50.0).unwrap_err().is_invalid_argument());
        assert!(compute_target_size(800, 0, 50.0).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_tiny_dimensions_clamp_to_one_pixel() {
        let result = compute_target_size(1, 3, 10.0).unwrap();
        assert_eq!((result.new_width, result.new_height), (1, 1));
        assert!(result.applied);
    }

    #[test]
    fn test_percentages_from_original_suite() {
        let cases = [(25.0, (25, 50)), (99.0, (99, 198)), (10.0, (10, 20)), (50.0, (50, 100))];
        for (percentage, expected) in cases {
            let result = ResizeRequest::new(100, 200, percentage).compute().unwrap();
            assert_eq!((result.new_width, result.new_height), expected);
        }
    }

    #[quickcheck]
    fn prop_shrink_never_grows(width: u32, height: u32, hundredths: u16) -> TestResult {
        if width == 0 || height == 0 {
            return TestResult::discard();
        }
        // 0.01 ..= 99.99
        let percentage = f64::from(hundredths % 9999 + 1) / 100.0;
        let result = compute_target_size(width, height, percentage).unwrap();
        TestResult::from_bool(
            result.applied
                && result.new_width >= 1
                && result.new_height >= 1
                && result.new_width <= width
                && result.new_height <= height,
        )
    }

    #[quickcheck]
    fn prop_noop_keeps_dimensions(width: u32, height: u32, extra: u16) -> TestResult {
        if width == 0 || height == 0 {
            return TestResult::discard();
        }
        let percentage = NOOP_THRESHOLD + f64::from(extra);
        let result = compute_target_size(width, height, percentage).unwrap();
        TestResult::from_bool(
            !result.applied && result.new_width == width && result.new_height == height,
        )
    }

    #[test]
    fn test_basic_resize() {
        let resizer = ImageResizer::new();
        let image = create_test_image(1000, 800);

        let (resized, result) = resizer.resize(image, 50.0).unwrap();
        assert!(result.applied);
        assert_eq!(resized.width(), 500);
        assert_eq!(resized.height(), 400);
    }

    #[test]
    fn test_resize_ignores_aspect_ratio_rounding() {
        let resizer = ImageResizer::with_filter(FilterType::Nearest);
        let image = create_test_image(101, 33);

        let (resized, result) = resizer.resize(image, 50.0).unwrap();
        assert_eq!((resized.width(), resized.height()), (result.new_width, result.new_height));
        assert_eq!((resized.width(), resized.height()), (51, 17));
    }

    #[test]
    fn test_no_resize_needed() {
        let resizer = ImageResizer::new();
        let image = create_test_image(100, 100);

        let (same, result) = resizer.resize(image, 100.0).unwrap();
        assert!(!result.applied);
        assert_eq!((same.width(), same.height()), (100, 100));
    }

    #[test]
    fn test_resizer_creation() {
        assert!(matches!(ImageResizer::new().filter, FilterType::CatmullRom));
        assert!(matches!(ImageResizer::with_filter(FilterType::Gaussian).filter, FilterType::Gaussian));
    }

    #[test]
    fn test_filter_conversion() {
        let filters = [
            FilterType::Nearest,
            FilterType::Triangle,
            FilterType::CatmullRom,
            FilterType::Gaussian,
            FilterType::Lanczos3,
        ];

        for filter in &filters {
            let _: image::imageops::FilterType = (*filter).into();
        }
    }
}
