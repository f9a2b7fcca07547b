//! Core image processing functionality

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ResizeJob, Settings};
use crate::error::{Result, ErrorContext};

pub mod resize;
pub mod formats;
pub mod validation;

pub use resize::*;
pub use formats::*;
pub use validation::*;

/// Runs a [`ResizeJob`] end to end: validate, decode, resize, encode
#[derive(Debug, Clone, Default)]
pub struct ProcessingEngine {
    resizer: ImageResizer,
    validator: ImageValidator,
}

impl ProcessingEngine {
    /// Create a new processing engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine using the filter and limits from `settings`
    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            resizer: ImageResizer::with_filter(settings.resize.filter),
            validator: ImageValidator::with_max_pixels(settings.resize.max_image_pixels),
        }
    }

    /// Process a single job
    pub fn process(&self, job: &ResizeJob) -> Result<ProcessingOutcome> {
        let start_time = Instant::now();
        debug!("Processing file: {:?} -> {:?}", job.source, job.destination);

        // Bad percentages fail before touching the file system
        job.validate()?;
        let report = self.validator.validate_source(&job.source)?;
        self.validator.validate_destination(&job.destination)?;

        let image = self.load_image(&job.source)?;
        let source_info = ImageInfo {
            path: job.source.clone(),
            width: image.width(),
            height: image.height(),
            file_size: report.file_size,
        };

        let (image, result) = self.resizer.resize(image, job.percentage)?;
        let output_info = self.save_image(&image, &job.destination)?;

        let processing_time = start_time.elapsed();
        info!(
            "Wrote {:?}: {}x{} -> {}x{} in {:.2}s",
            job.destination,
            source_info.width,
            source_info.height,
            output_info.width,
            output_info.height,
            processing_time.as_secs_f64()
        );

        Ok(ProcessingOutcome {
            source: source_info,
            output: output_info,
            percentage: job.percentage,
            result,
            processing_time,
        })
    }

    /// Load an image from file
    fn load_image(&self, path: &Path) -> Result<DynamicImage> {
        debug!("Loading image: {:?}", path);

        let image = image::io::Reader::open(path)
            .with_file_context(path.to_path_buf())?
            .with_guessed_format()
            .with_file_context(path.to_path_buf())?
            .decode()
            .with_file_context(path.to_path_buf())?;

        self.validator
            .validate_dimensions(image.width(), image.height(), Some(path))?;

        debug!("Loaded image: {}x{} ({:?})", image.width(), image.height(), image.color());
        Ok(image)
    }

    /// Encode an image as JPEG at `output_path`
    fn save_image(&self, image: &DynamicImage, output_path: &Path) -> Result<ImageInfo> {
        debug!("Saving image: {:?}", output_path);

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_file_context(output_path.to_path_buf())?;
        }

        let file = fs::File::create(output_path).with_file_context(output_path.to_path_buf())?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
        jpeg_compatible(image)
            .write_with_encoder(encoder)
            .with_file_context(output_path.to_path_buf())?;
        writer.flush().with_file_context(output_path.to_path_buf())?;

        let file_size = fs::metadata(output_path)
            .with_file_context(output_path.to_path_buf())?
            .len();

        let info = ImageInfo {
            path: output_path.to_path_buf(),
            width: image.width(),
            height: image.height(),
            file_size,
        };

        debug!("Saved image: {}x{} ({} bytes)", info.width, info.height, info.file_size);
        Ok(info)
    }
}

/// JPEG holds 8-bit gray or RGB; everything else is flattened to RGB8
fn jpeg_compatible(image: &DynamicImage) -> std::borrow::Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => std::borrow::Cow::Borrowed(image),
        other => std::borrow::Cow::Owned(DynamicImage::ImageRgb8(other.to_rgb8())),
    }
}

/// Information about an image file
#[derive(Debug, Clone, Serialize)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub file_size: u64,
}

/// Result of processing one job
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingOutcome {
    pub source: ImageInfo,
    pub output: ImageInfo,
    pub percentage: f64,
    pub result: ResizeResult,
    #[serde(serialize_with = "serialize_duration")]
    pub processing_time: Duration,
}

impl ProcessingOutcome {
    /// True when pixels were resampled
    pub fn applied(&self) -> bool {
        self.result.applied
    }

    /// Get size reduction percentage on disk
    pub fn size_reduction(&self) -> f64 {
        if self.source.file_size == 0 {
            return 0.0;
        }
        let reduction = self.source.file_size.saturating_sub(self.output.file_size);
        (reduction as f64 / self.source.file_size as f64) * 100.0
    }
}

fn serialize_duration<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}
