//! jpgscale - shrink a JPEG by a percentage
//!
//! Reads a JPEG, scales both dimensions by `percentage / 100` (rounded to
//! the nearest pixel, halves up) and writes the result as a new JPEG.
//! Percentages of 100 or more are a no-op: the image is written back at its
//! original size without resampling.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jpgscale::{ProcessingEngine, ResizeJob};
//!
//! let engine = ProcessingEngine::new();
//! let outcome = engine.process(&ResizeJob::new("input.jpg", "output.jpg", 50.0))?;
//!
//! println!("Resized image: {}x{} -> {}x{}",
//!          outcome.source.width, outcome.source.height,
//!          outcome.output.width, outcome.output.height);
//! # Ok::<(), jpgscale::JpgScaleError>(())
//! ```
//!
//! The dimension arithmetic alone is available as [`compute_target_size`]:
//!
//! ```rust
//! let result = jpgscale::compute_target_size(101, 101, 50.0).unwrap();
//! assert_eq!((result.new_width, result.new_height), (51, 51));
//! assert!(result.applied);
//! ```

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod processing;
pub mod prompt;

// Re-export commonly used types
pub use config::{LoggingConfig, ResizeJob, Settings};
pub use error::{Result, JpgScaleError};
pub use processing::{
    compute_target_size, FilterType, ImageResizer, ProcessingEngine, ProcessingOutcome,
    ResizeRequest, ResizeResult,
};

use tracing::info;
use tracing_subscriber::EnvFilter;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging from `RUST_LOG`, defaulting to warnings only
///
/// Logs go to stderr so they never mix with the tool's stdout messages.
/// Calling this more than once is harmless.
pub fn init() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(LoggingConfig::default().level));
    install_subscriber(filter, false);
    Ok(())
}

/// Initialize logging from a settings file
pub fn init_with_settings(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_new(&settings.logging.level)
        .map_err(|e| JpgScaleError::config(
            format!("Invalid log level '{}': {}", settings.logging.level, e)
        ))?;
    install_subscriber(filter, settings.logging.json_format);
    Ok(())
}

fn install_subscriber(filter: EnvFilter, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish()).is_ok()
    } else {
        tracing::subscriber::set_global_default(builder.finish()).is_ok()
    };

    if installed {
        info!("jpgscale v{} initialized", VERSION);
        info!("JPEG decode: {}, encode: {}",
              image::ImageFormat::Jpeg.can_read(),
              image::ImageFormat::Jpeg.can_write());
    }
}
