//! The per-run resize job

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::processing::resize::validate_percentage;

/// Everything one run needs: where to read, where to write, how much to shrink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeJob {
    /// Input JPEG
    pub source: PathBuf,

    /// Output JPEG
    pub destination: PathBuf,

    /// Target size out of 100
    pub percentage: f64,
}

impl ResizeJob {
    pub fn new<S, D>(source: S, destination: D, percentage: f64) -> Self
    where
        S: AsRef<Path>,
        D: AsRef<Path>,
    {
        Self {
            source: source.as_ref().to_path_buf(),
            destination: destination.as_ref().to_path_buf(),
            percentage,
        }
    }

    /// Reject jobs whose percentage can never produce an image
    pub fn validate(&self) -> Result<()> {
        validate_percentage(self.percentage)
    }
}
