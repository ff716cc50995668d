//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the pipeline in [`process`](crate::process) (which
//! decides what thumbnail to create) and the [`backend`](super::backend)
//! (which does the actual pixel work). This separation allows swapping backends
//! (e.g. for testing with a mock) without changing pipeline logic.
//!
//! ## Types
//!
//! - [`Quality`] — Lossy encoding quality (1–100).
//! - [`TargetSize`] — Exact output dimensions of a thumbnail.
//! - [`ThumbnailParams`] — Everything needed to produce one thumbnail: crop, target, output, quality.

use super::crop::CropRect;
use std::fmt;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn value(self) -> u32 {
        self.0
    }
}

/// JPEG quality for every thumbnail. Not configurable.
pub const THUMBNAIL_QUALITY: Quality = Quality(80);

impl Default for Quality {
    fn default() -> Self {
        THUMBNAIL_QUALITY
    }
}

/// Requested thumbnail dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
}

impl TargetSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self {
            width: 350,
            height: 197,
        }
    }
}

impl fmt::Display for TargetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parameters for a thumbnail operation (crop + scale + encode).
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailParams {
    pub output: PathBuf,
    /// Region of the decoded source to keep.
    pub crop: CropRect,
    /// Final dimensions after scaling.
    pub target: TargetSize,
    pub quality: Quality,
}
