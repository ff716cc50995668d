//! Crop rectangles and the pluggable crop-finding seam.
//!
//! A [`CropFinder`] looks at a decoded image and a [`TargetSize`] and returns
//! the region of the image to keep. The production implementation is
//! [`SaliencyAnalyzer`](super::analyzer::SaliencyAnalyzer); anything that
//! honours the contract below can replace it.
//!
//! ## Contract
//!
//! - The rectangle lies fully inside the image.
//! - Its width:height ratio equals the target's, within integer rounding.
//! - The same pixels and target always produce the same rectangle.

use super::params::TargetSize;
use image::DynamicImage;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CropError {
    #[error("target size {0} has a zero dimension")]
    InvalidTarget(TargetSize),
    #[error("source image is empty")]
    EmptyImage,
    #[error("target size {target} exceeds source image {width}x{height}")]
    TargetExceedsSource {
        target: TargetSize,
        width: u32,
        height: u32,
    },
    #[error("saliency analysis failed: {0}")]
    Analysis(String),
    #[error("crop {crop} falls outside the {width}x{height} source")]
    OutOfBounds {
        crop: CropRect,
        width: u32,
        height: u32,
    },
}

/// An axis-aligned region of an image, origin at the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// True when the rectangle is non-empty and fits inside `width x height`.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.width > 0
            && self.height > 0
            && self.x.checked_add(self.width).is_some_and(|r| r <= width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= height)
    }
}

/// Rendered as `(x0,y0)-(x1,y1)` with an exclusive max corner.
impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.x,
            self.y,
            self.right(),
            self.bottom()
        )
    }
}

/// Chooses which part of an image becomes the thumbnail.
pub trait CropFinder {
    fn find_best_crop(
        &self,
        image: &DynamicImage,
        target: TargetSize,
    ) -> Result<CropRect, CropError>;
}

/// Reject targets no crop can satisfy, before any analysis runs.
pub(crate) fn check_target(
    image_width: u32,
    image_height: u32,
    target: TargetSize,
) -> Result<(), CropError> {
    if target.is_empty() {
        return Err(CropError::InvalidTarget(target));
    }
    if image_width == 0 || image_height == 0 {
        return Err(CropError::EmptyImage);
    }
    if target.width > image_width || target.height > image_height {
        return Err(CropError::TargetExceedsSource {
            target,
            width: image_width,
            height: image_height,
        });
    }
    Ok(())
}
