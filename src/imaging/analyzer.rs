//! Saliency-based crop selection.
//!
//! [`SaliencyAnalyzer`] hands the decoded image to `smartcrop::Analyzer`,
//! which scores candidate crops of the target aspect ratio for edge detail,
//! skin tones and saturation, and favours the centre and rule-of-thirds
//! lines. The analyzer always runs with the crate's stock settings.
//!
//! Around that call this module enforces the [`CropFinder`] contract:
//!
//! - impossible targets are rejected before any analysis runs;
//! - the returned region is grown to at least the target size, so the scaler
//!   only ever shrinks;
//! - the region is clamped into the image and checked before it is returned.
//!
//! The analyzer has no randomness: identical pixels and targets always yield
//! the same rectangle.

use super::calculations::settle_crop;
use super::crop::{CropError, CropFinder, CropRect, check_target};
use super::params::TargetSize;
use image::{DynamicImage, GenericImageView};
use smartcrop::{Analyzer, CropSettings};
use std::num::NonZeroU32;

/// Content-aware [`CropFinder`] backed by `smartcrop`.
pub struct SaliencyAnalyzer {
    analyzer: Analyzer,
}

impl SaliencyAnalyzer {
    pub fn new() -> Self {
        Self {
            analyzer: Analyzer::new(CropSettings::default()),
        }
    }
}

impl Default for SaliencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl CropFinder for SaliencyAnalyzer {
    fn find_best_crop(
        &self,
        image: &DynamicImage,
        target: TargetSize,
    ) -> Result<CropRect, CropError> {
        let (width, height) = image.dimensions();
        check_target(width, height, target)?;

        let (Some(target_w), Some(target_h)) =
            (NonZeroU32::new(target.width), NonZeroU32::new(target.height))
        else {
            return Err(CropError::InvalidTarget(target));
        };

        let best = self
            .analyzer
            .find_best_crop(image, target_w, target_h)
            .map_err(|err| CropError::Analysis(format!("{err:?}")))?
            .crop;

        let found = CropRect::new(best.x, best.y, best.width, best.height);
        let crop = settle_crop(found, (width, height), target);
        if !crop.fits_within(width, height) {
            return Err(CropError::OutOfBounds {
                crop,
                width,
                height,
            });
        }
        Ok(crop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn analyzer() -> SaliencyAnalyzer {
        SaliencyAnalyzer::default()
    }

    /// Flat grey canvas with a saturated red/blue checkerboard patch.
    fn image_with_patch(w: u32, h: u32, patch: CropRect) -> DynamicImage {
        let img = RgbImage::from_fn(w, h, |x, y| {
            let inside = x >= patch.x && x < patch.right() && y >= patch.y && y < patch.bottom();
            if inside && ((x / 4) + (y / 4)) % 2 == 0 {
                Rgb([250, 30, 30])
            } else if inside {
                Rgb([30, 30, 250])
            } else {
                Rgb([128, 128, 128])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    /// Deterministic pseudo-texture so every region has some detail.
    fn textured(w: u32, h: u32) -> DynamicImage {
        let img = RgbImage::from_fn(w, h, |x, y| {
            let v = (x.wrapping_mul(2_654_435_761) ^ y.wrapping_mul(40_503)) >> 7;
            Rgb([(v % 256) as u8, ((v >> 8) % 256) as u8, ((x + y) % 256) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    fn assert_ratio(rect: CropRect, target: TargetSize) {
        let ratio = rect.width as f64 / rect.height as f64;
        let expected = target.width as f64 / target.height as f64;
        assert!(
            (ratio - expected).abs() < 0.03,
            "{rect:?} ratio {ratio} vs {expected}"
        );
    }

    // =========================================================================
    // Contract
    // =========================================================================

    #[test]
    fn crop_in_bounds_with_target_ratio() {
        let target = TargetSize::new(350, 197);
        for (w, h) in [(800, 600), (600, 800), (1920, 1080), (1000, 1000)] {
            let img = textured(w, h);
            let rect = analyzer().find_best_crop(&img, target).unwrap();
            assert!(rect.fits_within(w, h), "{rect:?} outside {w}x{h}");
            assert!(rect.width >= target.width && rect.height >= target.height);
            assert_ratio(rect, target);
        }
    }

    #[test]
    fn crop_is_deterministic() {
        let img = textured(640, 480);
        let target = TargetSize::new(200, 200);
        let first = analyzer().find_best_crop(&img, target).unwrap();
        let second = analyzer().find_best_crop(&img, target).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn target_equal_to_source_returns_whole_image() {
        let img = textured(350, 197);
        let rect = analyzer()
            .find_best_crop(&img, TargetSize::new(350, 197))
            .unwrap();
        assert_eq!(rect, CropRect::new(0, 0, 350, 197));
    }

    #[test]
    fn target_larger_than_source_is_error() {
        let img = textured(800, 600);
        let err = analyzer()
            .find_best_crop(&img, TargetSize::new(4000, 3000))
            .unwrap_err();
        assert!(matches!(err, CropError::TargetExceedsSource { .. }));
    }

    #[test]
    fn target_wider_than_narrow_source_is_error() {
        // Larger in area, but narrower than the target
        let img = textured(300, 4000);
        let err = analyzer()
            .find_best_crop(&img, TargetSize::new(350, 197))
            .unwrap_err();
        assert!(matches!(err, CropError::TargetExceedsSource { width: 300, .. }));
    }

    #[test]
    fn zero_target_is_error() {
        let img = textured(100, 100);
        let err = analyzer()
            .find_best_crop(&img, TargetSize::new(0, 50))
            .unwrap_err();
        assert!(matches!(err, CropError::InvalidTarget(_)));
    }

    // =========================================================================
    // Saliency
    // =========================================================================

    #[test]
    fn crop_frames_the_detailed_region() {
        let patch = CropRect::new(1350, 150, 100, 100);
        let img = image_with_patch(1600, 400, patch);
        let rect = analyzer()
            .find_best_crop(&img, TargetSize::new(350, 197))
            .unwrap();

        let (cx, cy) = (patch.x + patch.width / 2, patch.y + patch.height / 2);
        assert!(
            rect.x <= cx && rect.right() > cx && rect.y <= cy && rect.bottom() > cy,
            "patch centre not framed: {rect:?}"
        );
    }
}
