//! Pure calculation functions for crop geometry.
//!
//! All functions here are pure and testable without any I/O or images.

use super::crop::CropRect;
use super::params::TargetSize;

/// Turn an analyzer's suggestion into a crop the scaler can use as-is.
///
/// A suggestion smaller than `target` on either axis is replaced by a
/// `target`-sized region around the same centre, so thumbnails are only ever
/// shrunk. The result is then clamped to `source` and shifted back inside it.
///
/// # Examples
/// ```
/// # use smart_thumbs::imaging::{CropRect, TargetSize, calculations::settle_crop};
/// // Already valid: unchanged
/// let crop = CropRect::new(0, 75, 800, 450);
/// assert_eq!(settle_crop(crop, (800, 600), TargetSize::new(350, 197)), crop);
///
/// // Too small: grown around its centre
/// let small = CropRect::new(100, 100, 100, 50);
/// assert_eq!(
///     settle_crop(small, (800, 600), TargetSize::new(200, 100)),
///     CropRect::new(50, 75, 200, 100)
/// );
/// ```
pub fn settle_crop(crop: CropRect, source: (u32, u32), target: TargetSize) -> CropRect {
    let (width, height) = if crop.width < target.width || crop.height < target.height {
        (target.width, target.height)
    } else {
        (crop.width, crop.height)
    };
    let width = width.clamp(1, source.0.max(1));
    let height = height.clamp(1, source.1.max(1));

    CropRect::new(
        recentre(crop.x, crop.width, width, source.0),
        recentre(crop.y, crop.height, height, source.1),
        width,
        height,
    )
}

/// Origin of a span of `len` sharing the centre of `[start, start + old_len)`,
/// kept inside `0..total`.
fn recentre(start: u32, old_len: u32, len: u32, total: u32) -> u32 {
    // Doubled coordinates keep the centre exact for odd lengths
    let doubled = 2 * start as i64 + old_len as i64 - len as i64;
    let max = total.saturating_sub(len) as i64;
    (doubled / 2).clamp(0, max) as u32
}
