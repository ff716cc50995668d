//! Pure Rust image processing backend — no system libraries.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, BMP) | `image::load_from_memory_with_format` |
//! | Decode (GIF, first frame) | `image::codecs::gif::GifDecoder` |
//! | Crop selection | any [`CropFinder`], `smartcrop` via [`SaliencyAnalyzer`] by default |
//! | Crop | `image::imageops::crop_imm` (borrowed view) |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder`, quality 80 |

use super::analyzer::SaliencyAnalyzer;
use super::backend::{BackendError, ImageBackend};
use super::crop::{CropFinder, CropRect};
use super::decode;
use super::operations::{crop_and_scale, write_jpeg};
use super::params::{TargetSize, ThumbnailParams};
use super::sniff::ImageKind;
use image::DynamicImage;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend<F = SaliencyAnalyzer> {
    finder: F,
}

impl RustBackend {
    pub fn new() -> Self {
        Self::with_finder(SaliencyAnalyzer::default())
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: CropFinder> RustBackend<F> {
    pub fn with_finder(finder: F) -> Self {
        Self { finder }
    }
}

impl<F: CropFinder> ImageBackend for RustBackend<F> {
    fn decode(&self, bytes: &[u8], kind: ImageKind) -> Result<DynamicImage, BackendError> {
        Ok(decode::decode(bytes, kind)?)
    }

    fn find_crop(
        &self,
        image: &DynamicImage,
        target: TargetSize,
    ) -> Result<CropRect, BackendError> {
        Ok(self.finder.find_best_crop(image, target)?)
    }

    fn thumbnail(
        &self,
        image: &DynamicImage,
        params: &ThumbnailParams,
    ) -> Result<(), BackendError> {
        let thumb = crop_and_scale(image, params.crop, params.target)?;
        write_jpeg(&thumb, &params.output, params.quality)
    }
}
