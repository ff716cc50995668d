//! High-level image operations.
//!
//! Pixel work for the production backend (crop + Lanczos3 scale, JPEG
//! encode) and the pure planning step that turns a chosen crop into
//! [`ThumbnailParams`].

use super::backend::BackendError;
use super::crop::CropRect;
use super::params::{Quality, THUMBNAIL_QUALITY, TargetSize, ThumbnailParams};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Suffix appended to the source stem.
pub const THUMBNAIL_SUFFIX: &str = "_thumb.jpg";

/// Cut `crop` out of `image` and resample it to exactly `target`.
///
/// The crop is a borrowed view; only the scaled result is allocated.
pub fn crop_and_scale(image: &DynamicImage, crop: CropRect, target: TargetSize) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    if !crop.fits_within(width, height) {
        return Err(BackendError::ProcessingFailed(format!(
            "crop {crop} lies outside the {width}x{height} image"
        )));
    }
    if target.is_empty() {
        return Err(BackendError::ProcessingFailed(format!(
            "cannot scale to {target}"
        )));
    }

    let view = imageops::crop_imm(image, crop.x, crop.y, crop.width, crop.height);
    let scaled = imageops::resize(&*view, target.width, target.height, FilterType::Lanczos3);
    Ok(DynamicImage::ImageRgba8(scaled).into_rgb8())
}

/// Encode `image` as JPEG at `quality`, creating or truncating `path`.
pub fn write_jpeg(image: &RgbImage, path: &Path, quality: Quality) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.value() as u8);
    image
        .write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("JPEG encode failed: {e}")))?;
    writer.flush()?;
    Ok(())
}

/// Output file name for `source`: base name minus its last extension, plus
/// [`THUMBNAIL_SUFFIX`].
///
/// ```
/// # use smart_thumbs::imaging::thumbnail_file_name;
/// # use std::path::Path;
/// assert_eq!(thumbnail_file_name(Path::new("a/b/photo.png")), "photo_thumb.jpg");
/// assert_eq!(thumbnail_file_name(Path::new("archive.tar.gz")), "archive.tar_thumb.jpg");
/// assert_eq!(thumbnail_file_name(Path::new(".hidden")), "_thumb.jpg");
/// ```
pub fn thumbnail_file_name(source: &Path) -> String {
    let base = source
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let stem = match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => &base[..],
    };
    format!("{stem}{THUMBNAIL_SUFFIX}")
}

/// Plan the thumbnail for `source` without executing it.
pub fn plan_thumbnail(
    source: &Path,
    output_dir: &Path,
    crop: CropRect,
    target: TargetSize,
) -> ThumbnailParams {
    ThumbnailParams {
        output: output_dir.join(thumbnail_file_name(source)),
        crop,
        target,
        quality: THUMBNAIL_QUALITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn two_halves(width: u32, height: u32) -> DynamicImage {
        // Left half red, right half blue
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([255, 0, 0])
            } else {
                Rgb([0, 0, 255])
            }
        }))
    }

    // =========================================================================
    // crop_and_scale tests
    // =========================================================================

    #[test]
    fn crop_and_scale_hits_exact_target() {
        let img = two_halves(800, 600);
        let out = crop_and_scale(&img, CropRect::new(0, 75, 800, 450), TargetSize::new(350, 197))
            .unwrap();
        assert_eq!(out.dimensions(), (350, 197));
    }

    #[test]
    fn crop_and_scale_uses_only_the_crop() {
        let img = two_halves(200, 100);
        // Right half only → entirely blue
        let out =
            crop_and_scale(&img, CropRect::new(100, 0, 100, 100), TargetSize::new(20, 20)).unwrap();
        assert!(out.pixels().all(|p| p.0[2] > 200 && p.0[0] < 50));
    }

    #[test]
    fn crop_and_scale_rejects_out_of_bounds() {
        let img = two_halves(100, 100);
        let result = crop_and_scale(&img, CropRect::new(50, 0, 60, 10), TargetSize::new(5, 5));
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }

    #[test]
    fn crop_and_scale_rejects_empty_target() {
        let img = two_halves(100, 100);
        let result = crop_and_scale(&img, CropRect::new(0, 0, 10, 10), TargetSize::new(0, 5));
        assert!(result.is_err());
    }

    // =========================================================================
    // write_jpeg tests
    // =========================================================================

    #[test]
    fn write_jpeg_produces_decodable_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out_thumb.jpg");
        let img = RgbImage::from_pixel(35, 20, Rgb([10, 200, 30]));

        write_jpeg(&img, &path, THUMBNAIL_QUALITY).unwrap();

        assert_eq!(image::image_dimensions(&path).unwrap(), (35, 20));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn write_jpeg_truncates_existing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out_thumb.jpg");
        std::fs::write(&path, vec![0u8; 1 << 20]).unwrap();

        write_jpeg(&RgbImage::new(8, 8), &path, THUMBNAIL_QUALITY).unwrap();

        assert!(std::fs::metadata(&path).unwrap().len() < 1 << 20);
        assert_eq!(image::image_dimensions(&path).unwrap(), (8, 8));
    }

    #[test]
    fn write_jpeg_missing_directory_is_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("x_thumb.jpg");
        let result = write_jpeg(&RgbImage::new(4, 4), &path, THUMBNAIL_QUALITY);
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    // =========================================================================
    // naming / planning tests
    // =========================================================================

    #[test]
    fn file_name_strips_last_extension_only() {
        assert_eq!(thumbnail_file_name(Path::new("photo.png")), "photo_thumb.jpg");
        assert_eq!(
            thumbnail_file_name(Path::new("my.holiday.jpeg")),
            "my.holiday_thumb.jpg"
        );
    }

    #[test]
    fn file_name_without_extension() {
        assert_eq!(thumbnail_file_name(Path::new("in/README")), "README_thumb.jpg");
    }

    #[test]
    fn file_name_keeps_trailing_dot_stem() {
        assert_eq!(thumbnail_file_name(Path::new("odd.")), "odd_thumb.jpg");
    }

    #[test]
    fn file_name_leading_dot_loses_everything() {
        assert_eq!(thumbnail_file_name(Path::new("/x/.hidden")), "_thumb.jpg");
    }

    #[test]
    fn plan_flattens_into_output_dir() {
        let params = plan_thumbnail(
            Path::new("/in/a/b/deep.gif"),
            Path::new("/out"),
            CropRect::new(0, 0, 350, 197),
            TargetSize::default(),
        );
        assert_eq!(params.output, Path::new("/out/deep_thumb.jpg"));
        assert_eq!(params.quality, THUMBNAIL_QUALITY);
        assert_eq!(params.target, TargetSize::new(350, 197));
    }
}
