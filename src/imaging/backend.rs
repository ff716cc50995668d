//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three pixel operations the
//! thumbnail pipeline needs: decode, find_crop, and thumbnail (crop + scale +
//! encode). The pipeline in [`process`](crate::process) only talks to this
//! trait, so tests can swap in the recording mock below.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, statically
//! linked, generic over the [`CropFinder`](super::crop::CropFinder) it uses.

use super::crop::{CropError, CropRect};
use super::decode::DecodeError;
use super::params::{TargetSize, ThumbnailParams};
use super::sniff::ImageKind;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("I/O failure")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image processing backends.
pub trait ImageBackend {
    /// Decode raw bytes whose format has already been sniffed.
    fn decode(&self, bytes: &[u8], kind: ImageKind) -> Result<DynamicImage, BackendError>;

    /// Choose the region of `image` that becomes the thumbnail.
    fn find_crop(&self, image: &DynamicImage, target: TargetSize)
    -> Result<CropRect, BackendError>;

    /// Crop, scale to the exact target size, and write the encoded thumbnail.
    fn thumbnail(&self, image: &DynamicImage, params: &ThumbnailParams)
    -> Result<(), BackendError>;
}
