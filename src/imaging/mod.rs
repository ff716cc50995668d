//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Sniff** | `image::guess_format` (magic bytes) |
//! | **Decode** | `image` decoders, GIF first frame via `GifDecoder` |
//! | **Crop selection** | `smartcrop::Analyzer` behind [`SaliencyAnalyzer`] |
//! | **Thumbnail** | `crop_imm` + Lanczos3 `resize` + JPEG q80 |
//!
//! The module is split into:
//! - **Sniff / Decode**: bytes → [`ImageKind`] → `DynamicImage`
//! - **Calculations**: Pure functions for crop geometry (unit testable)
//! - **Crop / Analyzer**: [`CropFinder`] seam + the `smartcrop` adapter
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Pixel work and output naming used by the backend

pub mod analyzer;
pub mod backend;
pub mod calculations;
pub mod crop;
pub mod decode;
pub mod operations;
mod params;
pub mod rust_backend;
pub mod sniff;

pub use analyzer::SaliencyAnalyzer;
pub use backend::{BackendError, ImageBackend};
pub use crop::{CropError, CropFinder, CropRect};
pub use decode::DecodeError;
pub use operations::{crop_and_scale, plan_thumbnail, thumbnail_file_name, write_jpeg};
pub use params::{Quality, THUMBNAIL_QUALITY, TargetSize, ThumbnailParams};
pub use rust_backend::RustBackend;
pub use sniff::{ImageKind, sniff};
