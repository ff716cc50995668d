//! Shared test utilities for the smart-thumbs test suite.
//!
//! Synthetic image encoders (so tests never depend on checked-in binaries)
//! and input-tree builders on top of `tempfile`.
//!
//! # Usage
//!
//! ```text
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_png(&tmp.path().join("input/photo.png"), 800, 600);
//! std::fs::write(tmp.path().join("input/notes.txt"), "not an image").unwrap();
//! ```

use image::codecs::gif::GifEncoder;
use image::{DynamicImage, Frame, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;

// =========================================================================
// Pixel sources
// =========================================================================

/// Deterministic gradient with enough texture for the analyzer to score.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

// =========================================================================
// In-memory encoders
// =========================================================================

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format).unwrap();
    buf.into_inner()
}

pub fn encode_png(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Png)
}

pub fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgb8(gradient(width, height)), ImageFormat::Jpeg)
}

/// GIF with one solid-colour frame per entry of `frames`.
pub fn encode_gif(width: u32, height: u32, frames: &[[u8; 4]]) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new(&mut bytes);
        encoder
            .encode_frames(
                frames
                    .iter()
                    .map(|c| Frame::new(RgbaImage::from_pixel(width, height, Rgba(*c)))),
            )
            .unwrap();
    }
    bytes
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Write `bytes` to `path`, creating parent directories.
pub fn write_file(path: &Path, bytes: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, bytes).unwrap();
}

pub fn write_png(path: &Path, width: u32, height: u32) {
    write_file(path, &encode_png(width, height));
}

pub fn write_jpeg(path: &Path, width: u32, height: u32) {
    write_file(path, &encode_jpeg(width, height));
}

pub fn write_gif(path: &Path, width: u32, height: u32, frames: &[[u8; 4]]) {
    write_file(path, &encode_gif(width, height, frames));
}

/// Sorted file names directly inside `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
