//! Magic-byte format detection.
//!
//! The file extension is never consulted: a PNG named `notes.txt` is an
//! image, a text file named `photo.jpg` is not.

use image::ImageFormat;

/// What the leading bytes say a file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// Decoded with the GIF decoder, first frame only.
    Gif,
    /// Any other recognized raster format.
    Raster(ImageFormat),
}

/// Identify image content from its header. `None` means "not an image".
pub fn sniff(bytes: &[u8]) -> Option<ImageKind> {
    match image::guess_format(bytes).ok()? {
        ImageFormat::Gif => Some(ImageKind::Gif),
        other => Some(ImageKind::Raster(other)),
    }
}
