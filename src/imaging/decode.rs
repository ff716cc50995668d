//! In-memory decoding of sniffed image bytes.
//!
//! GIFs go through [`GifDecoder`] directly so only the first frame is read;
//! everything else is handed to the `image` crate with the sniffed format.

use super::sniff::ImageKind;
use image::codecs::gif::GifDecoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("failed to decode GIF")]
    Gif(#[source] image::ImageError),
    #[error("failed to decode {format:?} data")]
    Raster {
        format: ImageFormat,
        #[source]
        source: image::ImageError,
    },
}

/// Decode `bytes` into a static image according to `kind`.
pub fn decode(bytes: &[u8], kind: ImageKind) -> Result<DynamicImage, DecodeError> {
    match kind {
        ImageKind::Gif => decode_first_frame(bytes).map_err(DecodeError::Gif),
        ImageKind::Raster(format) => image::load_from_memory_with_format(bytes, format)
            .map_err(|source| DecodeError::Raster { format, source }),
    }
}

fn decode_first_frame(bytes: &[u8]) -> Result<DynamicImage, image::ImageError> {
    let decoder = GifDecoder::new(Cursor::new(bytes))?;
    DynamicImage::from_decoder(decoder)
}
