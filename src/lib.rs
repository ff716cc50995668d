//! # smart-thumbs
//!
//! A batch thumbnail generator. Point it at a directory of images and it
//! writes one JPEG per image, cut from the most interesting region of the
//! source at the requested aspect ratio.
//!
//! # Architecture: One Sequential Pipeline
//!
//! Each file flows through the same six steps before the next file starts:
//!
//! ```text
//! 1. Walk      input/      →  path           (ordered, lazy)
//! 2. Sniff     bytes       →  ImageKind      (magic bytes; non-images skipped)
//! 3. Decode    bytes       →  DynamicImage   (GIF: first frame)
//! 4. Analyze   image       →  CropRect       (smartcrop saliency search)
//! 5. Scale     crop view   →  RgbImage       (Lanczos3, exact target size)
//! 6. Write     RgbImage    →  output/<stem>_thumb.jpg (quality 80)
//! ```
//!
//! Steps 3–6 sit behind the [`imaging::ImageBackend`] trait so the pipeline
//! logic in [`process`] is testable with a recording mock and no pixels.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`walk`] | Ordered, lazy traversal of the input tree |
//! | [`imaging`] | Sniffing, decoding, saliency crop search, scaling, JPEG encoding |
//! | [`process`] | Orchestrates one run; emits progress events; applies the error policy |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation, CLI overrides |
//! | [`output`] | CLI output formatting for progress events and error chains |
//!
//! # Design Decisions
//!
//! ## Content Decides, Not Extensions
//!
//! A file is an image if its leading bytes say so. `photo.jpg` containing
//! text is skipped; `scan.dat` containing a PNG is thumbnailed.
//!
//! ## Deterministic Crops
//!
//! `smartcrop` has no randomness and the analyzer always runs with its stock
//! settings, so the same input always yields the same crop and the same bytes.
//! Reruns overwrite outputs with identical files.
//!
//! ## Never Upscale
//!
//! A target larger than the source on either axis is an error rather than a
//! blurry thumbnail. A suggested crop smaller than the target is grown to
//! the target size around its centre before scaling.
//!
//! ## Fail Fast by Default
//!
//! The first failing file stops the run. `--keep-going` (or
//! `processing.on_error = "skip"`) reports failures and carries on, still
//! exiting non-zero at the end.
//!
//! ## Pure-Rust Imaging
//!
//! Every codec and the resampling kernel come from the `image` crate, and
//! crop analysis from `smartcrop`. The binary has no system library
//! dependencies.

pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod walk;

#[cfg(test)]
pub(crate) mod test_helpers;
