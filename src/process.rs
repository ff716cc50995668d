//! Batch thumbnail generation.
//!
//! Walks the input tree and, for each file, runs the pipeline:
//!
//! ```text
//! read bytes → sniff → decode → find crop → crop + scale → write JPEG
//!                 │
//!                 └─ not an image: skipped silently
//! ```
//!
//! Files are handled one at a time in walk order; a file is fully written
//! before the walker advances. Nothing is cached between files or runs, and
//! existing outputs are overwritten.
//!
//! ## Output Structure
//!
//! The output directory is flat. Subdirectory structure is discarded:
//!
//! ```text
//! input/                      output/
//! ├── photo.png          →    ├── photo_thumb.jpg
//! ├── notes.txt               │   (not an image: skipped)
//! └── trips/
//!     └── beach.v2.jpg   →    └── beach.v2_thumb.jpg
//! ```
//!
//! Two sources with the same stem in different directories map to the same
//! output name; the later one in walk order wins.
//!
//! ## Failure Handling
//!
//! Under [`ErrorPolicy::Abort`] the first read, decode, crop or write failure
//! ends the run. Under [`ErrorPolicy::Skip`] the failure is reported as a
//! [`ProcessEvent::Failed`] and the run continues; [`process`] then returns
//! [`ProcessError::FilesFailed`] once the walk is done. Walk failures are
//! always fatal, and an unusable input root fails before the output directory
//! is created.

use crate::config::{ErrorPolicy, ThumbsConfig};
use crate::imaging::{
    BackendError, CropRect, ImageBackend, RustBackend, TargetSize, plan_thumbnail, sniff,
};
use crate::walk::{WalkError, walk_files};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("cannot open input directory {path}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Walk(#[from] WalkError),
    #[error("cannot create output directory {path}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot thumbnail {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
    #[error("{0} file(s) could not be thumbnailed")]
    FilesFailed(usize),
}

/// Everything one run needs, built once at startup.
#[derive(Debug, Clone)]
pub struct ProcessConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub target: TargetSize,
    pub on_error: ErrorPolicy,
}

impl ProcessConfig {
    pub fn new(config: &ThumbsConfig, input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            target: config.target(),
            on_error: config.processing.on_error,
        }
    }
}

/// Progress reported while the run is in flight.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessEvent {
    /// The crop finder picked a region of `source`.
    CropSelected { source: PathBuf, crop: CropRect },
    /// About to write a thumbnail.
    Writing { output: PathBuf },
    /// Not an image.
    Skipped { source: PathBuf },
    /// Per-file failure under [`ErrorPolicy::Skip`]; `error` is the full cause chain.
    Failed { source: PathBuf, error: String },
    /// The walk completed.
    Finished(ProcessSummary),
}

/// Counts for a completed walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSummary {
    /// Thumbnails written, in walk order.
    pub written: Vec<PathBuf>,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for ProcessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let written = self.written.len();
        write!(
            f,
            "Wrote {} thumbnail{}, skipped {} file{}",
            written,
            if written == 1 { "" } else { "s" },
            self.skipped,
            if self.skipped == 1 { "" } else { "s" },
        )?;
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        Ok(())
    }
}

/// Run the batch with the production backend.
pub fn process(
    config: &ProcessConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessSummary, ProcessError> {
    process_with_backend(&RustBackend::new(), config, events)
}

/// Run the batch using a specific backend (allows testing with mock).
pub fn process_with_backend(
    backend: &impl ImageBackend,
    config: &ProcessConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessSummary, ProcessError> {
    let emit = |event: ProcessEvent| {
        if let Some(tx) = &events {
            // A closed receiver only loses progress output
            tx.send(event).ok();
        }
    };

    // Nothing is created when the input root is unusable
    std::fs::metadata(&config.input).map_err(|source| ProcessError::InputDir {
        path: config.input.clone(),
        source,
    })?;
    std::fs::create_dir_all(&config.output).map_err(|source| ProcessError::OutputDir {
        path: config.output.clone(),
        source,
    })?;
    let exclude = config.output.canonicalize().ok();

    let mut summary = ProcessSummary::default();
    for entry in walk_files(&config.input, exclude.as_deref()) {
        let path = entry?;
        match process_file(backend, &path, config, &emit) {
            Ok(Some(output)) => summary.written.push(output),
            Ok(None) => {
                summary.skipped += 1;
                emit(ProcessEvent::Skipped { source: path });
            }
            Err(err) if config.on_error == ErrorPolicy::Skip => {
                summary.failed += 1;
                emit(ProcessEvent::Failed {
                    source: path,
                    error: error_chain(&err),
                });
            }
            Err(err) => return Err(err),
        }
    }

    emit(ProcessEvent::Finished(summary.clone()));
    match summary.failed {
        0 => Ok(summary),
        n => Err(ProcessError::FilesFailed(n)),
    }
}

/// One file through the pipeline. `Ok(None)` means "not an image".
fn process_file(
    backend: &impl ImageBackend,
    path: &Path,
    config: &ProcessConfig,
    emit: &impl Fn(ProcessEvent),
) -> Result<Option<PathBuf>, ProcessError> {
    let bytes = std::fs::read(path).map_err(|source| ProcessError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let Some(kind) = sniff(&bytes) else {
        return Ok(None);
    };

    let image_error = |source: BackendError| ProcessError::Image {
        path: path.to_path_buf(),
        source,
    };

    let image = backend.decode(&bytes, kind).map_err(image_error)?;
    drop(bytes);

    let crop = backend
        .find_crop(&image, config.target)
        .map_err(image_error)?;
    emit(ProcessEvent::CropSelected {
        source: path.to_path_buf(),
        crop,
    });

    let params = plan_thumbnail(path, &config.output, crop, config.target);
    emit(ProcessEvent::Writing {
        output: params.output.clone(),
    });
    backend.thumbnail(&image, &params).map_err(image_error)?;

    Ok(Some(params.output))
}

/// `top: cause: root cause`, for single-line reporting.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
