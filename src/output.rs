//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Process
//!
//! One pair of lines per thumbnail, then a summary once the walk completes:
//!
//! ```text
//! Selected crop: (0,75)-(800,525)
//! Writing output/photo_thumb.jpg
//! Wrote 1 thumbnail, skipped 1 file
//! ```
//!
//! Non-images print nothing. Under `--keep-going` a failed file prints a
//! single `Failed:` line with its cause chain.
//!
//! ## Errors
//!
//! ```text
//! Error: cannot thumbnail input/photo.png
//!   caused by: target size 4000x3000 exceeds source image 800x600
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout or stderr.
//! Format functions are pure and do no I/O.

use crate::process::ProcessEvent;
use std::error::Error;

// ============================================================================
// Process output
// ============================================================================

/// Format a single process progress event as display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::CropSelected { crop, .. } => vec![format!("Selected crop: {crop}")],
        ProcessEvent::Writing { output } => vec![format!("Writing {}", output.display())],
        ProcessEvent::Skipped { .. } => Vec::new(),
        ProcessEvent::Failed { source, error } => {
            vec![format!("Failed: {} ({error})", source.display())]
        }
        ProcessEvent::Finished(summary) => vec![summary.to_string()],
    }
}

/// Print a process event to stdout.
pub fn print_process_event(event: &ProcessEvent) {
    for line in format_process_event(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Error output
// ============================================================================

/// Format an error and its chain of causes, outermost first.
pub fn format_error(err: &dyn Error) -> Vec<String> {
    let mut lines = vec![format!("Error: {err}")];
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("  caused by: {cause}"));
        source = cause.source();
    }
    lines
}

/// Print an error chain to stderr.
pub fn print_error(err: &dyn Error) {
    for line in format_error(err) {
        eprintln!("{}", line);
    }
}
