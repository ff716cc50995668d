//! Run configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; an optional `config.toml` in the input root is merged on
//! top; command-line flags are applied last.
//!
//! ## Config File Location
//!
//! ```text
//! input/
//! ├── config.toml          # Optional (overrides stock defaults)
//! ├── photo.png
//! └── trips/
//!     └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [thumbnail]
//! width = 350               # Output width in pixels (-w overrides)
//! height = 197              # Output height in pixels (-h overrides)
//!
//! [processing]
//! on_error = "abort"        # "abort" or "skip" (--keep-going sets "skip")
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [thumbnail]
//! width = 160
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::TargetSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config.toml")]
    Io(#[from] std::io::Error),
    #[error("invalid config.toml")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Run configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbsConfig {
    /// Output dimensions.
    pub thumbnail: ThumbnailConfig,
    /// Failure handling.
    pub processing: ProcessingConfig,
}

/// Thumbnail output dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThumbnailConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        let target = TargetSize::default();
        Self {
            width: target.width,
            height: target.height,
        }
    }
}

/// What a per-file failure does to the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// First failure stops the batch.
    #[default]
    Abort,
    /// Report the failure, continue with the next file, fail at the end.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    pub on_error: ErrorPolicy,
}

/// Command-line values that win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// `--keep-going`: forces [`ErrorPolicy::Skip`]. Absent leaves the file value.
    pub keep_going: bool,
}

impl ThumbsConfig {
    pub fn target(&self) -> TargetSize {
        TargetSize::new(self.thumbnail.width, self.thumbnail.height)
    }

    /// Apply command-line overrides, then re-validate.
    pub fn apply_overrides(mut self, overrides: &Overrides) -> Result<Self, ConfigError> {
        if let Some(width) = overrides.width {
            self.thumbnail.width = width;
        }
        if let Some(height) = overrides.height {
            self.thumbnail.height = height;
        }
        if overrides.keep_going {
            self.processing.on_error = ErrorPolicy::Skip;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(ConfigError::Validation(
                "thumbnail.width and thumbnail.height must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(ThumbsConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ThumbsConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ThumbsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the input root.
///
/// A missing input root is not an error here; the walk reports it.
pub fn load_config(input_root: &Path) -> Result<ThumbsConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(input_root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# smart-thumbs configuration
# ==========================
# Place this file at <input>/config.toml. All settings are optional;
# remove any you don't need. Values shown below are the defaults.
# Unknown keys will cause an error. -w/-h/--keep-going override this file.

# ---------------------------------------------------------------------------
# Output thumbnail size in pixels. Sources smaller than this on either axis
# cannot be thumbnailed.
# ---------------------------------------------------------------------------
[thumbnail]
width = 350
height = 197

# ---------------------------------------------------------------------------
# Failure handling: "abort" stops at the first bad file; "skip" reports it,
# carries on, and exits non-zero at the end.
# ---------------------------------------------------------------------------
[processing]
on_error = "abort"
"##
}
