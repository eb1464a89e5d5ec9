//! File-level image operations, free of any terminal interaction.
//!
//! Every operation here validates its inputs up front and returns a typed
//! error for conditions the caller must abort on. Per-item codec failures
//! inside batch operations are logged and counted instead, so one bad file
//! never aborts a batch.

pub mod convert;
pub mod format;
pub mod pack;
pub mod recolor;

use std::path::PathBuf;
use thiserror::Error;

/// Early validation failures that abort an operation before any side effect.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("input file does not exist or is not a regular file: {0}")]
    MissingInput(PathBuf),

    #[error("source directory does not exist: {0}")]
    MissingSource(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("no image files found under {0} (supported: .png, .bmp)")]
    EmptyManifest(PathBuf),
}
