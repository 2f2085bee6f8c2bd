//! Error handling for the colsync binary.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Convenient result type for colsync operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running colsync.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read an input file.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Configuration parsing or validation errors.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),
    /// Snapshot or document errors.
    #[error("Document error: {0}")]
    Document(#[from] column_sync::Error),
    /// Failed to build the async runtime.
    #[error("Runtime error: {0}")]
    Runtime(io::Error),
}
