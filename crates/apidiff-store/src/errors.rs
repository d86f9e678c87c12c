//! Error handling for apidiff-store
//!
//! Wraps apidiff-core ExError with I/O specific helpers

use std::path::Path;

use apidiff_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for `operation` on `path`
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an error for a report path that would escape the output root
pub fn unsafe_path(path: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("resolve_output_path")
        .with_path(path.to_string())
        .with_message("report paths must be relative and stay inside the output directory")
}
