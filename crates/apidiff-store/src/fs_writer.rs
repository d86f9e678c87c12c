//! Filesystem report writer
//!
//! Resolves `/`-separated report paths under an output root and writes each
//! file atomically.

use std::path::{Component, Path, PathBuf};

use apidiff_core::report::ReportWriter;

use crate::atomic::atomic_write;
use crate::errors::{unsafe_path, Result};

/// Report writer rooted at an output directory
pub struct FsReportWriter {
    root: PathBuf,
    written: usize,
}

impl FsReportWriter {
    /// Create a writer for the given output directory
    ///
    /// The directory is created on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: 0,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of files written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Filesystem location of a report path
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for absolute paths and paths with empty, `.`
    /// or `..` segments.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let plain = !path.is_empty()
            && path
                .split('/')
                .all(|segment| !segment.is_empty() && segment != "." && segment != "..")
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !plain {
            return Err(unsafe_path(path));
        }
        Ok(self.root.join(relative))
    }
}

impl ReportWriter for FsReportWriter {
    fn write(&mut self, path: &str, contents: &str) -> Result<()> {
        let target = self.resolve(path)?;
        atomic_write(&target, contents.as_bytes())?;
        self.written += 1;
        tracing::debug!(path, bytes = contents.len(), "wrote report file");
        Ok(())
    }
}
