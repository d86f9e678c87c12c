use std::collections::BTreeMap;

use crate::errors::Result;

/// Destination for rendered report files
///
/// Paths are relative to the report root and always use `/` separators.
pub trait ReportWriter {
    /// Write one complete file
    ///
    /// # Errors
    ///
    /// Implementations return `Io` when the file cannot be written; the run
    /// stops at the first failure.
    fn write(&mut self, path: &str, contents: &str) -> Result<()>;
}

impl<W: ReportWriter + ?Sized> ReportWriter for &mut W {
    fn write(&mut self, path: &str, contents: &str) -> Result<()> {
        (**self).write(path, contents)
    }
}

/// In-memory writer keeping every file by path
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    files: BTreeMap<String, String>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ReportWriter for MemoryWriter {
    fn write(&mut self, path: &str, contents: &str) -> Result<()> {
        self.files.insert(path.to_string(), contents.to_string());
        Ok(())
    }
}
