//! apidiff store - filesystem output for report runs
//!
//! Provides:
//! - `FsReportWriter`, a `ReportWriter` rooted at an output directory
//! - Atomic temp→rename file writes
//! - I/O error helpers mapping `std::io::Error` into `ExError`

pub mod atomic;
pub mod errors;
pub mod fs_writer;

pub use errors::Result;
pub use fs_writer::FsReportWriter;
