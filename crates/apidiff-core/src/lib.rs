//! Multi-way API comparison report engine.
//!
//! A Symbol Provider drives a [`report::Reporter`] with `comparing`,
//! `completed`, `report_missing` and `report_different*` callbacks in
//! children-before-parents order. The [`report::PageRegistry`] routes each
//! callback to the page that owns it, renders every page once its own key
//! completes, and rolls change counts up through the page hierarchy.

pub mod addressing;
pub mod config;
pub mod errors;
pub mod grouping;
pub mod html;
pub mod logging_facility;
pub mod markup;
pub mod model;
pub mod replay;
pub mod report;
pub mod textdiff;

// Re-exported for the logging macros
pub use apidiff_core_types;

pub use errors::{ExError, ExErrorKind, Result};
pub use model::{ApiMap, ApiSet, ElementKey, Position};
pub use report::{PageRegistry, ReportContext, Reporter};
