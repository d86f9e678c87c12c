//! Report engine: the [`Reporter`] callback protocol, the page registry that
//! implements it and the HTML rendering of completed pages.

pub mod context;
pub mod notes;
pub mod page;
pub mod registry;
pub mod render;
pub mod reporter;
pub mod writer;

pub use context::ReportContext;
pub use notes::NoteIndex;
pub use page::Page;
pub use registry::{PageId, PageRegistry};
pub use reporter::Reporter;
pub use writer::{MemoryWriter, ReportWriter};
