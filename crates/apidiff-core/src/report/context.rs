use apidiff_core_types::RunId;
use chrono::{DateTime, Utc};

use crate::config::ReportOptions;
use crate::model::ApiSet;
use crate::textdiff::LayoutOptions;

/// Everything one report run shares: the compared instances, the options
/// and the run identity
///
/// Created once per run and passed to every component; nothing outlives it.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub apis: ApiSet,
    pub options: ReportOptions,
    pub run_id: RunId,
    pub generated_at: DateTime<Utc>,
}

impl ReportContext {
    pub fn new(apis: ApiSet, options: ReportOptions) -> Self {
        Self {
            apis,
            options,
            run_id: RunId::new(),
            generated_at: Utc::now(),
        }
    }

    /// Fix the generation time, for reproducible output
    pub fn with_generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            context: self.options.context_lines,
            line_numbers: self.options.line_numbers,
        }
    }
}
