//! Render command
//!
//! Usage: apidiff render --events <LOG> --output <DIR> [options]

use std::path::{Path, PathBuf};
use std::time::Instant;

use apidiff_core::config::{DescriptionMode, ReportOptions};
use apidiff_core::errors::{ExError, ExErrorKind, Result};
use apidiff_core::logging_facility::{init, Profile};
use apidiff_core::model::EventLog;
use apidiff_core::replay::{api_set, replay};
use apidiff_core::report::{PageRegistry, ReportContext};
use apidiff_core::{log_op_end, log_op_error, log_op_start};
use apidiff_store::FsReportWriter;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable logs
    Dev,
    /// JSON structured logs
    Json,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Recorded event log (JSON)
    #[arg(short, long)]
    pub events: PathBuf,

    /// Output directory for the report
    #[arg(short, long)]
    pub output: PathBuf,

    /// Report options (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report title
    #[arg(long)]
    pub title: Option<String>,

    /// Context lines around text changes
    #[arg(long)]
    pub context: Option<usize>,

    /// Show line numbers in text diffs
    #[arg(long)]
    pub line_numbers: bool,

    /// Do not compare doc comments
    #[arg(long)]
    pub no_doc_comments: bool,

    /// Do not compare API descriptions
    #[arg(long)]
    pub no_descriptions: bool,

    /// Compare API descriptions as plain text instead of markup
    #[arg(long)]
    pub text_descriptions: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Dev)]
    pub log_format: LogFormat,
}

impl RenderArgs {
    /// Options from the config file, with command-line flags applied on top
    fn options(&self) -> Result<ReportOptions> {
        let mut options = match &self.config {
            Some(path) => ReportOptions::from_toml_str(&read(path, "read_config")?)
                .map_err(|e| e.with_path(path.display().to_string()))?,
            None => ReportOptions::default(),
        };
        if let Some(title) = &self.title {
            options.title = title.clone();
        }
        if let Some(context) = self.context {
            options.context_lines = context;
        }
        if self.line_numbers {
            options.line_numbers = true;
        }
        if self.no_doc_comments {
            options.compare_doc_comments = false;
        }
        if self.no_descriptions {
            options.compare_api_descriptions = false;
        }
        if self.text_descriptions {
            options.description_mode = DescriptionMode::Text;
        }
        Ok(options)
    }
}

fn read(path: &Path, op: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ExError::new(ExErrorKind::Io)
            .with_op(op)
            .with_path(path.display().to_string())
            .with_message(e.to_string())
    })
}

/// Execute render command
pub fn execute(args: RenderArgs) -> std::result::Result<(), Box<dyn std::error::Error>> {
    init(match args.log_format {
        LogFormat::Dev => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    log_op_start!("report_run", events = %args.events.display());
    let start = Instant::now();

    let index = render_report(&args).map_err(|e| {
        log_op_error!(
            "report_run",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "report_run",
        duration_ms = start.elapsed().as_millis() as u64,
        index = %index.display()
    );

    println!("Report written to {}", index.display());
    Ok(())
}

fn render_report(args: &RenderArgs) -> Result<PathBuf> {
    let options = args.options()?;
    let log = EventLog::from_json(&read(&args.events, "read_events")?)
        .map_err(|e| e.with_path(args.events.display().to_string()))?;

    let ctx = ReportContext::new(api_set(&log)?, options);
    tracing::debug!(
        run_id = %ctx.run_id,
        api_count = ctx.apis.len(),
        event_count = log.events.len(),
        "replaying event log"
    );
    let mut registry = PageRegistry::new(ctx, FsReportWriter::new(&args.output));
    replay(&log, &mut registry)?;

    let writer = registry.into_writer();
    tracing::debug!(page_count = writer.written(), "report complete");
    writer.resolve(apidiff_core::addressing::INDEX_PATH)
}
