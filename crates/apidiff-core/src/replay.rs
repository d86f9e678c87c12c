//! Replay of recorded Symbol Provider sessions.

use crate::addressing::parent_page_key;
use crate::errors::Result;
use crate::model::event::{resolve_map, resolve_names};
use crate::model::{ApiSet, EventLog, KeyKind, ReportEvent};
use crate::report::Reporter;

/// The compared instances declared by a log
///
/// # Errors
///
/// Returns `InvalidInput` when the log declares fewer than two instances or
/// repeats a name.
pub fn api_set(log: &EventLog) -> Result<ApiSet> {
    ApiSet::new(log.apis.clone())
}

/// Overall result of a log: the recorded value, or whether every top-level
/// page completed equal
pub fn all_equal(log: &EventLog) -> Result<bool> {
    if let Some(all_equal) = log.all_equal {
        return Ok(all_equal);
    }
    let mut all_equal = true;
    for event in &log.events {
        if let ReportEvent::Completed { position, equal } = event {
            let key = position.element_key();
            let owns_page = matches!(key.kind(), KeyKind::Module | KeyKind::Package | KeyKind::Type);
            if position.is_element() && owns_page && parent_page_key(key)?.is_none() {
                all_equal &= *equal;
            }
        }
    }
    Ok(all_equal)
}

/// Drive `reporter` with every event of `log`, then finish the run
///
/// # Errors
///
/// Stops at the first failing event: `UnknownApi` for values keyed by an
/// undeclared instance, or whatever the reporter returns.
pub fn replay(log: &EventLog, reporter: &mut impl Reporter) -> Result<()> {
    let apis = api_set(log)?;
    for (index, event) in log.events.iter().enumerate() {
        tracing::debug!(
            index,
            event = event.name(),
            position = %event.position(),
            "replaying event"
        );
        match event {
            ReportEvent::Comparing { position, values } => {
                reporter.comparing(position, resolve_map(&apis, values)?)?
            }
            ReportEvent::Completed { position, equal } => reporter.completed(position, *equal)?,
            ReportEvent::Missing { position, missing } => {
                reporter.report_missing(position, &resolve_names(&apis, missing)?)?
            }
            ReportEvent::Different { position, values } => {
                reporter.report_different(position, values.resolve(&apis)?)?
            }
        }
    }
    reporter.finish(all_equal(log)?)
}
