//! Run-report output
//!
//! The report summarizes what was resolved and what was checked; the
//! linter's own findings pass through on stderr/stdout as they happen.

mod console;
mod json;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::git::{CommitRange, SkipReason};
use crate::lint::LintOutcome;
use std::io::Write;

pub use console::ConsoleExporter;
pub use json::JsonExporter;

/// Summary of one rangelint run
#[derive(Debug, Clone)]
pub struct RunReport {
    /// CI provider that supplied the execution context
    pub provider: &'static str,
    /// Set when resolution short-circuited without a range
    pub skipped: Option<SkipReason>,
    /// The resolved range, when one was computed
    pub range: Option<CommitRange>,
    /// Per-group lint results; None on the skip paths
    pub outcome: Option<LintOutcome>,
    /// Whether the linter was deliberately not invoked
    pub dry_run: bool,
}

impl RunReport {
    pub fn skipped(provider: &'static str, reason: SkipReason) -> Self {
        Self {
            provider,
            skipped: Some(reason),
            range: None,
            outcome: None,
            dry_run: false,
        }
    }

    pub fn linted(
        provider: &'static str,
        range: CommitRange,
        outcome: LintOutcome,
        dry_run: bool,
    ) -> Self {
        Self {
            provider,
            skipped: None,
            range: Some(range),
            outcome: Some(outcome),
            dry_run,
        }
    }

    /// True unless some lint group reported violations
    pub fn passed(&self) -> bool {
        self.outcome.as_ref().map_or(true, LintOutcome::passed)
    }
}

/// Trait for output formatting
pub trait Exporter {
    /// Write the complete report for the run
    fn export(&self, report: &RunReport, writer: &mut dyn Write) -> Result<()>;
}

/// Create an appropriate exporter based on configuration
pub fn create_exporter(format: OutputFormat) -> Box<dyn Exporter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleExporter),
        OutputFormat::Json => Box::new(JsonExporter),
    }
}
