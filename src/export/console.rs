//! Console (human-readable) exporter

use crate::error::Result;
use crate::export::{Exporter, RunReport};
use std::io::Write;

/// Human-readable run report
pub struct ConsoleExporter;

impl Exporter for ConsoleExporter {
    fn export(&self, report: &RunReport, writer: &mut dyn Write) -> Result<()> {
        if let Some(reason) = report.skipped {
            writeln!(writer, "Skipped: {}", reason.describe())?;
            return Ok(());
        }

        if let Some(range) = &report.range {
            writeln!(writer, "Commit range: {}", range)?;
        }

        let Some(outcome) = &report.outcome else {
            return Ok(());
        };

        for group in &outcome.groups {
            let verdict = match group.passed {
                Some(true) => "passed",
                Some(false) => "FAILED",
                None if group.files.is_empty() => "no files",
                None => "not checked",
            };
            writeln!(
                writer,
                "Group '{}': {} file(s), {}",
                group.name,
                group.files.len(),
                verdict
            )?;
            for file in &group.files {
                writeln!(writer, "    {}", file)?;
            }
        }

        if outcome.groups.iter().all(|g| g.files.is_empty()) {
            writeln!(writer, "No files changed in range, nothing to check")?;
        } else if report.dry_run {
            writeln!(writer, "Dry run, linter not invoked")?;
        } else if report.passed() {
            writeln!(writer, "Style check passed")?;
        } else {
            writeln!(writer, "Style check failed, see linter output above")?;
        }

        Ok(())
    }
}
