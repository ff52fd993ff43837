//! JSON exporter

use crate::error::{RangeLintError, Result};
use crate::export::{Exporter, RunReport};
use serde::Serialize;
use std::io::Write;

/// JSON run-report exporter
pub struct JsonExporter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    provider: &'a str,
    skipped: Option<&'a str>,
    range: Option<JsonRange<'a>>,
    groups: Vec<JsonGroup<'a>>,
    passed: bool,
    dry_run: bool,
}

#[derive(Serialize)]
struct JsonRange<'a> {
    base: &'a str,
    head: &'a str,
}

#[derive(Serialize)]
struct JsonGroup<'a> {
    name: &'a str,
    files: &'a [String],
    /// null when the group was empty or the linter was not run
    passed: Option<bool>,
}

impl Exporter for JsonExporter {
    fn export(&self, report: &RunReport, writer: &mut dyn Write) -> Result<()> {
        let groups = report
            .outcome
            .as_ref()
            .map(|outcome| {
                outcome
                    .groups
                    .iter()
                    .map(|g| JsonGroup {
                        name: g.name,
                        files: &g.files,
                        passed: g.passed,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let output = JsonOutput {
            provider: report.provider,
            skipped: report.skipped.map(|r| r.describe()),
            range: report.range.as_ref().map(|r| JsonRange {
                base: &r.base,
                head: &r.head,
            }),
            groups,
            passed: report.passed(),
            dry_run: report.dry_run,
        };

        let json = serde_json::to_string_pretty(&output)
            .map_err(|e| RangeLintError::Other(e.to_string()))?;
        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
