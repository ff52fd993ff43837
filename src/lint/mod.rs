//! File-set partitioning and style-checker invocation
//!
//! Files modified in the resolved range are split into two groups by a path
//! prefix; each non-empty group gets one linter invocation with its own
//! configuration. File paths are passed as separate arguments, never as an
//! interpolated string.

use crate::config::Config;
use crate::error::{RangeLintError, Result};
use std::process::Command;

/// Modified files split by the examples prefix into two disjoint groups
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileGroups {
    /// Files outside the examples prefix
    pub main: Vec<String>,
    /// Files under the examples prefix, checked with a relaxed configuration
    pub examples: Vec<String>,
}

impl FileGroups {
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.examples.is_empty()
    }

    pub fn total(&self) -> usize {
        self.main.len() + self.examples.len()
    }
}

/// Partition modified files by prefix, preserving diff order within groups
pub fn partition(files: Vec<String>, prefix: &str) -> FileGroups {
    let mut groups = FileGroups::default();
    for file in files {
        if file.starts_with(prefix) {
            groups.examples.push(file);
        } else {
            groups.main.push(file);
        }
    }
    groups
}

/// Result of one linter invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupResult {
    /// Group label ("main" or "examples")
    pub name: &'static str,
    /// Files checked in this group
    pub files: Vec<String>,
    /// Whether the linter reported no violations. None when the group was
    /// empty or the run was a dry run.
    pub passed: Option<bool>,
}

impl GroupResult {
    fn unchecked(name: &'static str, files: Vec<String>) -> Self {
        Self {
            name,
            files,
            passed: None,
        }
    }
}

/// Outcome of linting all groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOutcome {
    pub groups: Vec<GroupResult>,
}

impl LintOutcome {
    /// True when no group reported violations
    pub fn passed(&self) -> bool {
        self.groups.iter().all(|g| g.passed != Some(false))
    }

    /// Groups without any linter run (dry run), for reporting
    pub fn unchecked(groups: FileGroups) -> Self {
        Self {
            groups: vec![
                GroupResult::unchecked("main", groups.main),
                GroupResult::unchecked("examples", groups.examples),
            ],
        }
    }
}

/// Run the configured style checker once per non-empty group
pub fn run_linter(
    groups: FileGroups,
    config: &Config,
    progress: &impl Fn(&str),
) -> Result<LintOutcome> {
    let main = check_group(
        "main",
        groups.main,
        config,
        config.lint_config.as_deref(),
        config.max_line_length,
        progress,
    )?;
    let examples = check_group(
        "examples",
        groups.examples,
        config,
        config.examples_lint_config.as_deref(),
        config.examples_max_line_length,
        progress,
    )?;

    Ok(LintOutcome {
        groups: vec![main, examples],
    })
}

fn check_group(
    name: &'static str,
    files: Vec<String>,
    config: &Config,
    lint_config: Option<&str>,
    max_line_length: u32,
    progress: &impl Fn(&str),
) -> Result<GroupResult> {
    // An empty group is a no-op, not an error
    if files.is_empty() {
        return Ok(GroupResult::unchecked(name, files));
    }

    progress(&format!(
        "Checking {} file(s) in group '{}'",
        files.len(),
        name
    ));

    let mut cmd = Command::new(&config.linter);
    if let Some(path) = lint_config {
        cmd.args(["--config", path]);
    }
    cmd.arg(format!("--max-line-length={}", max_line_length));
    cmd.args(&files);

    // Linter output passes straight through to the developer
    let status = cmd.status().map_err(|e| RangeLintError::LinterLaunch {
        program: config.linter.clone(),
        reason: e.to_string(),
    })?;

    Ok(GroupResult {
        name,
        files,
        passed: Some(status.success()),
    })
}
