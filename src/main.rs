//! rangelint - diff-scoped lint runner with CI commit-range resolution
//!
//! Resolves which commit range a CI build (or local run) is testing, computes
//! the files modified in that range, and runs a style checker restricted to
//! those files. Release-branch builds and empty ranges skip linting entirely.

mod ci;
mod cli;
mod config;
mod error;
mod export;
mod git;
mod lint;

use ci::{detect_context, EnvMap};
use clap::Parser;
use cli::Cli;
use export::{create_exporter, RunReport};
use git::Resolution;
use lint::LintOutcome;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command line arguments
    let config = Cli::parse().into_config();

    // Progress callback for logging
    let progress = |msg: &str| {
        eprintln!("{}", msg);
    };

    // === Phase 1: Execution Context ===
    let env = EnvMap::from_process();
    let ctx = detect_context(&env);
    progress(&format!(
        "Provider: {}{}",
        ctx.provider,
        if ctx.is_ci { " (CI)" } else { "" }
    ));

    if !git::is_git_repo() {
        eprintln!("Error: not inside a git repository");
        return ExitCode::from(2);
    }

    // === Phase 2: Range Resolution ===
    let range = match git::resolve(&ctx, &config, &progress) {
        Ok(Resolution::Skip(reason)) => {
            let report = RunReport::skipped(ctx.provider, reason);
            return export_and_exit(&config, &report);
        }
        Ok(Resolution::Lint(range)) => range,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    // === Phase 3: Modified File Discovery ===
    let files = match git::diff_name_only(&range.diff_spec()) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    progress(&format!("Found {} modified file(s)", files.len()));

    let groups = lint::partition(files, &config.examples_prefix);

    // === Phase 4: Style Check ===
    let outcome = if config.dry_run || groups.is_empty() {
        LintOutcome::unchecked(groups)
    } else {
        match lint::run_linter(groups, &config, &progress) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        }
    };

    // === Phase 5: Report & Exit Code ===
    let report = RunReport::linted(ctx.provider, range, outcome, config.dry_run);
    export_and_exit(&config, &report)
}

/// Write the run report and map the outcome to an exit code.
/// Violations exit 1; skip paths and empty diffs exit 0.
fn export_and_exit(config: &config::Config, report: &RunReport) -> ExitCode {
    let exporter = create_exporter(config.output_format);
    let stdout = io::stdout();
    let mut writer = stdout.lock();

    if let Err(e) = exporter.export(report, &mut writer) {
        eprintln!("Error writing output: {}", e);
        return ExitCode::from(2);
    }
    if let Err(e) = writer.flush() {
        eprintln!("Error flushing output: {}", e);
        return ExitCode::from(2);
    }

    if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1) // Style violations found
    }
}
