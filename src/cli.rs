//! CLI argument parsing using clap

use crate::config::{Config, OutputFormat};
use clap::Parser;

/// Diff-scoped lint runner with CI commit-range resolution
#[derive(Parser, Debug)]
#[command(name = "rangelint")]
#[command(version)]
#[command(
    about = "Resolve the commit range under test and lint only the changed files",
    long_about = None
)]
pub struct Cli {
    /// `owner/name` of the upstream project (defaults to the CI repo slug)
    #[arg(long = "target-slug", value_name = "OWNER/NAME")]
    pub target_slug: Option<String>,

    /// Reference branch of the target project used for merge-base
    #[arg(long = "target-branch", value_name = "BRANCH", default_value = "develop")]
    pub target_branch: String,

    /// Branch on which CI linting is skipped
    #[arg(
        long = "release-branch",
        value_name = "BRANCH",
        default_value = "master"
    )]
    pub release_branch: String,

    /// Path prefix selecting files for the relaxed lint group
    #[arg(
        long = "examples-prefix",
        value_name = "PREFIX",
        default_value = "examples/"
    )]
    pub examples_prefix: String,

    /// Style checker program to invoke per file group
    #[arg(long = "linter", value_name = "PROGRAM", default_value = "pycodestyle")]
    pub linter: String,

    /// Config file passed to the main lint group
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<String>,

    /// Config file passed to the examples lint group
    #[arg(long = "examples-config", value_name = "FILE")]
    pub examples_config: Option<String>,

    /// Maximum line length for the main group
    #[arg(long = "max-line-length", value_name = "N", default_value = "100")]
    pub max_line_length: u32,

    /// Maximum line length for the examples group
    #[arg(
        long = "examples-max-line-length",
        value_name = "N",
        default_value = "120"
    )]
    pub examples_max_line_length: u32,

    /// Output the run report in JSON format
    #[arg(long = "json")]
    pub json: bool,

    /// Resolve the range and report, but do not run the linter
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl Cli {
    /// Convert parsed command line arguments into a Config
    pub fn into_config(self) -> Config {
        let output_format = if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Console
        };

        Config {
            target_slug: self.target_slug,
            target_branch: self.target_branch,
            release_branch: self.release_branch,
            examples_prefix: self.examples_prefix,
            linter: self.linter,
            lint_config: self.config,
            examples_lint_config: self.examples_config,
            max_line_length: self.max_line_length,
            examples_max_line_length: self.examples_max_line_length,
            output_format,
            dry_run: self.dry_run,
        }
    }
}
