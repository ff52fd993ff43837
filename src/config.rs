//! Configuration types for rangelint

/// Output format for the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable console output
    #[default]
    Console,
    /// JSON output with structured data
    Json,
}

/// Configuration options for rangelint
#[derive(Debug, Clone)]
pub struct Config {
    /// `owner/name` of the upstream project whose target branch anchors
    /// the merge-base. Defaults to the repo slug reported by CI.
    pub target_slug: Option<String>,

    /// Reference branch of the target project (default: develop)
    pub target_branch: String,

    /// Branch on which CI linting is skipped entirely (default: master)
    pub release_branch: String,

    /// Path prefix selecting files for the relaxed lint group (default: examples/)
    pub examples_prefix: String,

    /// Style checker program (default: pycodestyle)
    pub linter: String,

    /// Config file passed to the main lint group
    pub lint_config: Option<String>,

    /// Config file passed to the examples lint group
    pub examples_lint_config: Option<String>,

    /// Maximum line length for the main group (default: 100)
    pub max_line_length: u32,

    /// Maximum line length for the examples group (default: 120)
    pub examples_max_line_length: u32,

    /// Output format for the run report
    pub output_format: OutputFormat,

    /// Resolve the range and report, but do not invoke the linter
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_slug: None,
            target_branch: String::from("develop"),
            release_branch: String::from("master"),
            examples_prefix: String::from("examples/"),
            linter: String::from("pycodestyle"),
            lint_config: None,
            examples_lint_config: None,
            max_line_length: 100,
            examples_max_line_length: 120,
            output_format: OutputFormat::Console,
            dry_run: false,
        }
    }
}

impl Config {
    /// The slug the resolver should anchor to: the configured target project,
    /// falling back to the repo under test.
    pub fn effective_target_slug<'a>(&'a self, repo_slug: Option<&'a str>) -> Option<&'a str> {
        self.target_slug.as_deref().or(repo_slug)
    }
}
