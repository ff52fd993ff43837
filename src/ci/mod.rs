//! CI provider detection and execution context
//!
//! All environment reads go through an [`EnvMap`] snapshot taken once at
//! startup, so the resolver itself never touches ambient process state.

mod generic;
mod travis;

pub use generic::GenericCi;
pub use travis::TravisCi;

use std::collections::HashMap;

/// Immutable snapshot of environment variables
#[derive(Debug, Clone, Default)]
pub struct EnvMap {
    vars: HashMap<String, String>,
}

impl EnvMap {
    /// Snapshot the current process environment
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a variable. Returns None when unset; an empty value is Some("").
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Interpret a variable as a boolean flag ("true", "1", "yes", case-insensitive)
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(
            self.get(key).map(str::to_ascii_lowercase).as_deref(),
            Some("true") | Some("1") | Some("yes")
        )
    }
}

/// Immutable snapshot of the inputs driving range resolution
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    /// Whether we are executing under CI
    pub is_ci: bool,
    /// Symbolic name of the branch under test, if the provider reports one
    pub current_branch: Option<String>,
    /// Pull request id, or None for push builds and local runs
    pub pull_request: Option<String>,
    /// `owner/name` of the repository being tested
    pub repo_slug: Option<String>,
    /// Pre-computed commit range supplied by CI. Present-but-empty is
    /// distinct from absent: an empty range means a branch with no
    /// prior history, which is a skip, not an error.
    pub commit_range: Option<String>,
    /// Provider name, for diagnostics only
    pub provider: &'static str,
}

/// A CI provider knows which environment variables describe a build
pub trait CiProvider {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Whether this provider's variables are present in the environment
    fn is_active(&self, env: &EnvMap) -> bool;

    /// Build the execution context from the environment snapshot
    fn context(&self, env: &EnvMap) -> ExecutionContext;
}

/// Pick the provider for this environment and build the execution context.
///
/// Travis takes precedence when its marker variable is set; otherwise the
/// generic variable names apply. With neither present the context is a
/// local (non-CI) run.
pub fn detect_context(env: &EnvMap) -> ExecutionContext {
    let providers: [&dyn CiProvider; 2] = [&TravisCi, &GenericCi];
    for provider in providers {
        if provider.is_active(env) {
            return provider.context(env);
        }
    }
    ExecutionContext {
        provider: "local",
        ..ExecutionContext::default()
    }
}

/// Normalize a PR variable: ids pass through, false-equivalents become None
pub(crate) fn parse_pull_request(value: Option<&str>) -> Option<String> {
    match value {
        None | Some("") | Some("false") => None,
        Some(id) => Some(id.to_string()),
    }
}

/// Normalize an optional string variable: unset stays None, values (including
/// the empty string) pass through
pub(crate) fn parse_optional(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

/// Normalize a branch variable: unset or empty means "no override"
pub(crate) fn parse_branch(value: Option<&str>) -> Option<String> {
    match value {
        None | Some("") => None,
        Some(branch) => Some(branch.to_string()),
    }
}
