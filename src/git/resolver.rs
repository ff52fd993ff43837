//! Commit-range resolution
//!
//! Determines which commit range a change under test spans. Rules are tried
//! in priority order; the first applicable one wins:
//!
//! 1. CI build of the release branch: skip linting entirely.
//! 2. CI push build with a CI-supplied range: use it verbatim (empty range
//!    means a branch with no history, which passes by convention).
//! 3. CI pull-request build: fetch the PR head into a deterministic local
//!    ref and fall through to rule 4 with that ref.
//! 4. Merge-base of the current ref and the target branch.

use super::commands::{current_head_ref, fetch, merge_base, rev_exists, short_hash};
use super::remote::{resolve_target_remote, TargetRemote};
use crate::ci::ExecutionContext;
use crate::config::Config;
use crate::error::{RangeLintError, Result};
use std::fmt;

/// A two-endpoint commit range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRange {
    pub base: String,
    pub head: String,
}

impl CommitRange {
    /// Parse an explicit range string of the form `base...head` or `base..head`
    pub fn parse(spec: &str) -> Result<Self> {
        let (base, head) = spec
            .split_once("...")
            .or_else(|| spec.split_once(".."))
            .ok_or_else(|| RangeLintError::InvalidRange(spec.to_string()))?;
        if base.is_empty() || head.is_empty() {
            return Err(RangeLintError::InvalidRange(spec.to_string()));
        }
        Ok(Self {
            base: base.to_string(),
            head: head.to_string(),
        })
    }

    /// Range spec understood by `git diff`: changes on the head side since
    /// the common ancestor
    pub fn diff_spec(&self) -> String {
        format!("{}...{}", self.base, self.head)
    }
}

impl fmt::Display for CommitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}...{}", self.base, self.head)
    }
}

/// Why resolution short-circuited without a range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// CI build of the release branch; never block release merges on
    /// historical style debt
    ReleaseBranch,
    /// CI supplied a commit range that is empty (a branch with no prior
    /// history); pass by convention
    EmptyCommitRange,
}

impl SkipReason {
    pub fn describe(self) -> &'static str {
        match self {
            SkipReason::ReleaseBranch => "release branch build, linting skipped",
            SkipReason::EmptyCommitRange => "empty commit range, nothing to check",
        }
    }
}

/// Outcome of range resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Early non-error termination; the caller exits successfully without
    /// running the linter
    Skip(SkipReason),
    /// A concrete range to diff and lint
    Lint(CommitRange),
}

/// Resolve the commit range for this run.
///
/// A temporary remote, if one had to be created, is removed before this
/// function returns on every path past acquisition, including errors.
pub fn resolve(
    ctx: &ExecutionContext,
    config: &Config,
    progress: &impl Fn(&str),
) -> Result<Resolution> {
    // Rule 1: release branch builds are never blocked on style
    if ctx.is_ci && ctx.current_branch.as_deref() == Some(config.release_branch.as_str()) {
        return Ok(Resolution::Skip(SkipReason::ReleaseBranch));
    }

    let target_slug = config.effective_target_slug(ctx.repo_slug.as_deref());

    // Rule 2: push build in the target repo with a CI-supplied range
    if ctx.is_ci
        && ctx.pull_request.is_none()
        && ctx.repo_slug.is_some()
        && ctx.repo_slug.as_deref() == target_slug
    {
        if let Some(range) = ctx.commit_range.as_deref() {
            if range.is_empty() {
                return Ok(Resolution::Skip(SkipReason::EmptyCommitRange));
            }
            progress(&format!("Using CI-supplied commit range {}", range));
            return CommitRange::parse(range).map(Resolution::Lint);
        }
    }

    // Rules 3 and 4 fetch from the target project; the guard inside
    // TargetRemote removes a temporary remote when this scope ends.
    let remote = resolve_target_remote(target_slug)?;
    match &remote {
        TargetRemote::Existing(r) => {
            progress(&format!("Using remote '{}' ({})", r.name, r.url));
        }
        TargetRemote::Temporary(_) => {
            progress("No matching remote, added a temporary one");
        }
    }

    // Rule 3: pull-request builds lint the PR head
    let current_ref = match ctx.pull_request.as_deref() {
        Some(id) if ctx.is_ci => {
            let local_ref = format!("refs/rangelint/pr/{}", id);
            progress(&format!("Fetching head of pull request #{}", id));
            // Forced refspec: rerunning overwrites the same ref
            fetch(
                remote.name(),
                &format!("+refs/pull/{}/head:{}", id, local_ref),
            )?;
            local_ref
        }
        _ => match ctx.current_branch.as_deref() {
            // CI may report a branch name that only exists on the remote
            // (detached checkout); fall back to HEAD then
            Some(branch) if rev_exists(branch) => branch.to_string(),
            Some(_) | None => current_head_ref()?,
        },
    };

    // Rule 4: merge-base against the target branch
    let tracking_ref = format!("refs/rangelint/{}", config.target_branch);
    progress(&format!(
        "Fetching {} from {}",
        config.target_branch,
        remote.name()
    ));
    fetch(
        remote.name(),
        &format!("+refs/heads/{}:{}", config.target_branch, tracking_ref),
    )?;

    let base = merge_base(&current_ref, &tracking_ref)?.ok_or_else(|| {
        RangeLintError::NoCommonAncestor {
            ours: current_ref.clone(),
            theirs: describe_target(&remote, &config.target_branch),
        }
    })?;

    // Abbreviated hashes for display; functionally equivalent to the full ids
    let range = CommitRange {
        base: short_hash(&base)?,
        head: short_hash(&current_ref)?,
    };
    progress(&format!("Resolved commit range {}", range));
    Ok(Resolution::Lint(range))
}

fn describe_target(remote: &TargetRemote, branch: &str) -> String {
    format!("{}/{}", remote.name(), branch)
}
