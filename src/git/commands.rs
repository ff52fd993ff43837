//! Low-level git invocations
//!
//! Thin wrappers around `std::process::Command`. Each returns a typed result;
//! callers decide which failures are fatal.

use crate::error::{RangeLintError, Result};
use std::process::{Command, Output, Stdio};

/// Run git with the given arguments, capturing output.
/// Only the spawn failure is an error here; a nonzero exit is returned
/// to the caller inside the Output.
fn git(args: &[&str]) -> Result<Output> {
    Command::new("git")
        .args(args)
        .output()
        .map_err(|e| RangeLintError::GitCommand(format!("failed to run git {}: {}", args[0], e)))
}

fn stdout_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Check if the current directory is inside a git repository
pub fn is_git_repo() -> bool {
    Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Check whether a revision resolves to a commit
pub fn rev_exists(rev: &str) -> bool {
    Command::new("git")
        .args(["rev-parse", "--verify", "--quiet", &format!("{}^{{commit}}", rev)])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Symbolic name of the checked-out branch, or "HEAD" when detached
pub fn current_head_ref() -> Result<String> {
    let output = git(&["rev-parse", "--abbrev-ref", "HEAD"])?;
    if !output.status.success() {
        return Err(RangeLintError::GitCommand(format!(
            "cannot resolve HEAD: {}",
            stderr_text(&output)
        )));
    }
    Ok(stdout_line(&output))
}

/// Abbreviated hash for a revision
pub fn short_hash(rev: &str) -> Result<String> {
    let output = git(&["rev-parse", "--short", rev])?;
    if !output.status.success() {
        return Err(RangeLintError::GitCommand(format!(
            "cannot abbreviate '{}': {}",
            rev,
            stderr_text(&output)
        )));
    }
    Ok(stdout_line(&output))
}

/// Merge-base of two revisions. Ok(None) means the histories are disjoint;
/// any other failure is a git error.
pub fn merge_base(ours: &str, theirs: &str) -> Result<Option<String>> {
    let output = git(&["merge-base", ours, theirs])?;
    if output.status.success() {
        return Ok(Some(stdout_line(&output)));
    }
    // merge-base exits 1 when no common ancestor exists
    if output.status.code() == Some(1) {
        return Ok(None);
    }
    Err(RangeLintError::GitCommand(format!(
        "merge-base of '{}' and '{}' failed: {}",
        ours,
        theirs,
        stderr_text(&output)
    )))
}

/// File paths modified within a range spec, in diff order
pub fn diff_name_only(range_spec: &str) -> Result<Vec<String>> {
    let output = git(&["diff", "--name-only", range_spec])?;
    if !output.status.success() {
        return Err(RangeLintError::GitCommand(format!(
            "git diff --name-only {} failed: {}",
            range_spec,
            stderr_text(&output)
        )));
    }

    let files: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect();

    Ok(files)
}

/// Fetch a refspec from a remote. Forced refspecs make refetching idempotent.
pub fn fetch(remote: &str, refspec: &str) -> Result<()> {
    let output = git(&["fetch", "--quiet", remote, refspec])?;
    if !output.status.success() {
        return Err(RangeLintError::FetchFailure {
            remote: remote.to_string(),
            refspec: refspec.to_string(),
            reason: stderr_text(&output),
        });
    }
    Ok(())
}

/// List configured remotes as (name, fetch url) pairs
pub fn list_remotes() -> Result<Vec<(String, String)>> {
    let output = git(&["remote", "-v"])?;
    if !output.status.success() {
        return Err(RangeLintError::GitCommand(format!(
            "git remote -v failed: {}",
            stderr_text(&output)
        )));
    }

    // Lines look like "origin\thttps://github.com/owner/repo.git (fetch)"
    let remotes = String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| l.ends_with("(fetch)"))
        .filter_map(|l| {
            let mut parts = l.split_whitespace();
            let name = parts.next()?;
            let url = parts.next()?;
            Some((name.to_string(), url.to_string()))
        })
        .collect();

    Ok(remotes)
}

/// Add a remote
pub fn remote_add(name: &str, url: &str) -> Result<()> {
    let output = git(&["remote", "add", name, url])?;
    if !output.status.success() {
        return Err(RangeLintError::GitCommand(format!(
            "git remote add {} failed: {}",
            name,
            stderr_text(&output)
        )));
    }
    Ok(())
}

/// Remove a remote, best-effort. Returns whether removal succeeded.
pub fn remote_remove(name: &str) -> bool {
    Command::new("git")
        .args(["remote", "remove", name])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
