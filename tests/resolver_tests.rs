//! Range resolution integration tests
//!
//! Each test builds real git repositories in temp directories and drives the
//! built binary through them, covering the skip, explicit-range, pull-request
//! and ancestor-search rules.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_rangelint"))
}

/// CI variables that must not leak from the environment running the tests
const CI_VARS: &[&str] = &[
    "TRAVIS",
    "TRAVIS_BRANCH",
    "TRAVIS_PULL_REQUEST",
    "TRAVIS_REPO_SLUG",
    "TRAVIS_COMMIT_RANGE",
    "CI_RUNNING",
    "CURRENT_BRANCH",
    "IS_PULL_REQUEST",
    "REPO_SLUG",
    "COMMIT_RANGE",
];

/// Command for the binary with a clean CI environment
fn rangelint(dir: &Path) -> Command {
    let mut cmd = Command::new(binary_path());
    cmd.current_dir(dir);
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    for var in CI_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn git(dir: &Path, args: &[&str]) -> Output {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    output
}

fn git_stdout(dir: &Path, args: &[&str]) -> String {
    String::from_utf8_lossy(&git(dir, args).stdout)
        .trim()
        .to_string()
}

/// Initialize a repository on a `develop` branch with commit identity set
fn init_repo(dir: &Path) {
    git(dir, &["init", "-b", "develop"]);
    git(dir, &["config", "user.email", "test@example.com"]);
    git(dir, &["config", "user.name", "Test User"]);
}

fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    if let Some(parent) = Path::new(name).parent() {
        fs::create_dir_all(dir.join(parent)).expect("Failed to create dir");
    }
    fs::write(dir.join(name), content).expect("Failed to write file");
    git(dir, &["add", name]);
    git(dir, &["commit", "-m", message]);
}

fn short_hash(dir: &Path, rev: &str) -> String {
    git_stdout(dir, &["rev-parse", "--short", rev])
}

/// Upstream repo with history on develop, plus a work clone on a feature
/// branch with one extra commit touching a.py and examples/b.py
fn setup_upstream_and_clone() -> (TempDir, PathBuf, PathBuf) {
    let temp = TempDir::new().unwrap();
    let upstream = temp.path().join("upstream");
    fs::create_dir_all(&upstream).unwrap();
    init_repo(&upstream);
    commit_file(&upstream, "base.py", "x = 1\n", "base");

    let work = temp.path().join("work");
    git(
        temp.path(),
        &["clone", upstream.to_str().unwrap(), work.to_str().unwrap()],
    );
    git(&work, &["config", "user.email", "test@example.com"]);
    git(&work, &["config", "user.name", "Test User"]);
    git(&work, &["checkout", "-b", "feature"]);
    fs::write(work.join("a.py"), "y = 2\n").unwrap();
    fs::create_dir_all(work.join("examples")).unwrap();
    fs::write(work.join("examples/b.py"), "z = 3\n").unwrap();
    git(&work, &["add", "a.py", "examples/b.py"]);
    git(&work, &["commit", "-m", "feature change"]);

    (temp, upstream, work)
}

fn report_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "Invalid JSON report: {}\nstdout: {}\nstderr: {}",
            e,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

mod skip_rule {
    use super::*;

    #[test]
    fn test_ci_release_branch_skips_and_never_lints() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        commit_file(temp.path(), "a.py", "x = 1\n", "initial");

        // A linter that always fails proves it was never invoked
        let output = rangelint(temp.path())
            .args(["--linter", "false"])
            .env("TRAVIS", "true")
            .env("TRAVIS_BRANCH", "master")
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(0));
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Skipped"), "stdout: {}", stdout);
    }

    #[test]
    fn test_non_ci_master_is_not_skipped() {
        // The skip rule only applies under CI; a local run on master still
        // resolves a range (and here fails for lack of a usable remote)
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        commit_file(temp.path(), "a.py", "x = 1\n", "initial");
        git(temp.path(), &["branch", "-m", "master"]);

        let output = rangelint(temp.path())
            .output()
            .expect("Failed to run binary");

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(!stdout.contains("Skipped"), "stdout: {}", stdout);
        assert_eq!(output.status.code(), Some(2));
    }
}

mod explicit_range_rule {
    use super::*;

    #[test]
    fn test_ci_supplied_range_is_used_verbatim() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        commit_file(temp.path(), "base.py", "x = 0\n", "base");
        fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        fs::create_dir_all(temp.path().join("examples")).unwrap();
        fs::write(temp.path().join("examples/b.py"), "y = 2\n").unwrap();
        git(temp.path(), &["add", "a.py", "examples/b.py"]);
        git(temp.path(), &["commit", "-m", "change"]);

        let base = short_hash(temp.path(), "HEAD~1");
        let head = short_hash(temp.path(), "HEAD");

        let output = rangelint(temp.path())
            .args(["--json", "--dry-run"])
            .env("TRAVIS", "true")
            .env("TRAVIS_BRANCH", "feature")
            .env("TRAVIS_PULL_REQUEST", "false")
            .env("TRAVIS_REPO_SLUG", "owner/project")
            .env("TRAVIS_COMMIT_RANGE", format!("{}...{}", base, head))
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(0));
        let json = report_json(&output);
        // No ancestor search: the supplied endpoints come back untouched
        assert_eq!(json["range"]["base"], base.as_str());
        assert_eq!(json["range"]["head"], head.as_str());
        assert_eq!(json["groups"][0]["files"][0], "a.py");
        assert_eq!(json["groups"][1]["files"][0], "examples/b.py");
    }

    #[test]
    fn test_empty_ci_range_passes_by_convention() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        commit_file(temp.path(), "a.py", "x = 1\n", "initial");

        let output = rangelint(temp.path())
            .args(["--json"])
            .env("TRAVIS", "true")
            .env("TRAVIS_BRANCH", "brand-new-branch")
            .env("TRAVIS_PULL_REQUEST", "false")
            .env("TRAVIS_REPO_SLUG", "owner/project")
            .env("TRAVIS_COMMIT_RANGE", "")
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(0));
        let json = report_json(&output);
        assert!(json["skipped"].as_str().unwrap().contains("empty"));
        assert_eq!(json["passed"], true);
    }

    #[test]
    fn test_malformed_ci_range_is_fatal() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        commit_file(temp.path(), "a.py", "x = 1\n", "initial");

        let output = rangelint(temp.path())
            .env("TRAVIS", "true")
            .env("TRAVIS_BRANCH", "feature")
            .env("TRAVIS_PULL_REQUEST", "false")
            .env("TRAVIS_REPO_SLUG", "owner/project")
            .env("TRAVIS_COMMIT_RANGE", "deadbeef")
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Invalid commit range"), "stderr: {}", stderr);
    }
}

mod ancestor_search_rule {
    use super::*;

    #[test]
    fn test_local_run_resolves_merge_base_range() {
        let (_temp, upstream, work) = setup_upstream_and_clone();

        let output = rangelint(&work)
            .args(["--json", "--linter", "true"])
            .output()
            .expect("Failed to run binary");

        assert_eq!(
            output.status.code(),
            Some(0),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let json = report_json(&output);

        // Base is the tip of upstream develop, head the feature branch
        assert_eq!(json["range"]["base"], short_hash(&upstream, "develop"));
        assert_eq!(json["range"]["head"], short_hash(&work, "feature"));
        assert_eq!(json["groups"][0]["files"][0], "a.py");
        assert_eq!(json["groups"][1]["files"][0], "examples/b.py");
        assert_eq!(json["passed"], true);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let (_temp, _upstream, work) = setup_upstream_and_clone();

        let run = || {
            let output = rangelint(&work)
                .args(["--json", "--dry-run"])
                .output()
                .expect("Failed to run binary");
            assert_eq!(output.status.code(), Some(0));
            report_json(&output)
        };

        let first = run();
        let second = run();
        assert_eq!(first["range"], second["range"]);
        assert_eq!(first["groups"], second["groups"]);
    }

    #[test]
    fn test_linter_violation_exits_one() {
        let (_temp, _upstream, work) = setup_upstream_and_clone();

        let output = rangelint(&work)
            .args(["--json", "--linter", "false"])
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(1));
        let json = report_json(&output);
        assert_eq!(json["passed"], false);
    }

    #[test]
    fn test_no_files_changed_exits_zero() {
        let temp = TempDir::new().unwrap();
        let upstream = temp.path().join("upstream");
        fs::create_dir_all(&upstream).unwrap();
        init_repo(&upstream);
        commit_file(&upstream, "base.py", "x = 1\n", "base");

        let work = temp.path().join("work");
        git(
            temp.path(),
            &["clone", upstream.to_str().unwrap(), work.to_str().unwrap()],
        );
        // A branch at the develop tip with no commits of its own
        git(&work, &["checkout", "-b", "feature"]);

        let output = rangelint(&work)
            .args(["--json", "--linter", "false"])
            .output()
            .expect("Failed to run binary");

        // Zero modified files is a pass, even with a failing linter configured
        assert_eq!(output.status.code(), Some(0));
        let json = report_json(&output);
        assert_eq!(json["passed"], true);
        assert_eq!(json["groups"][0]["files"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_disjoint_histories_fail_with_both_refs_named() {
        let temp = TempDir::new().unwrap();
        let upstream = temp.path().join("upstream");
        fs::create_dir_all(&upstream).unwrap();
        init_repo(&upstream);
        commit_file(&upstream, "base.py", "x = 1\n", "base");

        // An unrelated repository pointing at the upstream as origin
        let work = temp.path().join("work");
        fs::create_dir_all(&work).unwrap();
        init_repo(&work);
        commit_file(&work, "other.py", "y = 2\n", "unrelated root");
        git(
            &work,
            &["remote", "add", "origin", upstream.to_str().unwrap()],
        );

        let output = rangelint(&work)
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("No common ancestor"),
            "stderr: {}",
            stderr
        );
        // Diagnostic names both sides of the failed reconciliation
        assert!(stderr.contains("develop"), "stderr: {}", stderr);
    }

    #[test]
    fn test_missing_remote_without_slug_is_fatal() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        commit_file(temp.path(), "a.py", "x = 1\n", "initial");

        let output = rangelint(temp.path())
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("remote"), "stderr: {}", stderr);
    }

    #[test]
    fn test_temporary_remote_removed_after_failed_fetch() {
        let temp = TempDir::new().unwrap();
        init_repo(temp.path());
        commit_file(temp.path(), "a.py", "x = 1\n", "initial");

        // No remote matches this slug, so a temporary one is created; the
        // fetch cannot succeed and the run fails, but the remote must be
        // gone afterwards.
        let output = rangelint(temp.path())
            .args(["--target-slug", "rangelint-test/no-such-repo"])
            .output()
            .expect("Failed to run binary");

        assert_eq!(output.status.code(), Some(2));
        let remotes = git_stdout(temp.path(), &["remote"]);
        assert!(
            !remotes.contains("rangelint-target"),
            "temporary remote leaked: {}",
            remotes
        );
    }
}

mod pull_request_rule {
    use super::*;

    /// Upstream laid out so its path ends in `owner/project`, letting slug
    /// matching find it, with a PR head ref diverging from develop
    fn setup_pr_repos() -> (TempDir, PathBuf, PathBuf, String) {
        let temp = TempDir::new().unwrap();
        let upstream = temp.path().join("owner/project");
        fs::create_dir_all(&upstream).unwrap();
        init_repo(&upstream);
        commit_file(&upstream, "base.py", "x = 1\n", "base");

        // Build the PR head on a side branch, then expose it the way a
        // hosting service does, under refs/pull/<id>/head
        git(&upstream, &["checkout", "-b", "pr-source"]);
        commit_file(&upstream, "a.py", "y = 2\n", "pr change");
        let pr_head = git_stdout(&upstream, &["rev-parse", "HEAD"]);
        git(
            &upstream,
            &["update-ref", "refs/pull/7/head", &pr_head],
        );
        git(&upstream, &["checkout", "develop"]);

        let work = temp.path().join("work");
        git(
            temp.path(),
            &["clone", upstream.to_str().unwrap(), work.to_str().unwrap()],
        );

        (temp, upstream, work, pr_head)
    }

    fn pr_build(work: &Path) -> Command {
        let mut cmd = rangelint(work);
        cmd.env("TRAVIS", "true")
            .env("TRAVIS_BRANCH", "develop")
            .env("TRAVIS_PULL_REQUEST", "7")
            .env("TRAVIS_REPO_SLUG", "owner/project");
        cmd
    }

    #[test]
    fn test_pr_head_is_fetched_and_linted() {
        let (_temp, upstream, work, pr_head) = setup_pr_repos();

        let output = pr_build(&work)
            .args(["--json", "--linter", "true"])
            .output()
            .expect("Failed to run binary");

        assert_eq!(
            output.status.code(),
            Some(0),
            "stderr: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        let json = report_json(&output);
        assert_eq!(json["range"]["base"], short_hash(&upstream, "develop"));
        assert_eq!(json["range"]["head"], short_hash(&upstream, &pr_head));
        assert_eq!(json["groups"][0]["files"][0], "a.py");
    }

    #[test]
    fn test_pr_ref_is_deterministic_and_overwritten() {
        let (_temp, _upstream, work, pr_head) = setup_pr_repos();

        for _ in 0..2 {
            let output = pr_build(&work)
                .args(["--dry-run"])
                .output()
                .expect("Failed to run binary");
            assert_eq!(output.status.code(), Some(0));
        }

        // Rerunning overwrote the same local ref rather than piling up new ones
        let local = git_stdout(&work, &["rev-parse", "refs/rangelint/pr/7"]);
        assert_eq!(local, pr_head);
        let refs = git_stdout(&work, &["for-each-ref", "refs/rangelint/pr/"]);
        assert_eq!(refs.lines().count(), 1, "refs: {}", refs);
    }
}
