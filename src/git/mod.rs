//! Git integration: shellouts, remote management, and range resolution
//!
//! Everything here shells out to the `git` binary. Calls are strictly
//! ordered (fetch before merge-base, merge-base before diff) and
//! synchronous.

mod commands;
mod remote;
mod resolver;

pub use commands::{diff_name_only, is_git_repo};
pub use resolver::{resolve, CommitRange, Resolution, SkipReason};
