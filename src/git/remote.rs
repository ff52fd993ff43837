//! Target remote resolution
//!
//! Exactly one remote should point at the target project. When none does, a
//! temporary remote is added for the duration of the run and removed again
//! through an RAII guard, so no exit path leaks it.

use super::commands::{list_remotes, remote_add, remote_remove};
use crate::error::{RangeLintError, Result};

/// Name used for the temporary remote
const TEMP_REMOTE_NAME: &str = "rangelint-target";

/// A named reference to an external repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    pub name: String,
    pub url: String,
}

/// The remote to fetch the target project from
pub enum TargetRemote {
    /// An already-configured remote whose url matches the target slug
    Existing(Remote),
    /// A remote added for this run; removed on drop
    Temporary(TempRemoteGuard),
}

impl TargetRemote {
    /// Remote name to pass to fetch
    pub fn name(&self) -> &str {
        match self {
            TargetRemote::Existing(remote) => &remote.name,
            TargetRemote::Temporary(guard) => &guard.name,
        }
    }
}

/// Guard that removes the temporary remote when dropped.
/// Removal is best-effort and never fails the run.
pub struct TempRemoteGuard {
    name: String,
}

impl Drop for TempRemoteGuard {
    fn drop(&mut self) {
        if !remote_remove(&self.name) {
            eprintln!("Warning: failed to remove temporary remote '{}'", self.name);
        }
    }
}

/// Whether a remote url points at the given `owner/name` slug.
/// Matches both https and ssh forms, with or without a `.git` suffix.
pub fn url_matches_slug(url: &str, slug: &str) -> bool {
    let trimmed = url.strip_suffix(".git").unwrap_or(url);
    trimmed.ends_with(&format!("/{}", slug)) || trimmed.ends_with(&format!(":{}", slug))
}

/// Find the remote for the target project, creating a temporary one if no
/// configured remote matches the slug.
///
/// With no slug available at all (a local run outside CI), falls back to a
/// remote named "origin" when one exists.
pub fn resolve_target_remote(slug: Option<&str>) -> Result<TargetRemote> {
    let remotes = list_remotes()?;

    match slug {
        Some(slug) => {
            if let Some((name, url)) = remotes
                .iter()
                .find(|(_, url)| url_matches_slug(url, slug))
            {
                return Ok(TargetRemote::Existing(Remote {
                    name: name.clone(),
                    url: url.clone(),
                }));
            }

            // Stale leftover from an interrupted run: reuse the name after
            // removing the old entry.
            if remotes.iter().any(|(name, _)| name == TEMP_REMOTE_NAME) {
                remote_remove(TEMP_REMOTE_NAME);
            }

            let url = format!("https://github.com/{}.git", slug);
            remote_add(TEMP_REMOTE_NAME, &url).map_err(|e| RangeLintError::MissingRemote {
                slug: slug.to_string(),
                reason: e.to_string(),
            })?;
            Ok(TargetRemote::Temporary(TempRemoteGuard {
                name: TEMP_REMOTE_NAME.to_string(),
            }))
        }
        None => {
            if let Some((name, url)) = remotes.iter().find(|(name, _)| name == "origin") {
                return Ok(TargetRemote::Existing(Remote {
                    name: name.clone(),
                    url: url.clone(),
                }));
            }
            Err(RangeLintError::MissingRemote {
                slug: "(unknown)".to_string(),
                reason: "no target slug configured and no 'origin' remote".to_string(),
            })
        }
    }
}
