//! Error types for rangelint

use thiserror::Error;

/// Result type alias for rangelint operations
pub type Result<T> = std::result::Result<T, RangeLintError>;

/// Error types for rangelint operations
#[derive(Error, Debug)]
pub enum RangeLintError {
    /// The two refs share no commit ancestry
    #[error(
        "No common ancestor between '{ours}' and '{theirs}'.\n\
         Is the branch based on the target branch? A detached or locally\n\
         rewritten branch can also cause this."
    )]
    NoCommonAncestor { ours: String, theirs: String },

    /// Remote inspection or creation failed
    #[error("Cannot resolve a remote for '{slug}': {reason}")]
    MissingRemote { slug: String, reason: String },

    /// A fetch from the target remote failed
    #[error("Fetch of '{refspec}' from remote '{remote}' failed: {reason}")]
    FetchFailure {
        remote: String,
        refspec: String,
        reason: String,
    },

    /// An explicit commit range could not be split into two endpoints
    #[error("Invalid commit range '{0}': expected '<base>...<head>' or '<base>..<head>'")]
    InvalidRange(String),

    /// A git invocation could not be run or reported failure
    #[error("Git error: {0}")]
    GitCommand(String),

    /// The style checker could not be spawned
    #[error("Cannot launch linter '{program}': {reason}")]
    LinterLaunch { program: String, reason: String },

    /// I/O error while writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}
