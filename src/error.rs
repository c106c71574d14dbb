//! Error types for branch derivation and synchronization.
//!
//! Every failure mode an operator can hit is a distinct variant so callers
//! can react per kind instead of string-matching messages. Failed git
//! invocations keep the exact command line and its captured output.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for derive and sync operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested branch name contained nothing usable after sanitization.
    #[error("branch name '{input}' sanitizes to an empty string")]
    InvalidName { input: String },

    /// A derive target collides with an existing branch. Never overwritten.
    #[error("branch '{0}' already exists")]
    BranchExists(String),

    /// A sync target exists neither locally nor on the remote.
    #[error("branch '{0}' not found locally or on the remote")]
    BranchNotFound(String),

    /// A git invocation exited non-zero. Output is preserved verbatim so the
    /// operator can diagnose the underlying failure.
    #[error("`{command}` failed with exit code {code}\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    CommandFailed {
        command: String,
        code: i32,
        stdout: String,
        stderr: String,
    },

    /// Commits cannot be created without `user.name` and `user.email`.
    #[error(
        "git user.name and user.email are not configured\n\
         Set them first, for example:\n\
         \x20 git config --global user.name 'Your Name'\n\
         \x20 git config --global user.email 'you@example.com'"
    )]
    IdentityUnset,

    /// HEAD does not point at a branch, so there is no base to work from.
    #[error("HEAD is detached; check out a branch first")]
    DetachedHead,

    /// The repository is bare or otherwise lacks a working tree.
    #[error("repository has no working tree")]
    NoWorkingTree,

    #[error("repository error: {0}")]
    Repository(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the failing git invocation reported an unmatched pathspec,
    /// meaning the requested file simply does not exist in the given tree.
    pub fn is_unmatched_pathspec(&self) -> bool {
        match self {
            Error::CommandFailed { stderr, .. } => {
                stderr.contains("did not match any file") || stderr.contains("pathspec")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_message_includes_command_and_output() {
        let err = Error::CommandFailed {
            command: "git push".to_string(),
            code: 128,
            stdout: String::new(),
            stderr: "fatal: no upstream\n".to_string(),
        };

        let message = err.to_string();
        assert!(message.contains("`git push`"));
        assert!(message.contains("128"));
        assert!(message.contains("fatal: no upstream"));
    }

    #[test]
    fn test_unmatched_pathspec_detection() {
        let missing = Error::CommandFailed {
            command: "git checkout main -- rules/extra.mdc".to_string(),
            code: 1,
            stdout: String::new(),
            stderr: "error: pathspec 'rules/extra.mdc' did not match any file(s) known to git\n"
                .to_string(),
        };
        assert!(missing.is_unmatched_pathspec());

        let other = Error::BranchNotFound("feature".to_string());
        assert!(!other.is_unmatched_pathspec());
    }
}
