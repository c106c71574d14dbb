//! Git operations abstraction
//!
//! This module defines the [`GitInterface`] trait used by the derive and
//! sync commands, with two implementations: [`RealGit`] drives an actual
//! repository (git2 for read-side queries, the `git` binary for every
//! mutation), and [`MockGit`] is an in-memory fake for unit tests.
//!
//! Every invocation of the external `git` binary is synchronous and is
//! captured as a [`CommandOutput`] before any error mapping happens, so the
//! exit status and both output streams are always available verbatim.

use crate::error::{Error, Result};

pub mod mock_git;
pub mod real_git;

pub use mock_git::MockGit;
pub use real_git::RealGit;

/// Captured result of a single git invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code, `-1` when terminated by a signal.
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Maps a non-zero exit into [`Error::CommandFailed`] for the given
    /// command line, passing successful output through.
    pub fn checked(self, command: String) -> Result<CommandOutput> {
        if self.success() {
            Ok(self)
        } else {
            Err(Error::CommandFailed {
                command,
                code: self.code,
                stdout: self.stdout,
                stderr: self.stderr,
            })
        }
    }
}

/// Trait abstracting the version-control operations used by the commands.
///
/// Working-tree state is a single shared resource, so implementations are
/// used from one thread at a time; methods take `&self` because no method
/// needs caller-visible mutable state.
pub trait GitInterface {
    /// Name of the currently checked-out branch.
    fn current_branch(&self) -> Result<String>;

    /// Whether a local branch with this name exists.
    fn branch_exists(&self, name: &str) -> Result<bool>;

    /// Whether `<remote>/<name>` exists.
    fn remote_branch_exists(&self, remote: &str, name: &str) -> Result<bool>;

    /// Remote branch names (without the remote prefix), HEAD pointer excluded.
    fn list_remote_branches(&self, remote: &str) -> Result<Vec<String>>;

    /// Fetches all remotes so remote-branch queries see current state.
    fn fetch_all(&self) -> Result<()>;

    /// Whether `user.name` and `user.email` are both configured.
    fn identity_configured(&self) -> Result<bool>;

    /// Checks out an existing local branch.
    fn checkout(&self, branch: &str) -> Result<()>;

    /// Creates a branch at the current tip and switches to it.
    fn checkout_new(&self, branch: &str) -> Result<()>;

    /// Creates a local branch tracking `<remote>/<branch>` and switches to it.
    fn checkout_tracking(&self, branch: &str, remote: &str) -> Result<()>;

    /// Copies one path's content from the tip of `source` into the working
    /// tree (and index), overwriting whatever is there.
    fn checkout_path_from(&self, source: &str, path: &str) -> Result<()>;

    /// Renames a tracked path (`git mv`).
    fn move_path(&self, from: &str, to: &str) -> Result<()>;

    /// Removes a tracked file or directory (`git rm -r`).
    fn remove_path(&self, path: &str) -> Result<()>;

    /// Whether the path currently exists in the working tree.
    fn path_in_worktree(&self, path: &str) -> bool;

    /// Stages every change in the working tree.
    fn stage_all(&self) -> Result<()>;

    /// Paths that differ from HEAD, staged or not.
    fn changed_paths(&self) -> Result<Vec<String>>;

    /// Records a commit with the given message.
    fn commit(&self, message: &str) -> Result<()>;

    /// Pushes the current branch to its upstream.
    fn push(&self) -> Result<()>;

    /// Pushes a new branch and sets up its upstream tracking reference.
    fn push_new_branch(&self, remote: &str, branch: &str) -> Result<()>;
}

/// Scope guard that restores the branch checked out at acquisition time.
///
/// Sync walks the checkout through every target branch; this guard makes
/// sure the operator gets their original checkout back on every exit path,
/// including early returns and panics.
pub struct CheckoutGuard<'a> {
    git: &'a dyn GitInterface,
    original: String,
}

impl<'a> CheckoutGuard<'a> {
    /// Captures the current branch as the one to restore.
    pub fn acquire(git: &'a dyn GitInterface) -> Result<Self> {
        let original = git.current_branch()?;
        Ok(Self { git, original })
    }

    /// Branch that will be restored when the guard drops.
    pub fn original(&self) -> &str {
        &self.original
    }
}

impl Drop for CheckoutGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.git.checkout(&self.original) {
            eprintln!(
                "Warning: failed to restore checkout of '{}': {e}",
                self.original
            );
        }
    }
}
