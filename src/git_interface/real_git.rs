//! Git interface backed by a real repository.
//!
//! Read-side queries (current branch, branch existence, user identity) go
//! through git2. Mutations (checkout, mv, rm, commit, push) shell out to the
//! `git` binary so their exit status and output can be surfaced verbatim
//! when something fails.

use git2::{BranchType, Repository};
use std::path::{Path, PathBuf};
use std::process::Command;

use super::{CommandOutput, GitInterface};
use crate::constants::GIT_CMD;
use crate::error::{Error, Result};

/// [`GitInterface`] implementation for an on-disk repository.
pub struct RealGit {
    repo: Repository,
    workdir: PathBuf,
}

impl RealGit {
    /// Opens the repository containing the current directory.
    pub fn discover() -> Result<Self> {
        Self::from_repo(Repository::open_from_env()?)
    }

    /// Opens the repository containing the given path.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_repo(Repository::discover(path)?)
    }

    fn from_repo(repo: Repository) -> Result<Self> {
        let workdir = repo
            .workdir()
            .ok_or(Error::NoWorkingTree)?
            .to_path_buf();
        Ok(Self { repo, workdir })
    }

    /// Root of the working tree.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Runs `git` with the given arguments in the working tree and captures
    /// its exit code and output streams.
    fn run_git(&self, args: &[&str]) -> Result<CommandOutput> {
        let output = Command::new(GIT_CMD)
            .args(args)
            .current_dir(&self.workdir)
            .output()?;

        Ok(CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    /// Like [`run_git`](Self::run_git) but maps a non-zero exit into
    /// [`Error::CommandFailed`] carrying the full command line.
    fn run_checked(&self, args: &[&str]) -> Result<CommandOutput> {
        let command = format!("{GIT_CMD} {}", args.join(" "));
        self.run_git(args)?.checked(command)
    }
}

impl GitInterface for RealGit {
    fn current_branch(&self) -> Result<String> {
        if self.repo.head_detached()? {
            return Err(Error::DetachedHead);
        }

        let head = self.repo.head()?;
        head.shorthand()
            .map(|name| name.to_string())
            .ok_or(Error::DetachedHead)
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        Ok(self.repo.find_branch(name, BranchType::Local).is_ok())
    }

    fn remote_branch_exists(&self, remote: &str, name: &str) -> Result<bool> {
        Ok(self
            .repo
            .find_branch(&format!("{remote}/{name}"), BranchType::Remote)
            .is_ok())
    }

    fn list_remote_branches(&self, remote: &str) -> Result<Vec<String>> {
        use crate::constants::GIT_REMOTE_HEAD_MARKER;

        let output = self.run_checked(&["branch", "-r"])?;
        let prefix = format!("{remote}/");

        let mut branches = Vec::new();
        for line in output.stdout.lines() {
            let line = line.trim();
            if line.contains(GIT_REMOTE_HEAD_MARKER) {
                continue;
            }
            if let Some(name) = line.strip_prefix(&prefix) {
                branches.push(name.to_string());
            }
        }

        Ok(branches)
    }

    fn fetch_all(&self) -> Result<()> {
        self.run_checked(&["fetch", "--all"])?;
        Ok(())
    }

    fn identity_configured(&self) -> Result<bool> {
        let config = self.repo.config()?.snapshot()?;
        let name = config.get_string("user.name").unwrap_or_default();
        let email = config.get_string("user.email").unwrap_or_default();
        Ok(!name.is_empty() && !email.is_empty())
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        self.run_checked(&["checkout", branch])?;
        Ok(())
    }

    fn checkout_new(&self, branch: &str) -> Result<()> {
        self.run_checked(&["checkout", "-b", branch])?;
        Ok(())
    }

    fn checkout_tracking(&self, branch: &str, remote: &str) -> Result<()> {
        let remote_ref = format!("{remote}/{branch}");
        self.run_checked(&["checkout", "-b", branch, &remote_ref])?;
        Ok(())
    }

    fn checkout_path_from(&self, source: &str, path: &str) -> Result<()> {
        self.run_checked(&["checkout", source, "--", path])?;
        Ok(())
    }

    fn move_path(&self, from: &str, to: &str) -> Result<()> {
        self.run_checked(&["mv", from, to])?;
        Ok(())
    }

    fn remove_path(&self, path: &str) -> Result<()> {
        self.run_checked(&["rm", "-r", path])?;
        Ok(())
    }

    fn path_in_worktree(&self, path: &str) -> bool {
        self.workdir.join(path).exists()
    }

    fn stage_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    fn changed_paths(&self) -> Result<Vec<String>> {
        let output = self.run_checked(&["diff", "HEAD", "--name-only"])?;
        Ok(output
            .stdout
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.run_checked(&["commit", "-m", message])?;
        Ok(())
    }

    fn push(&self) -> Result<()> {
        self.run_checked(&["push"])?;
        Ok(())
    }

    fn push_new_branch(&self, remote: &str, branch: &str) -> Result<()> {
        self.run_checked(&["push", "--set-upstream", remote, branch])?;
        Ok(())
    }
}
