//! Branch synchronization
//!
//! Sync propagates the configured inclusion list from one source branch
//! into any number of target branches. Each target keeps its branch-local
//! customization: its marker file is never overwritten, nor is anything on
//! the `preserve` list.
//!
//! Targets are processed strictly in the given order and failures are
//! isolated per target. One broken branch does not stop the rest; the
//! caller receives an ordered report with one outcome per target. The
//! checkout that was active when sync started is restored on every exit
//! path.

use crate::config::Config;
use crate::constants::sync_commit_message;
use crate::error::{Error, Result};
use crate::git_interface::{CheckoutGuard, GitInterface};
use crate::utils::{print_progress, print_success, print_warning};

/// Result of synchronizing a single target branch.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Shared files were copied, committed, and pushed.
    Updated { files: Vec<String> },
    /// The target already matched the source for every included file.
    NoChanges,
    /// The target could not be synchronized; later targets were still tried.
    Failed(Error),
}

impl SyncOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SyncOutcome::Failed(_))
    }
}

/// Ordered per-target outcomes of one sync run.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub results: Vec<(String, SyncOutcome)>,
}

impl SyncReport {
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|(_, outcome)| outcome.is_failure())
    }

    pub fn outcome_for(&self, branch: &str) -> Option<&SyncOutcome> {
        self.results
            .iter()
            .find(|(name, _)| name == branch)
            .map(|(_, outcome)| outcome)
    }
}

/// Propagates the inclusion list from `source` into each target branch.
///
/// With an empty `targets` slice, targets are discovered from the remote:
/// every remote branch except the source, the configured skip list, and the
/// remote HEAD pointer.
///
/// # Errors
///
/// Returns an error only for whole-run problems (source branch missing,
/// target discovery failing, the original checkout being unreadable).
/// Per-target failures are reported inside the [`SyncReport`] instead.
pub fn sync_branches(
    git: &dyn GitInterface,
    config: &Config,
    source: &str,
    targets: &[String],
) -> Result<SyncReport> {
    if !git.branch_exists(source)? {
        return Err(Error::BranchNotFound(source.to_string()));
    }

    let guard = CheckoutGuard::acquire(git)?;

    let targets = if targets.is_empty() {
        discover_targets(git, config, source)?
    } else {
        targets.to_vec()
    };

    let mut report = SyncReport::default();
    for target in &targets {
        print_progress(&format!("Syncing '{target}' from '{source}'..."));
        let outcome = match sync_target(git, config, source, target) {
            Ok(outcome) => outcome,
            Err(err) => SyncOutcome::Failed(err),
        };
        match &outcome {
            SyncOutcome::Updated { files } => {
                print_success(&format!("'{target}' updated ({} files)", files.len()))
            }
            SyncOutcome::NoChanges => print_success(&format!("'{target}' already up to date")),
            SyncOutcome::Failed(err) => print_warning(&format!("'{target}' failed: {err}")),
        }
        report.results.push((target.clone(), outcome));
    }

    drop(guard);
    Ok(report)
}

/// Remote branches eligible as sync targets.
fn discover_targets(
    git: &dyn GitInterface,
    config: &Config,
    source: &str,
) -> Result<Vec<String>> {
    git.fetch_all()?;
    let remote = &config.remote.name;

    Ok(git
        .list_remote_branches(remote)?
        .into_iter()
        .filter(|name| name != source)
        .filter(|name| !config.sync.skip_branches.contains(name))
        .collect())
}

/// Synchronizes one target branch. Runs to completion or fails atomically
/// from the caller's perspective; a partially modified working tree may
/// remain on disk, but only completed commits reach the remote.
fn sync_target(
    git: &dyn GitInterface,
    config: &Config,
    source: &str,
    target: &str,
) -> Result<SyncOutcome> {
    let remote = &config.remote.name;

    if git.branch_exists(target)? {
        git.checkout(target)?;
    } else if git.remote_branch_exists(remote, target)? {
        git.checkout_tracking(target, remote)?;
    } else {
        return Err(Error::BranchNotFound(target.to_string()));
    }

    let branch_marker = config.marker.file_for_branch(target);
    let mut copied = Vec::new();

    for path in &config.sync.include {
        if *path == branch_marker || config.sync.preserve.contains(path) {
            continue;
        }

        match git.checkout_path_from(source, path) {
            Ok(()) => copied.push(path.clone()),
            Err(err) if err.is_unmatched_pathspec() => {
                print_warning(&format!("'{path}' not found in '{source}', skipping"));
            }
            Err(err) => return Err(err),
        }
    }

    let changed: Vec<String> = git
        .changed_paths()?
        .into_iter()
        .filter(|changed_path| {
            copied.iter().any(|copy| {
                changed_path == copy || changed_path.starts_with(&format!("{copy}/"))
            })
        })
        .collect();

    if changed.is_empty() {
        return Ok(SyncOutcome::NoChanges);
    }

    git.commit(&sync_commit_message(source))?;
    git.push()?;

    Ok(SyncOutcome::Updated { files: changed })
}
