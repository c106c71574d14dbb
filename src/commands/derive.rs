//! Branch derivation
//!
//! Deriving a branch turns the current branch's tip into a new customizable
//! branch: the requested name is sanitized, the marker file is renamed to
//! match the new branch, excluded paths are dropped, and the result is
//! committed and pushed with an upstream tracking reference.
//!
//! The operation fails fast. Any git failure aborts the remaining steps and
//! surfaces as-is; whatever was already done to the local working tree stays
//! on disk for the operator to inspect, retry, or delete.

use crate::config::Config;
use crate::constants::{derive_commit_message, sanitized_name_prompt};
use crate::core::sanitize_branch_name;
use crate::error::{Error, Result};
use crate::git_interface::GitInterface;
use crate::ui::UserInterface;
use crate::utils::{print_progress, print_success};

/// Creates a new branch derived from the current one.
///
/// # Arguments
///
/// * `git` - Git interface to operate through
/// * `config` - File manifest (exclusion list, marker file, remote)
/// * `ui` - Confirmation prompt, consulted when sanitization changed the name
/// * `desired_name` - Branch name as requested by the user
/// * `assume_yes` - Skip the confirmation prompt (non-interactive use)
///
/// # Returns
///
/// * `Ok(Some(name))` - The branch was created and pushed under `name`
/// * `Ok(None)` - The user declined the sanitized name; nothing was done
///
/// # Errors
///
/// * [`Error::InvalidName`] - Nothing usable remained after sanitization
/// * [`Error::IdentityUnset`] - `user.name` / `user.email` not configured
/// * [`Error::BranchExists`] - A branch with the sanitized name exists
///   locally or on the remote; it is left untouched
/// * [`Error::CommandFailed`] - An underlying git command failed; prior
///   local changes remain on disk but nothing was pushed
pub fn derive_branch(
    git: &dyn GitInterface,
    config: &Config,
    ui: &dyn UserInterface,
    desired_name: &str,
    assume_yes: bool,
) -> Result<Option<String>> {
    let name = sanitize_branch_name(desired_name)?;

    if name != desired_name && !assume_yes {
        let prompt = sanitized_name_prompt(desired_name, &name);
        if !ui.confirm(&prompt)? {
            return Ok(None);
        }
    }

    if !git.identity_configured()? {
        return Err(Error::IdentityUnset);
    }

    let remote = &config.remote.name;
    if git.branch_exists(&name)? || git.remote_branch_exists(remote, &name)? {
        return Err(Error::BranchExists(name));
    }

    print_progress(&format!("Creating branch '{name}'..."));
    git.checkout_new(&name)?;
    print_success(&format!("Created and switched to '{name}'"));

    let marker = &config.marker.file;
    let branch_marker = config.marker.file_for_branch(&name);
    print_progress(&format!("Renaming '{marker}' to '{branch_marker}'..."));
    git.move_path(marker, &branch_marker)?;
    print_success(&format!("Renamed '{marker}' to '{branch_marker}'"));

    for path in &config.derive.exclude {
        if git.path_in_worktree(path) {
            git.remove_path(path)?;
            print_success(&format!("Removed '{path}'"));
        }
    }

    git.stage_all()?;
    git.commit(&derive_commit_message(&name))?;

    print_progress(&format!("Pushing '{name}' to '{remote}'..."));
    git.push_new_branch(remote, &name)?;
    print_success(&format!("Pushed '{name}' to '{remote}'"));

    Ok(Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git_interface::MockGit;
    use crate::ui::MockUI;

    fn scenario() -> MockGit {
        MockGit::new().with_branch(
            "main",
            &[
                ("main.mdc", "# base customization"),
                ("README.md", "# Project"),
                ("rules/general.mdc", "# shared rules"),
                ("todo.txt", "scratch notes"),
                (".vscode/settings.json", "{}"),
            ],
        )
    }

    #[test]
    fn test_derive_renames_marker_and_removes_exclusions() {
        let git = scenario();
        let config = Config::default();
        let ui = MockUI::new();

        let result = derive_branch(&git, &config, &ui, "feature", false).unwrap();
        assert_eq!(result.as_deref(), Some("feature"));

        assert_eq!(
            git.committed_file("feature", "feature.mdc").unwrap(),
            "# base customization"
        );
        assert!(git.committed_file("feature", "main.mdc").is_none());
        assert!(git.committed_file("feature", "todo.txt").is_none());
        assert!(git
            .committed_file("feature", ".vscode/settings.json")
            .is_none());
        assert_eq!(git.pushed_branches(), vec!["feature"]);
    }

    #[test]
    fn test_derive_sanitized_name_after_confirmation() {
        let git = scenario();
        let config = Config::default();
        let ui = MockUI::new().with_confirm(true);

        let result = derive_branch(&git, &config, &ui, "My Feature", false).unwrap();
        assert_eq!(result.as_deref(), Some("my-feature"));

        assert_eq!(
            git.committed_file("my-feature", "my-feature.mdc").unwrap(),
            "# base customization"
        );
        assert!(ui.is_exhausted());
    }

    #[test]
    fn test_derive_declined_confirmation_does_nothing() {
        let git = scenario();
        let config = Config::default();
        let ui = MockUI::new().with_confirm(false);

        let result = derive_branch(&git, &config, &ui, "My Feature", false).unwrap();
        assert!(result.is_none());

        assert!(!git.branch_exists("my-feature").unwrap());
        assert!(git.pushed_branches().is_empty());
    }

    #[test]
    fn test_derive_assume_yes_skips_prompt() {
        let git = scenario();
        let config = Config::default();
        let ui = MockUI::new();

        let result = derive_branch(&git, &config, &ui, "My Feature", true).unwrap();
        assert_eq!(result.as_deref(), Some("my-feature"));
    }

    #[test]
    fn test_derive_rejects_unusable_name() {
        let git = scenario();
        let config = Config::default();
        let ui = MockUI::new().with_confirm(true);

        let err = derive_branch(&git, &config, &ui, "???", false).unwrap_err();
        assert!(matches!(err, Error::InvalidName { .. }));
    }

    #[test]
    fn test_derive_existing_branch_is_left_untouched() {
        let git = scenario().with_branch("feature", &[("feature.mdc", "custom")]);
        let config = Config::default();
        let ui = MockUI::new();

        let err = derive_branch(&git, &config, &ui, "feature", false).unwrap_err();
        assert!(matches!(err, Error::BranchExists(ref name) if name == "feature"));

        assert_eq!(
            git.committed_file("feature", "feature.mdc").unwrap(),
            "custom"
        );
        assert!(git.pushed_branches().is_empty());
    }

    #[test]
    fn test_derive_existing_remote_branch_is_refused() {
        let git = scenario().with_remote_branch("feature", &[]);
        let config = Config::default();
        let ui = MockUI::new();

        let err = derive_branch(&git, &config, &ui, "feature", false).unwrap_err();
        assert!(matches!(err, Error::BranchExists(_)));
    }

    #[test]
    fn test_derive_requires_identity() {
        let git = scenario().without_identity();
        let config = Config::default();
        let ui = MockUI::new();

        let err = derive_branch(&git, &config, &ui, "feature", false).unwrap_err();
        assert!(matches!(err, Error::IdentityUnset));
    }

    #[test]
    fn test_derive_push_failure_keeps_local_commit() {
        let git = scenario().with_failing_push("feature");
        let config = Config::default();
        let ui = MockUI::new();

        let err = derive_branch(&git, &config, &ui, "feature", false).unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));

        // Local branch exists with the rename committed, nothing pushed.
        assert!(git.branch_exists("feature").unwrap());
        assert_eq!(
            git.committed_file("feature", "feature.mdc").unwrap(),
            "# base customization"
        );
        assert!(git.pushed_branches().is_empty());
    }
}
