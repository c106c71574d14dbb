//! In-memory git fake for unit tests.
//!
//! Models just enough of a repository for the derive and sync flows: a set
//! of local branches with committed trees, a set of remote branches, one
//! working tree, and a current checkout. Mutations behave like their git
//! counterparts at the file level; history is not modeled.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::GitInterface;
use crate::error::{Error, Result};

type Tree = BTreeMap<String, String>;

#[derive(Debug, Default)]
struct GitState {
    branches: HashMap<String, Tree>,
    remote_branches: HashMap<String, Tree>,
    current: String,
    worktree: Tree,
    identity: bool,
    fail_push_for: HashSet<String>,
    pushes: Vec<String>,
    commits: Vec<(String, String)>,
}

/// Mock implementation of [`GitInterface`] for testing.
pub struct MockGit {
    state: Arc<Mutex<GitState>>,
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGit {
    /// Creates a mock with an empty `main` branch checked out.
    pub fn new() -> Self {
        let mut branches = HashMap::new();
        branches.insert("main".to_string(), Tree::new());

        Self {
            state: Arc::new(Mutex::new(GitState {
                branches,
                remote_branches: HashMap::new(),
                current: "main".to_string(),
                worktree: Tree::new(),
                identity: true,
                fail_push_for: HashSet::new(),
                pushes: Vec::new(),
                commits: Vec::new(),
            })),
        }
    }

    /// Adds (or replaces) a local branch with the given committed files.
    /// The working tree follows when this branch is the current checkout.
    pub fn with_branch(self, name: &str, files: &[(&str, &str)]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let tree = tree_from(files);
            if state.current == name {
                state.worktree = tree.clone();
            }
            state.branches.insert(name.to_string(), tree);
        }
        self
    }

    /// Adds a branch that exists only on the remote.
    pub fn with_remote_branch(self, name: &str, files: &[(&str, &str)]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.remote_branches.insert(name.to_string(), tree_from(files));
        }
        self
    }

    /// Switches the current checkout; the branch must already exist.
    pub fn with_current(self, name: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let tree = state
                .branches
                .get(name)
                .unwrap_or_else(|| panic!("unknown branch '{name}' in scenario"))
                .clone();
            state.current = name.to_string();
            state.worktree = tree;
        }
        self
    }

    /// Simulates missing `user.name` / `user.email` configuration.
    pub fn without_identity(self) -> Self {
        self.state.lock().unwrap().identity = false;
        self
    }

    /// Makes every push fail while the given branch is checked out.
    pub fn with_failing_push(self, branch: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .fail_push_for
            .insert(branch.to_string());
        self
    }

    /// Committed content of a file on a local branch.
    pub fn committed_file(&self, branch: &str, path: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.branches.get(branch)?.get(path).cloned()
    }

    /// Content of a file on the remote.
    pub fn remote_file(&self, branch: &str, path: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.remote_branches.get(branch)?.get(path).cloned()
    }

    /// Current working-tree content of a file.
    pub fn worktree_file(&self, path: &str) -> Option<String> {
        self.state.lock().unwrap().worktree.get(path).cloned()
    }

    /// Branches pushed so far, in push order.
    pub fn pushed_branches(&self) -> Vec<String> {
        self.state.lock().unwrap().pushes.clone()
    }

    /// Commits recorded so far as `(branch, message)` pairs.
    pub fn commit_messages(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().commits.clone()
    }

    fn command_failed(command: &str, stderr: &str) -> Error {
        Error::CommandFailed {
            command: command.to_string(),
            code: 1,
            stdout: String::new(),
            stderr: format!("{stderr}\n"),
        }
    }
}

fn tree_from(files: &[(&str, &str)]) -> Tree {
    files
        .iter()
        .map(|(path, content)| (path.to_string(), content.to_string()))
        .collect()
}

/// Entries of `tree` that live at `path`: the file itself or everything
/// under it when `path` is a directory.
fn entries_under(tree: &Tree, path: &str) -> Vec<(String, String)> {
    let dir_prefix = format!("{path}/");
    tree.iter()
        .filter(|(key, _)| *key == path || key.starts_with(&dir_prefix))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

impl GitInterface for MockGit {
    fn current_branch(&self) -> Result<String> {
        Ok(self.state.lock().unwrap().current.clone())
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        Ok(self.state.lock().unwrap().branches.contains_key(name))
    }

    fn remote_branch_exists(&self, _remote: &str, name: &str) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .remote_branches
            .contains_key(name))
    }

    fn list_remote_branches(&self, _remote: &str) -> Result<Vec<String>> {
        let state = self.state.lock().unwrap();
        let mut names: Vec<String> = state.remote_branches.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn fetch_all(&self) -> Result<()> {
        Ok(())
    }

    fn identity_configured(&self) -> Result<bool> {
        Ok(self.state.lock().unwrap().identity)
    }

    fn checkout(&self, branch: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let tree = state.branches.get(branch).cloned().ok_or_else(|| {
            Self::command_failed(
                &format!("git checkout {branch}"),
                &format!("error: pathspec '{branch}' did not match any file(s) known to git"),
            )
        })?;
        state.current = branch.to_string();
        state.worktree = tree;
        Ok(())
    }

    fn checkout_new(&self, branch: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.branches.contains_key(branch) {
            return Err(Self::command_failed(
                &format!("git checkout -b {branch}"),
                &format!("fatal: a branch named '{branch}' already exists"),
            ));
        }
        let tip = state.branches[&state.current].clone();
        state.branches.insert(branch.to_string(), tip);
        state.current = branch.to_string();
        Ok(())
    }

    fn checkout_tracking(&self, branch: &str, remote: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let tree = state.remote_branches.get(branch).cloned().ok_or_else(|| {
            Self::command_failed(
                &format!("git checkout -b {branch} {remote}/{branch}"),
                &format!("fatal: '{remote}/{branch}' is not a commit"),
            )
        })?;
        state.branches.insert(branch.to_string(), tree.clone());
        state.current = branch.to_string();
        state.worktree = tree;
        Ok(())
    }

    fn checkout_path_from(&self, source: &str, path: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let source_tree = state.branches.get(source).cloned().ok_or_else(|| {
            Self::command_failed(
                &format!("git checkout {source} -- {path}"),
                &format!("fatal: invalid reference: {source}"),
            )
        })?;

        let entries = entries_under(&source_tree, path);
        if entries.is_empty() {
            return Err(Self::command_failed(
                &format!("git checkout {source} -- {path}"),
                &format!("error: pathspec '{path}' did not match any file(s) known to git"),
            ));
        }

        for (key, value) in entries {
            state.worktree.insert(key, value);
        }
        Ok(())
    }

    fn move_path(&self, from: &str, to: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let content = state.worktree.remove(from).ok_or_else(|| {
            Self::command_failed(
                &format!("git mv {from} {to}"),
                &format!("fatal: bad source, source={from}, destination={to}"),
            )
        })?;
        state.worktree.insert(to.to_string(), content);
        Ok(())
    }

    fn remove_path(&self, path: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let removed: Vec<String> = entries_under(&state.worktree, path)
            .into_iter()
            .map(|(key, _)| key)
            .collect();

        if removed.is_empty() {
            return Err(Self::command_failed(
                &format!("git rm -r {path}"),
                &format!("fatal: pathspec '{path}' did not match any files"),
            ));
        }

        for key in removed {
            state.worktree.remove(&key);
        }
        Ok(())
    }

    fn path_in_worktree(&self, path: &str) -> bool {
        let state = self.state.lock().unwrap();
        !entries_under(&state.worktree, path).is_empty()
    }

    fn stage_all(&self) -> Result<()> {
        Ok(())
    }

    fn changed_paths(&self) -> Result<Vec<String>> {
        let state = self.state.lock().unwrap();
        let committed = &state.branches[&state.current];

        let mut changed: Vec<String> = Vec::new();
        for (path, content) in &state.worktree {
            if committed.get(path) != Some(content) {
                changed.push(path.clone());
            }
        }
        for path in committed.keys() {
            if !state.worktree.contains_key(path) {
                changed.push(path.clone());
            }
        }
        changed.sort();
        Ok(changed)
    }

    fn commit(&self, message: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if !state.identity {
            return Err(Self::command_failed(
                "git commit",
                "fatal: unable to auto-detect email address",
            ));
        }
        let current = state.current.clone();
        let snapshot = state.worktree.clone();
        state.branches.insert(current.clone(), snapshot);
        state.commits.push((current, message.to_string()));
        Ok(())
    }

    fn push(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let current = state.current.clone();
        if state.fail_push_for.contains(&current) {
            return Err(Self::command_failed(
                "git push",
                "fatal: unable to access remote repository",
            ));
        }
        let tree = state.branches[&current].clone();
        state.remote_branches.insert(current.clone(), tree);
        state.pushes.push(current);
        Ok(())
    }

    fn push_new_branch(&self, remote: &str, branch: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_push_for.contains(branch) {
            return Err(Self::command_failed(
                &format!("git push --set-upstream {remote} {branch}"),
                "fatal: unable to access remote repository",
            ));
        }
        let tree = state.branches[branch].clone();
        state.remote_branches.insert(branch.to_string(), tree);
        state.pushes.push(branch.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_switches_worktree() {
        let git = MockGit::new()
            .with_branch("main", &[("a.txt", "main content")])
            .with_branch("feature", &[("a.txt", "feature content")]);

        git.checkout("feature").unwrap();
        assert_eq!(git.worktree_file("a.txt").unwrap(), "feature content");

        git.checkout("main").unwrap();
        assert_eq!(git.worktree_file("a.txt").unwrap(), "main content");
    }

    #[test]
    fn test_checkout_path_from_copies_directories() {
        let git = MockGit::new()
            .with_branch(
                "main",
                &[("rules/a.mdc", "a"), ("rules/b.mdc", "b"), ("top.txt", "t")],
            )
            .with_branch("feature", &[])
            .with_current("feature");

        git.checkout_path_from("main", "rules").unwrap();
        assert_eq!(git.worktree_file("rules/a.mdc").unwrap(), "a");
        assert_eq!(git.worktree_file("rules/b.mdc").unwrap(), "b");
        assert!(git.worktree_file("top.txt").is_none());
    }

    #[test]
    fn test_changed_paths_tracks_edits_and_removals() {
        let git = MockGit::new().with_branch("main", &[("a.txt", "one"), ("b.txt", "two")]);

        git.move_path("a.txt", "c.txt").unwrap();
        let changed = git.changed_paths().unwrap();
        assert_eq!(changed, vec!["a.txt", "c.txt"]);
    }

    #[test]
    fn test_commit_then_push_updates_remote() {
        let git = MockGit::new().with_branch("main", &[("a.txt", "one")]);

        git.checkout_new("feature").unwrap();
        git.move_path("a.txt", "b.txt").unwrap();
        git.commit("rename").unwrap();
        git.push_new_branch("origin", "feature").unwrap();

        assert_eq!(git.remote_file("feature", "b.txt").unwrap(), "one");
        assert_eq!(git.pushed_branches(), vec!["feature"]);
    }

    #[test]
    fn test_missing_path_copy_reports_unmatched_pathspec() {
        let git = MockGit::new().with_branch("main", &[]);

        let err = git.checkout_path_from("main", "missing.txt").unwrap_err();
        assert!(err.is_unmatched_pathspec());
    }
}
