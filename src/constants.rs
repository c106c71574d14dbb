//! Constants used throughout the application
//!
//! This module centralizes the default configuration lists, git invocation
//! strings, and user-facing message templates so they have a single source
//! of truth.

// Configuration
pub const CONFIG_FILE_NAME: &str = ".rulesync.toml";

// Defaults for the file manifest
pub const DEFAULT_REMOTE: &str = "origin";
pub const DEFAULT_MARKER_FILE: &str = "main.mdc";
pub const DEFAULT_INCLUDE_PATHS: &[&str] = &["README.md", "rules/general.mdc"];
pub const DEFAULT_EXCLUDE_PATHS: &[&str] = &[".vscode", "todo.txt", CONFIG_FILE_NAME];
pub const DEFAULT_SKIP_BRANCHES: &[&str] = &["main"];

// Git invocation
pub const GIT_CMD: &str = "git";
pub const GIT_REMOTE_HEAD_MARKER: &str = "->";

// Sanitization
pub const SEPARATOR_CHARS: &[char] = &['-', '/', '.'];
pub const ALLOWED_PUNCTUATION: &[char] = &['-', '_', '/', '.'];

// UI Formatting
pub const HEADER_SEPARATOR_WIDTH: usize = 50;

/// Commit message recorded when a branch is first derived.
pub fn derive_commit_message(branch: &str) -> String {
    format!("Initialize branch '{branch}'")
}

/// Commit message recorded when shared files are propagated into a target.
pub fn sync_commit_message(source: &str) -> String {
    format!("Propagate shared files from '{source}'")
}

/// Confirmation prompt shown when sanitization changed the requested name.
pub fn sanitized_name_prompt(original: &str, sanitized: &str) -> String {
    format!("Branch name '{original}' was sanitized to '{sanitized}'. Continue?")
}
