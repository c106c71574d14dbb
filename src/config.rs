//! Configuration management for rulesync
//!
//! Configuration is loaded from `.rulesync.toml` at the repository root and
//! describes the file manifest: which paths are propagated between branches,
//! which paths are removed when a branch is derived, and which paths are
//! branch-local and must never be overwritten.
//!
//! The configuration is deployment-time only. It is read once at startup
//! into an immutable [`Config`] value that is passed into each operation,
//! so tests can substitute their own manifest without process-wide state.
//!
//! # File Format
//!
//! ```toml
//! [sync]
//! include = ["README.md", "rules/general.mdc"]
//! preserve = ["project.mdc"]
//! skip_branches = ["main"]
//!
//! [derive]
//! exclude = [".vscode", "todo.txt"]
//!
//! [marker]
//! file = "main.mdc"
//!
//! [remote]
//! name = "origin"
//! ```
//!
//! Every section is optional; missing values fall back to the built-in
//! defaults in [`crate::constants`].

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_EXCLUDE_PATHS, DEFAULT_INCLUDE_PATHS, DEFAULT_MARKER_FILE,
    DEFAULT_REMOTE, DEFAULT_SKIP_BRANCHES,
};
use crate::error::Result;

/// Main configuration structure for rulesync.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// File propagation settings used by `sync`.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Branch derivation settings used by `derive`.
    #[serde(default)]
    pub derive: DeriveConfig,

    /// Marker file settings shared by both operations.
    #[serde(default)]
    pub marker: MarkerConfig,

    /// Remote settings for push and target discovery.
    #[serde(default)]
    pub remote: RemoteConfig,
}

/// Inclusion list and branch-local protections for synchronization.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Paths copied from the source branch into each target.
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    /// Paths that are branch-local and never overwritten by sync,
    /// in addition to the target's marker file.
    #[serde(default)]
    pub preserve: Vec<String>,

    /// Branches excluded when sync targets are discovered from the remote.
    #[serde(default = "default_skip_branches")]
    pub skip_branches: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            preserve: Vec::new(),
            skip_branches: default_skip_branches(),
        }
    }
}

/// Exclusion list applied when a new branch is derived.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeriveConfig {
    /// Paths removed from the working tree of a freshly derived branch.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            exclude: default_exclude(),
        }
    }
}

/// The marker file whose name tracks the branch name.
///
/// Deriving a branch renames the source marker to `<branch>.<ext>`, and sync
/// treats each target's marker as branch-local customization.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MarkerConfig {
    /// Marker file name as it appears on the source branch.
    #[serde(default = "default_marker_file")]
    pub file: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            file: default_marker_file(),
        }
    }
}

impl MarkerConfig {
    /// Marker file name for a given branch, keeping the configured extension.
    ///
    /// With the default `main.mdc`, branch `my-feature` owns `my-feature.mdc`.
    /// A marker configured without an extension maps to the bare branch name.
    pub fn file_for_branch(&self, branch: &str) -> String {
        match Path::new(&self.file).extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{branch}.{ext}"),
            None => branch.to_string(),
        }
    }
}

/// Remote used for pushes and remote-branch queries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    #[serde(default = "default_remote")]
    pub name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            name: default_remote(),
        }
    }
}

fn default_include() -> Vec<String> {
    DEFAULT_INCLUDE_PATHS.iter().map(|s| s.to_string()).collect()
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDE_PATHS.iter().map(|s| s.to_string()).collect()
}

fn default_skip_branches() -> Vec<String> {
    DEFAULT_SKIP_BRANCHES.iter().map(|s| s.to_string()).collect()
}

fn default_marker_file() -> String {
    DEFAULT_MARKER_FILE.to_string()
}

fn default_remote() -> String {
    DEFAULT_REMOTE.to_string()
}

impl Config {
    /// Loads configuration from `.rulesync.toml` in the given directory.
    ///
    /// A missing file yields the built-in defaults. An unreadable or
    /// unparsable file also yields the defaults, with a warning, so a typo
    /// in the manifest degrades the run instead of blocking every branch
    /// operation.
    pub fn load_from_path(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Warning: Failed to read {CONFIG_FILE_NAME}: {e}");
                return Ok(Config::default());
            }
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!("Warning: Failed to parse {CONFIG_FILE_NAME}: {e}");
                Ok(Config::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let config = Config::default();

        assert_eq!(config.sync.include, vec!["README.md", "rules/general.mdc"]);
        assert!(config.sync.preserve.is_empty());
        assert_eq!(config.sync.skip_branches, vec!["main"]);
        assert_eq!(
            config.derive.exclude,
            vec![".vscode", "todo.txt", CONFIG_FILE_NAME]
        );
        assert_eq!(config.marker.file, "main.mdc");
        assert_eq!(config.remote.name, "origin");
    }

    #[test]
    fn test_marker_file_for_branch_keeps_extension() {
        let marker = MarkerConfig {
            file: "main.mdc".to_string(),
        };
        assert_eq!(marker.file_for_branch("my-feature"), "my-feature.mdc");
    }

    #[test]
    fn test_marker_file_for_branch_without_extension() {
        let marker = MarkerConfig {
            file: "main".to_string(),
        };
        assert_eq!(marker.file_for_branch("my-feature"), "my-feature");
    }

    #[test]
    fn test_parse_full_manifest() {
        let toml = r#"
            [sync]
            include = ["rules/shared.mdc"]
            preserve = ["project.mdc"]
            skip_branches = ["main", "master"]

            [derive]
            exclude = ["scratch"]

            [marker]
            file = "base.mdc"

            [remote]
            name = "upstream"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sync.include, vec!["rules/shared.mdc"]);
        assert_eq!(config.sync.preserve, vec!["project.mdc"]);
        assert_eq!(config.sync.skip_branches, vec!["main", "master"]);
        assert_eq!(config.derive.exclude, vec!["scratch"]);
        assert_eq!(config.marker.file, "base.mdc");
        assert_eq!(config.remote.name, "upstream");
    }

    #[test]
    fn test_parse_partial_manifest_fills_defaults() {
        let toml = r#"
            [sync]
            preserve = ["project.mdc"]
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.sync.include, vec!["README.md", "rules/general.mdc"]);
        assert_eq!(config.sync.preserve, vec!["project.mdc"]);
        assert_eq!(config.marker.file, "main.mdc");
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from_path(dir.path()).unwrap();
        assert_eq!(config.remote.name, "origin");
    }

    #[test]
    fn test_load_invalid_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "not [valid toml").unwrap();

        let config = Config::load_from_path(dir.path()).unwrap();
        assert_eq!(config.sync.include, vec!["README.md", "rules/general.mdc"]);
    }
}
