//! rulesync - Shared Rule-File Propagation Across Branches
//!
//! rulesync automates a branch-per-customization workflow: a repository
//! carries a set of shared rule files on its main branch, and every derived
//! branch keeps those shared files in sync while owning exactly one
//! branch-specific marker file named after the branch.
//!
//! # Operations
//!
//! - **Derive**: create a new branch from the current one, rename the marker
//!   file to match the branch name, and strip paths that should not travel
//!   with derived branches.
//! - **Sync**: copy the configured inclusion list from a source branch into
//!   one or more target branches, never touching branch-local customization,
//!   with per-target failure isolation.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`commands`] - Derive and sync implementations
//! - [`config`] - File manifest configuration (`.rulesync.toml`)
//! - [`constants`] - Defaults, messages, and git invocation strings
//! - [`core`] - Branch-name sanitization
//! - [`error`] - Typed error taxonomy
//! - [`git_interface`] - Git abstraction with real and mock implementations
//! - [`ui`] - Confirmation prompt abstraction
//! - [`utils`] - Terminal output helpers
//!
//! # Usage Example
//!
//! ```no_run
//! use rulesync::commands::sync_branches;
//! use rulesync::config::Config;
//! use rulesync::git_interface::RealGit;
//!
//! let git = RealGit::discover().expect("not inside a git repository");
//! let config = Config::load_from_path(git.workdir()).unwrap();
//!
//! let report = sync_branches(&git, &config, "main", &[]).unwrap();
//! for (branch, outcome) in &report.results {
//!     println!("{branch}: {outcome:?}");
//! }
//! ```

pub mod commands;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod git_interface;
pub mod ui;
pub mod utils;
