//! Core business logic with no UI or git dependencies.

pub mod sanitize;

pub use sanitize::sanitize_branch_name;
