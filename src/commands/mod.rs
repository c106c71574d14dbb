//! Command implementations for the CLI surface.

pub mod derive;
pub mod sync;

pub use derive::derive_branch;
pub use sync::{sync_branches, SyncOutcome, SyncReport};
