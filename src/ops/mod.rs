//! High-level operations.
//!
//! This module contains the implementation of flotilla commands.

pub mod build;
pub mod init;
pub mod target;

pub use build::{batch_build, build, BatchOptions, BuildOptions, BuildOutcome};
pub use init::{init_project, InitOptions};
pub use target::{add_target, list_targets, remove_target};
