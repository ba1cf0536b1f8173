//! flotilla - A multi-platform build driver for game engine projects
//!
//! This crate provides the core library functionality for flotilla,
//! including the platform catalog, build planning, and sequential
//! engine orchestration.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for flotilla unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides scripted implementations of the build
/// runner and active-target state.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{manifest::Manifest, platform::Platform, settings::BuildSettings};

pub use crate::builder::{BuildPlan, Orchestrator};
pub use crate::util::context::GlobalContext;
