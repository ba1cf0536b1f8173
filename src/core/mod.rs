//! Core data structures for flotilla.
//!
//! This module contains the foundational types used throughout flotilla:
//! - The platform catalog
//! - Build settings and their mutation rules
//! - The Flotilla.toml manifest

pub mod manifest;
pub mod platform;
pub mod settings;

pub use manifest::{
    generate_default_manifest, EngineConfig, Manifest, ManifestNotFound, MANIFEST_NAME,
};
pub use platform::{sorted_display_list, Platform, PlatformDescriptor, UnknownPlatformError};
pub use settings::{
    BuildSettings, DuplicateTargetError, TargetNotFoundError, ValidationError, DEFAULT_OUTPUT_ROOT,
};
