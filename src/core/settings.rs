//! Build settings.
//!
//! The validated in-memory form of a project's build choices: where output
//! goes, how products are named, and which platforms to build.

use std::cmp::Ordering;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::platform::Platform;

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT_ROOT: &str = "builds";

/// User-editable build choices.
///
/// `targets` holds distinct platforms kept sorted case-insensitively by
/// display name (catalog order breaking ties). Mutations are all-or-nothing:
/// a failed add or remove leaves the settings untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Root directory builds are written under. Relative paths are resolved
    /// against the project root at build time.
    pub output_root: String,
    /// Name outputs after the project's product name.
    pub use_product_name: bool,
    /// Output name used when `use_product_name` is false.
    pub override_name: String,
    /// Request debug-instrumented builds from the engine.
    pub development: bool,
    targets: Vec<Platform>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings {
            output_root: DEFAULT_OUTPUT_ROOT.to_string(),
            use_product_name: true,
            override_name: String::new(),
            development: false,
            targets: Vec::new(),
        }
    }
}

impl BuildSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put every field back to its default and clear the target list.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Configured targets in display order.
    pub fn targets(&self) -> &[Platform] {
        &self.targets
    }

    pub fn has_target(&self, platform: Platform) -> bool {
        self.targets.contains(&platform)
    }

    /// Insert a target, keeping the list sorted by display name.
    pub fn add_target(&mut self, platform: Platform) -> Result<(), DuplicateTargetError> {
        if self.has_target(platform) {
            return Err(DuplicateTargetError { platform });
        }
        let at = self
            .targets
            .partition_point(|p| p.display_cmp(platform) == Ordering::Less);
        self.targets.insert(at, platform);
        Ok(())
    }

    /// Remove a target, preserving the order of the rest.
    pub fn remove_target(&mut self, platform: Platform) -> Result<(), TargetNotFoundError> {
        match self.targets.iter().position(|p| *p == platform) {
            Some(index) => {
                self.targets.remove(index);
                Ok(())
            }
            None => Err(TargetNotFoundError { platform }),
        }
    }

    /// Check the settings are complete enough to compile a build plan.
    ///
    /// Reports every violated rule at once rather than stopping at the first.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut problems = Vec::new();
        if self.output_root.is_empty() {
            problems.push("output root is empty".to_string());
        }
        if !self.use_product_name && self.override_name.is_empty() {
            problems.push("override name is empty but use_product_name is false".to_string());
        }
        if self.targets.is_empty() {
            problems.push("no build targets configured".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { problems })
        }
    }
}

/// Error returned when adding a platform that is already a target.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("platform `{platform}` is already a build target")]
#[diagnostic(code(flotilla::settings::duplicate_target))]
pub struct DuplicateTargetError {
    pub platform: Platform,
}

/// Error returned when removing a platform that is not a target.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("platform `{platform}` is not a build target")]
#[diagnostic(code(flotilla::settings::target_not_found))]
pub struct TargetNotFoundError {
    pub platform: Platform,
}

/// Error returned when settings fail structural checks. Carries every
/// violated rule, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("invalid build settings: {}", .problems.join("; "))]
#[diagnostic(
    code(flotilla::settings::invalid),
    help("Edit Flotilla.toml, or use `flotilla target add` to configure platforms")
)]
pub struct ValidationError {
    pub problems: Vec<String>,
}
