//! Build plan compilation.
//!
//! A BuildPlan lists one engine invocation per configured target platform,
//! in target order. Compiling a plan is pure: the same settings, scene list
//! and product name always produce the same plan, and a validation failure
//! produces no plan at all.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::platform::Platform;
use crate::core::settings::{BuildSettings, ValidationError};

/// A fully-specified request to produce one build for one platform.
///
/// Invocations are immutable once compiled; the scene list is copied out of
/// the project state so later edits cannot change a plan in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInvocation {
    /// Platform this invocation builds
    pub platform: Platform,

    /// Identifier handed to the engine's build pipeline
    pub engine_target: String,

    /// Scenes included in the build, in project order
    pub scenes: Vec<PathBuf>,

    /// Where the engine writes the output
    pub output_path: PathBuf,

    /// Request a debug-instrumented build
    pub development: bool,
}

/// An ordered list of build invocations, one per configured target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Invocations in execution order
    pub invocations: Vec<BuildInvocation>,
}

impl BuildPlan {
    /// Compile settings into a plan.
    ///
    /// Invocation order matches `settings.targets()` order exactly; that
    /// order drives execution and progress reporting downstream. Each output
    /// path is `output_root/<subfolder>/<name>`, where the name is the
    /// product name or the override name depending on the naming policy, with
    /// `.exe` appended for platforms that need it.
    pub fn compile(
        settings: &BuildSettings,
        scenes: &[PathBuf],
        product_name: &str,
    ) -> Result<Self, ValidationError> {
        settings.validate()?;

        let output_name = if settings.use_product_name {
            product_name
        } else {
            &settings.override_name
        };

        let mut invocations = Vec::with_capacity(settings.targets().len());
        for platform in settings.targets() {
            let descriptor = platform.descriptor();

            let file_name = if descriptor.needs_exe_suffix {
                format!("{output_name}.exe")
            } else {
                output_name.to_string()
            };
            let output_path = PathBuf::from(&settings.output_root)
                .join(descriptor.subfolder)
                .join(file_name);

            invocations.push(BuildInvocation {
                platform: *platform,
                engine_target: descriptor.engine_target.to_string(),
                scenes: scenes.to_vec(),
                output_path,
                development: settings.development,
            });
        }

        Ok(BuildPlan { invocations })
    }

    /// Get the number of invocations.
    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }
}
