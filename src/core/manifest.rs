//! Flotilla.toml manifest parsing and schema.
//!
//! The manifest is the central configuration file for a flotilla project:
//! product metadata, build settings and the engine invocation template.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::platform::Platform;
use crate::core::settings::BuildSettings;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Flotilla.toml";

/// No Flotilla.toml was found in a directory or any of its parents.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("could not find `Flotilla.toml` in `{}` or any parent directory", dir.display())]
#[diagnostic(
    code(flotilla::manifest::not_found),
    help("run `flotilla init` to create a new project here")
)]
pub struct ManifestNotFound {
    pub dir: PathBuf,
}

/// Project metadata from the [project] section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMetadata {
    /// Product name, used to name build outputs.
    pub name: String,

    /// Glob patterns for the scenes included in every build, relative to
    /// the project root.
    #[serde(default)]
    pub scenes: Vec<String>,
}

/// Engine invocation settings from the [engine] section.
///
/// The same table may appear in the per-user config file; the project
/// manifest wins field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine executable, resolved on PATH.
    #[serde(default)]
    pub program: Option<String>,

    /// Argument template. `{project}`, `{target}` and `{output}` are
    /// replaced per invocation; a standalone `{scenes}` argument expands to
    /// one argument per scene path.
    #[serde(default)]
    pub args: Vec<String>,

    /// Flag appended when a development build is requested.
    #[serde(default)]
    pub development_flag: Option<String>,
}

/// The parsed Flotilla.toml manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Product metadata
    pub project: ProjectMetadata,

    /// Build settings, validated and with targets in display order
    pub build: BuildSettings,

    /// Engine invocation settings
    pub engine: EngineConfig,

    /// The directory containing this manifest
    pub manifest_dir: PathBuf,
}

/// Raw manifest as deserialized from TOML.
#[derive(Debug, Deserialize)]
struct RawManifest {
    #[serde(default)]
    project: Option<ProjectMetadata>,

    #[serde(default)]
    build: Option<RawBuildSettings>,

    #[serde(default)]
    engine: EngineConfig,
}

/// Raw [build] section (before validation).
#[derive(Debug, Default, Deserialize)]
struct RawBuildSettings {
    #[serde(default)]
    output_root: Option<String>,

    #[serde(default = "default_true")]
    use_product_name: bool,

    #[serde(default)]
    override_name: String,

    #[serde(default)]
    development: bool,

    #[serde(default)]
    targets: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Manifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawManifest =
            toml::from_str(content).with_context(|| "failed to parse Flotilla.toml")?;

        let manifest_dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();

        let Some(project) = raw.project else {
            anyhow::bail!(
                "manifest at {} must have a [project] section",
                path.display()
            );
        };
        if project.name.is_empty() {
            anyhow::bail!(
                "manifest at {} has an empty project name",
                path.display()
            );
        }

        // Convert the raw [build] section into validated settings. Unknown
        // and duplicate platform tokens are load errors, never silent skips.
        let mut build = BuildSettings::new();
        if let Some(raw_build) = raw.build {
            if let Some(output_root) = raw_build.output_root {
                build.output_root = output_root;
            }
            build.use_product_name = raw_build.use_product_name;
            build.override_name = raw_build.override_name;
            build.development = raw_build.development;
            for token in &raw_build.targets {
                let platform: Platform = token
                    .parse()
                    .with_context(|| format!("invalid [build] targets in {}", path.display()))?;
                build
                    .add_target(platform)
                    .with_context(|| format!("invalid [build] targets in {}", path.display()))?;
            }
        }

        Ok(Manifest {
            project,
            build,
            engine: raw.engine,
            manifest_dir,
        })
    }

    /// Get the product name builds are labelled with.
    pub fn product_name(&self) -> &str {
        &self.project.name
    }
}

/// Generate a default Flotilla.toml for a new project.
pub fn generate_default_manifest(name: &str) -> String {
    format!(
        r#"[project]
name = "{name}"
scenes = ["scenes/*.scene"]

[build]
output_root = "builds"
use_product_name = true
override_name = ""
development = false
targets = []

[engine]
program = "unity-editor"
args = ["-batchmode", "-quit", "-projectPath", "{{project}}", "-buildTarget", "{{target}}", "-outputPath", "{{output}}"]
development_flag = "-development"
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_basic_manifest() {
        let content = r#"
[project]
name = "Game"
scenes = ["scenes/*.scene"]

[build]
output_root = "/builds"
targets = ["android", "webgl"]
"#;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Flotilla.toml");

        let manifest = Manifest::parse(content, &path).unwrap();
        assert_eq!(manifest.product_name(), "Game");
        assert_eq!(manifest.project.scenes, vec!["scenes/*.scene"]);
        assert_eq!(manifest.build.output_root, "/builds");
        assert!(manifest.build.use_product_name);
        assert_eq!(
            manifest.build.targets(),
            &[Platform::Android, Platform::WebGl]
        );
        assert_eq!(manifest.manifest_dir, tmp.path());
    }

    #[test]
    fn test_parse_normalizes_target_order() {
        let content = r#"
[project]
name = "Game"

[build]
targets = ["win64", "android", "linux64"]
"#;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Flotilla.toml");

        let manifest = Manifest::parse(content, &path).unwrap();
        assert_eq!(
            manifest.build.targets(),
            &[Platform::Android, Platform::Linux64, Platform::Win64]
        );
    }

    #[test]
    fn test_parse_defaults_without_build_section() {
        let content = r#"
[project]
name = "Game"
"#;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Flotilla.toml");

        let manifest = Manifest::parse(content, &path).unwrap();
        assert_eq!(manifest.build.output_root, "builds");
        assert!(manifest.build.use_product_name);
        assert!(manifest.build.targets().is_empty());
        assert_eq!(manifest.engine, EngineConfig::default());
    }

    #[test]
    fn test_parse_engine_section() {
        let content = r#"
[project]
name = "Game"

[engine]
program = "unity-editor"
args = ["-buildTarget", "{target}", "-outputPath", "{output}"]
development_flag = "-development"
"#;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Flotilla.toml");

        let manifest = Manifest::parse(content, &path).unwrap();
        assert_eq!(manifest.engine.program.as_deref(), Some("unity-editor"));
        assert_eq!(manifest.engine.args.len(), 4);
        assert_eq!(manifest.engine.development_flag.as_deref(), Some("-development"));
    }

    #[test]
    fn test_parse_rejects_unknown_target() {
        let content = r#"
[project]
name = "Game"

[build]
targets = ["android", "dreamcast"]
"#;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Flotilla.toml");

        let err = Manifest::parse(content, &path).unwrap_err();
        assert!(format!("{:#}", err).contains("dreamcast"));
    }

    #[test]
    fn test_parse_rejects_duplicate_target() {
        let content = r#"
[project]
name = "Game"

[build]
targets = ["android", "android"]
"#;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Flotilla.toml");

        let err = Manifest::parse(content, &path).unwrap_err();
        assert!(format!("{:#}", err).contains("already a build target"));
    }

    #[test]
    fn test_manifest_requires_project_section() {
        let content = r#"
[build]
targets = ["android"]
"#;
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Flotilla.toml");

        let err = Manifest::parse(content, &path).unwrap_err();
        assert!(err.to_string().contains("must have a [project] section"));
    }

    #[test]
    fn test_generated_manifest_round_trips() {
        let content = generate_default_manifest("mygame");
        assert!(content.contains("name = \"mygame\""));

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Flotilla.toml");
        let manifest = Manifest::parse(&content, &path).unwrap();
        assert_eq!(manifest.product_name(), "mygame");
        assert!(manifest.build.targets().is_empty());
        assert_eq!(manifest.engine.program.as_deref(), Some("unity-editor"));
    }
}
