//! Test fixtures for common test scenarios.
//!
//! This module provides project generators for tests that need a real
//! Flotilla.toml on disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Fixture for a complete project on disk.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Product name.
    pub name: String,
    /// Scene file names created under `scenes/`.
    pub scenes: Vec<String>,
    /// Platform tokens written to `[build] targets`.
    pub targets: Vec<String>,
    /// Output root written to `[build]`.
    pub output_root: String,
    /// Development flag written to `[build]`.
    pub development: bool,
    /// Engine program and argument template, if any.
    pub engine: Option<(String, Vec<String>)>,
}

impl ProjectFixture {
    /// Create a fixture with defaults and no targets.
    pub fn new(name: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            scenes: vec!["menu.scene".to_string(), "level1.scene".to_string()],
            targets: Vec::new(),
            output_root: "builds".to_string(),
            development: false,
            engine: None,
        }
    }

    /// Set the configured platform tokens.
    pub fn with_targets(mut self, tokens: &[&str]) -> Self {
        self.targets = tokens.iter().map(|t| t.to_string()).collect();
        self
    }

    /// Set the engine program and argument template.
    pub fn with_engine(mut self, program: impl Into<String>, args: &[&str]) -> Self {
        self.engine = Some((program.into(), args.iter().map(|a| a.to_string()).collect()));
        self
    }

    /// Set the development flag.
    pub fn development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    /// Render the Flotilla.toml content.
    pub fn manifest(&self) -> String {
        let quote_list = |items: &[String]| {
            items
                .iter()
                .map(|i| format!("\"{}\"", i))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let scene_globs: Vec<String> = self
            .scenes
            .iter()
            .map(|s| format!("scenes/{}", s))
            .collect();

        let mut manifest = format!(
            r#"[project]
name = "{name}"
scenes = [{scenes}]

[build]
output_root = "{output_root}"
development = {development}
targets = [{targets}]
"#,
            name = self.name,
            scenes = quote_list(&scene_globs),
            output_root = self.output_root,
            development = self.development,
            targets = quote_list(&self.targets),
        );

        if let Some((program, args)) = &self.engine {
            manifest.push_str(&format!(
                r#"
[engine]
program = "{program}"
args = [{args}]
"#,
                program = program,
                args = quote_list(args),
            ));
        }

        manifest
    }

    /// Write the project to a directory, returning the manifest path.
    ///
    /// Scene files are created so scene globs resolve.
    pub fn write_to(&self, root: &Path) -> Result<PathBuf> {
        let scenes_dir = root.join("scenes");
        std::fs::create_dir_all(&scenes_dir)
            .with_context(|| format!("failed to create {}", scenes_dir.display()))?;
        for scene in &self.scenes {
            let path = scenes_dir.join(scene);
            std::fs::write(&path, "")
                .with_context(|| format!("failed to write {}", path.display()))?;
        }

        let manifest_path = root.join(crate::core::manifest::MANIFEST_NAME);
        std::fs::write(&manifest_path, self.manifest())
            .with_context(|| format!("failed to write {}", manifest_path.display()))?;
        Ok(manifest_path)
    }
}

/// Write an executable stub engine script that logs its arguments.
///
/// The script appends each invocation's arguments to `engine.log` next to
/// itself and exits with the given code.
#[cfg(unix)]
pub fn write_stub_engine(dir: &Path, exit_code: i32) -> Result<PathBuf> {
    use std::os::unix::fs::PermissionsExt;

    let script_path = dir.join("engine.sh");
    let log_path = dir.join("engine.log");
    let script = format!(
        "#!/bin/sh\nprintf '%s\\n' \"$*\" >> \"{}\"\nexit {}\n",
        log_path.display(),
        exit_code
    );
    std::fs::write(&script_path, script)
        .with_context(|| format!("failed to write {}", script_path.display()))?;

    let mut perms = std::fs::metadata(&script_path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&script_path, perms)?;

    Ok(script_path)
}

/// Read the invocation log left behind by a stub engine script.
#[cfg(unix)]
pub fn read_stub_engine_log(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("engine.log"))
        .unwrap_or_default()
        .lines()
        .map(|l| l.to_string())
        .collect()
}
