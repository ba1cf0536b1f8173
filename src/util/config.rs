//! Configuration file support for flotilla.
//!
//! A per-user config file (`config.toml` under the flotilla home directory)
//! can carry an `[engine]` section with the same fields as the manifest's.
//! When both are present, the manifest wins field by field.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::manifest::EngineConfig;

/// Per-user flotilla configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Engine command defaults
    pub engine: EngineConfig,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory: {}", parent.display()))?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Resolve the engine configuration for a project.
    ///
    /// Fields set in the project's manifest override the per-user defaults.
    pub fn effective_engine(&self, project: &EngineConfig) -> EngineConfig {
        let mut engine = self.engine.clone();
        if project.program.is_some() {
            engine.program = project.program.clone();
        }
        if !project.args.is_empty() {
            engine.args = project.args.clone();
        }
        if project.development_flag.is_some() {
            engine.development_flag = project.development_flag.clone();
        }
        engine
    }
}
