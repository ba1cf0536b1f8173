//! Global context for flotilla operations.
//!
//! Provides centralized access to configuration paths and project discovery.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::core::manifest::{ManifestNotFound, MANIFEST_NAME};

/// Project directories for flotilla
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "flotilla", "flotilla"));

/// Global context containing configuration paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global flotilla data
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = if let Some(dirs) = PROJECT_DIRS.as_ref() {
            dirs.config_dir().to_path_buf()
        } else {
            // Fallback to ~/.flotilla
            directories::BaseDirs::new()
                .map(|b| b.home_dir().join(".flotilla"))
                .unwrap_or_else(|| PathBuf::from(".flotilla"))
        };

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the flotilla home directory.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Find the manifest file (Flotilla.toml) starting from cwd and searching upward.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestNotFound> {
        let mut current = self.cwd.clone();
        loop {
            let candidate = current.join(MANIFEST_NAME);
            if candidate.is_file() {
                return Ok(candidate);
            }
            if !current.pop() {
                return Err(ManifestNotFound {
                    dir: self.cwd.clone(),
                });
            }
        }
    }

    /// Find the project root (directory containing Flotilla.toml).
    pub fn find_project_root(&self) -> Result<PathBuf, ManifestNotFound> {
        self.find_manifest().map(|p| {
            p.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.cwd.clone())
        })
    }
}
