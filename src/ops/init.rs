//! Implementation of `flotilla init`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::core::manifest::{generate_default_manifest, MANIFEST_NAME};

/// Options for initializing a project.
#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    /// Product name. Defaults to the directory name.
    pub name: Option<String>,
}

/// Initialize a flotilla project in the given directory.
///
/// Returns the product name the manifest was created with.
pub fn init_project(path: &Path, opts: &InitOptions) -> Result<String> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }

    let manifest_path = path.join(MANIFEST_NAME);
    if manifest_path.exists() {
        bail!(
            "`{}` already exists in `{}`\n\
             \n\
             Edit it directly, or use `flotilla target add` to configure platforms.",
            MANIFEST_NAME,
            path.display()
        );
    }

    let name = match &opts.name {
        Some(name) => name.clone(),
        None => default_project_name(path)?,
    };

    fs::write(&manifest_path, generate_default_manifest(&name))
        .with_context(|| format!("failed to write {}", MANIFEST_NAME))?;

    let scenes_dir = path.join("scenes");
    fs::create_dir_all(&scenes_dir).with_context(|| "failed to create scenes directory")?;

    let gitignore = r#"# flotilla build artifacts
builds/
.flotilla/
"#;
    fs::write(path.join(".gitignore"), gitignore)?;

    Ok(name)
}

/// Derive a product name from the directory.
fn default_project_name(path: &Path) -> Result<String> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("failed to resolve directory: {}", path.display()))?;

    canonical
        .file_name()
        .and_then(|n| n.to_str())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "cannot derive a project name from `{}`; pass --name",
                path.display()
            )
        })
}
