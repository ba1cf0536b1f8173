//! Implementation of `flotilla target add`, `target remove` and `target list`.

use std::path::Path;

use anyhow::{Context, Result};
use toml_edit::{value, Array, DocumentMut, Item, Table};

use crate::core::manifest::{Manifest, MANIFEST_NAME};
use crate::core::platform::Platform;
use crate::core::settings::BuildSettings;
use crate::util::fs;

/// Add a platform to the manifest's build targets.
///
/// The manifest is only rewritten once the whole change is known to be
/// valid; a bad token or duplicate leaves the file untouched.
pub fn add_target(manifest_path: &Path, token: &str) -> Result<Platform> {
    let platform: Platform = token.parse()?;

    let manifest = Manifest::load(manifest_path)?;
    let mut settings = manifest.build.clone();
    settings.add_target(platform)?;

    write_targets(manifest_path, &settings)?;
    Ok(platform)
}

/// Remove a platform from the manifest's build targets.
pub fn remove_target(manifest_path: &Path, token: &str) -> Result<Platform> {
    let platform: Platform = token.parse()?;

    let manifest = Manifest::load(manifest_path)?;
    let mut settings = manifest.build.clone();
    settings.remove_target(platform)?;

    write_targets(manifest_path, &settings)?;
    Ok(platform)
}

/// List the configured build targets in display order.
pub fn list_targets(manifest_path: &Path) -> Result<Vec<Platform>> {
    let manifest = Manifest::load(manifest_path)?;
    Ok(manifest.build.targets().to_vec())
}

/// Rewrite `[build] targets` in place, preserving the rest of the file.
fn write_targets(manifest_path: &Path, settings: &BuildSettings) -> Result<()> {
    let content = fs::read_to_string(manifest_path)?;
    let mut doc: DocumentMut = content
        .parse()
        .with_context(|| format!("failed to parse {}", MANIFEST_NAME))?;

    let mut targets = Array::new();
    for platform in settings.targets() {
        targets.push(platform.as_str());
    }

    if !doc.contains_key("build") {
        doc["build"] = Item::Table(Table::new());
    }
    doc["build"]["targets"] = value(targets);

    fs::write_string(manifest_path, &doc.to_string())?;
    Ok(())
}
