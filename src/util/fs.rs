//! Filesystem utilities.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Write a string to a file, creating parent directories if needed.
pub fn write_string(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Find files matching glob patterns relative to a base directory.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        // Make pattern absolute by joining with base
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        for entry in
            glob(&pattern_str).with_context(|| format!("invalid glob pattern: {}", pattern))?
        {
            match entry {
                Ok(path) => {
                    if path.is_file() {
                        results.push(path);
                    }
                }
                Err(e) => {
                    tracing::warn!("glob error: {}", e);
                }
            }
        }
    }

    results.sort();
    results.dedup();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files() {
        let tmp = TempDir::new().unwrap();
        let scenes = tmp.path().join("scenes");
        fs::create_dir_all(&scenes).unwrap();
        fs::write(scenes.join("menu.scene"), "").unwrap();
        fs::write(scenes.join("level1.scene"), "").unwrap();
        fs::write(scenes.join("notes.txt"), "scratch").unwrap();

        let files = glob_files(tmp.path(), &["scenes/*.scene".to_string()]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_glob_files_deduplicates_overlapping_patterns() {
        let tmp = TempDir::new().unwrap();
        let scenes = tmp.path().join("scenes");
        fs::create_dir_all(&scenes).unwrap();
        fs::write(scenes.join("menu.scene"), "").unwrap();

        let files = glob_files(
            tmp.path(),
            &["scenes/*.scene".to_string(), "scenes/menu.*".to_string()],
        )
        .unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_write_string_creates_parents() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("state.txt");

        write_string(&path, "android\n").unwrap();

        assert_eq!(read_to_string(&path).unwrap(), "android\n");
    }
}
