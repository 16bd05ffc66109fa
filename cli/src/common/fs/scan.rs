//! # Directory Scanner
//!
//! File: cli/src/common/fs/scan.rs
//!
//! Builds a [`Hierarchy`] from a folder that already exists on disk, so an
//! existing project can be captured, saved as a template, or recreated
//! elsewhere. Entries are sorted by name, hidden entries included. Symbolic
//! links are recorded as files and never followed.
//!
use crate::core::error::{ArborError, Result};
use crate::core::hierarchy::Hierarchy;
use anyhow::Context;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Scans `root` and returns its contents. The root folder itself is not part
/// of the result; wrap it with [`Hierarchy::wrap`] when needed.
pub fn scan_directory(root: &Path) -> Result<Hierarchy> {
    if !root.is_dir() {
        anyhow::bail!(ArborError::FileSystem(format!(
            "Cannot scan {:?}: not a directory",
            root
        )));
    }

    let mut hierarchy = Hierarchy::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    'entries: for entry in walker {
        let entry = entry.with_context(|| format!("Failed to scan directory {:?}", root))?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("Scanned path {:?} escaped {:?}", entry.path(), root))?;
        let names: Vec<String> = relative
            .iter()
            .map(|part| part.to_string_lossy().into_owned())
            .collect();
        let Some((leaf, parents)) = names.split_last() else {
            continue;
        };

        // Walkdir yields parents before children, so every parent folder is
        // already present.
        let mut folder = &mut hierarchy;
        for parent in parents {
            match folder.folder_entry(parent.as_str()) {
                Some(next) => folder = next,
                None => {
                    warn!("Skipping {:?}: parent is not a folder", entry.path());
                    continue 'entries;
                }
            }
        }

        if entry.file_type().is_dir() {
            folder.folder_entry(leaf.as_str());
        } else {
            folder.insert_file(leaf.as_str());
        }
    }
    debug!(
        "Scanned {:?}: {} folder(s), {} file(s)",
        root,
        hierarchy.folder_count(),
        hierarchy.file_count()
    );
    Ok(hierarchy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hierarchy::to_pretty_json;
    use crate::core::parser::parse_input;
    use crate::core::render::untyped_files;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_sorted_with_hidden_entries() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("src/bin"))?;
        fs::create_dir(dir.path().join("docs"))?;
        fs::write(dir.path().join("src/main.rs"), "")?;
        fs::write(dir.path().join(".gitignore"), "")?;
        fs::write(dir.path().join("Cargo.toml"), "")?;

        let hierarchy = scan_directory(dir.path())?;
        assert_eq!(
            serde_json::to_string(&hierarchy)?,
            r#"{".gitignore":null,"Cargo.toml":null,"docs":{},"src":{"bin":{},"main.rs":null}}"#
        );
        Ok(())
    }

    #[test]
    fn test_scanned_json_reads_back_with_extensionless_files() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("src"))?;
        fs::write(dir.path().join("Makefile"), "all:")?;
        fs::write(dir.path().join("LICENSE"), "MIT")?;
        fs::write(dir.path().join("src/lib.rs"), "")?;

        let scanned = scan_directory(dir.path())?.wrap("proj");
        let reread = parse_input(&to_pretty_json(&scanned)?)?;
        assert_eq!(reread, scanned);
        assert_eq!(untyped_files(&scanned), ["proj/LICENSE", "proj/Makefile"]);
        Ok(())
    }

    #[test]
    fn test_scan_rejects_files() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("notes.txt");
        fs::write(&file, "")?;
        assert!(scan_directory(&file).is_err());
        assert!(scan_directory(&dir.path().join("missing")).is_err());
        Ok(())
    }
}
