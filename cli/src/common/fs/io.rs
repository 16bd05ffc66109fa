//! # Arbor Filesystem I/O
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` that add error context:
//!
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`read_file_to_string`**: reads a whole file.
//! - **`write_string_to_file`**: writes a file, creating its parent folders.
//! - **`read_structure_source`**: reads structure text from a file, or from
//!   stdin when the source is absent or `-`.
//!
use crate::core::error::{ArborError, Result};
use anyhow::Context;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use tracing::{debug, info};

/// Marker accepted in place of a file name to read standard input.
pub const STDIN_MARKER: &str = "-";

/// Ensures that a directory exists at `path`, creating missing parents.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating
/// it fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(ArborError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes `content` to `path`, replacing any existing file. The parent
/// directory is created first when needed.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Reads structure text from `source`, or from stdin when `source` is `None`
/// or `-`.
pub fn read_structure_source(source: Option<&Path>) -> Result<String> {
    match source {
        Some(path) if path != Path::new(STDIN_MARKER) => {
            debug!("Reading structure text from {:?}", path);
            read_file_to_string(path)
        }
        _ => {
            debug!("Reading structure text from stdin");
            if io::stdin().is_terminal() {
                eprintln!("Reading structure text from stdin (finish with Ctrl-D)...");
            }
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read structure text from stdin")?;
            Ok(buffer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_nested() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        // Second call is a no-op.
        ensure_dir_exists(&new_dir)?;
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_write_creates_parents_and_reads_back() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("state/history.json");
        write_string_to_file(&file_path, "[]")?;
        assert_eq!(read_file_to_string(&file_path)?, "[]");
        Ok(())
    }

    #[test]
    fn test_structure_source_from_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("layout.txt");
        fs::write(&file_path, "app\n    main.rs\n")?;
        assert_eq!(
            read_structure_source(Some(&file_path))?,
            "app\n    main.rs\n"
        );
        assert!(read_structure_source(Some(&base_dir.path().join("missing.txt"))).is_err());
        Ok(())
    }
}
