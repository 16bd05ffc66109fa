//! # Arbor Structure Materializer
//!
//! File: cli/src/core/materializer.rs
//!
//! ## Overview
//!
//! Walks a canonical [`Hierarchy`] and creates the folders and empty files it
//! describes below a base directory, emitting one timestamped [`LogEntry`] per
//! action.
//!
//! ## Behavior
//!
//! Children are processed in hierarchy order; a folder's whole subtree is
//! finished before its next sibling starts.
//!
//! - **Folders**: created with missing parents when absent (`Created folder`).
//!   An existing folder is reported (`Folder already exists`) and entered. If a
//!   folder cannot be created, or the path is taken by a non-folder, the
//!   failure is logged and that subtree is skipped; siblings continue.
//! - **Files**: created empty. When the path already exists (including when
//!   another process created it mid-run) the injected [`OverwriteDecider`] is
//!   asked. Declining logs a skip; accepting truncates the file to zero bytes.
//!   Permission errors and other OS errors are logged as distinct events.
//! - A final `completed` entry is written once the walk returns.
//!
//! Before anything touches the disk, every name is checked. An empty name, an
//! absolute name, or one that normalizes to the base directory or above it
//! marks the hierarchy as corrupt: the run is aborted and a single
//! `ArborError::CorruptHierarchy` is returned.
//!
//! Re-running over an existing structure while declining every overwrite
//! changes nothing on disk.
//!
//! ## Usage
//!
//! ```rust
//! let mut log: Vec<LogEntry> = Vec::new();
//! let mut never = |_: &Path| false;
//! let summary = materialize(&base, &hierarchy, &mut never, &mut log)?;
//! for entry in &log {
//!     println!("{}", entry);
//! }
//! ```
//!
use crate::core::error::{ArborError, Result};
use crate::core::hierarchy::{Hierarchy, Node};
use chrono::{DateTime, Local};
use path_clean::PathClean;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Decides whether an existing file may be replaced by an empty one.
pub trait OverwriteDecider {
    fn should_overwrite(&mut self, path: &Path) -> bool;
}

impl<F> OverwriteDecider for F
where
    F: FnMut(&Path) -> bool,
{
    fn should_overwrite(&mut self, path: &Path) -> bool {
        self(path)
    }
}

/// Append-only destination for materialization log records.
pub trait LogSink {
    fn record(&mut self, entry: LogEntry);
}

impl LogSink for Vec<LogEntry> {
    fn record(&mut self, entry: LogEntry) {
        self.push(entry);
    }
}

/// Something that happened during a materialization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializeEvent {
    FolderCreated { path: PathBuf },
    FolderExists { path: PathBuf },
    FolderFailed { path: PathBuf, reason: String },
    FileCreated { path: PathBuf },
    FileSkipped { path: PathBuf },
    FilePermissionDenied { path: PathBuf },
    FileFailed { path: PathBuf, reason: String },
    Completed,
}

impl MaterializeEvent {
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            MaterializeEvent::FolderFailed { .. }
                | MaterializeEvent::FilePermissionDenied { .. }
                | MaterializeEvent::FileFailed { .. }
        )
    }
}

impl fmt::Display for MaterializeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterializeEvent::FolderCreated { path } => {
                write!(f, "Created folder: {}", path.display())
            }
            MaterializeEvent::FolderExists { path } => {
                write!(f, "Folder already exists: {}", path.display())
            }
            MaterializeEvent::FolderFailed { path, reason } => {
                write!(f, "Error creating folder '{}': {}", path.display(), reason)
            }
            MaterializeEvent::FileCreated { path } => {
                write!(f, "Created file: {}", path.display())
            }
            MaterializeEvent::FileSkipped { path } => {
                write!(f, "Skipped existing file: {}", path.display())
            }
            MaterializeEvent::FilePermissionDenied { path } => {
                write!(f, "Permission denied while creating file: {}", path.display())
            }
            MaterializeEvent::FileFailed { path, reason } => {
                write!(f, "OS error while creating file '{}': {}", path.display(), reason)
            }
            MaterializeEvent::Completed => write!(f, "Project structure creation completed."),
        }
    }
}

/// A timestamped log record.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub event: MaterializeEvent,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.timestamp.format("%H:%M:%S"), self.event)
    }
}

/// Counts of what a run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeSummary {
    pub folders_created: usize,
    pub folders_existing: usize,
    pub files_created: usize,
    pub files_skipped: usize,
    pub failures: usize,
}

impl fmt::Display for MaterializeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} folder(s) created, {} already present, {} file(s) created, {} skipped, {} failure(s)",
            self.folders_created,
            self.folders_existing,
            self.files_created,
            self.files_skipped,
            self.failures
        )
    }
}

/// Creates `root` below `base_path`. See the module docs for the rules.
pub fn materialize(
    base_path: &Path,
    root: &Hierarchy,
    decider: &mut dyn OverwriteDecider,
    sink: &mut dyn LogSink,
) -> Result<MaterializeSummary> {
    check_names(root, Path::new(""))?;
    info!(
        "Materializing {} folder(s) and {} file(s) under '{}'",
        root.folder_count(),
        root.file_count(),
        base_path.display()
    );

    let mut run = Run {
        decider,
        sink,
        summary: MaterializeSummary::default(),
    };
    run.walk(base_path, root);
    run.emit(MaterializeEvent::Completed);
    Ok(run.summary)
}

/// Rejects names that cannot be placed inside their parent directory.
fn check_names(hierarchy: &Hierarchy, parent: &Path) -> Result<()> {
    for (name, node) in hierarchy.iter() {
        let relative = parent.join(name);
        let corrupt = |reason: &str| ArborError::CorruptHierarchy {
            path: relative.display().to_string(),
            reason: reason.to_string(),
        };
        if name.trim().is_empty() {
            return Err(corrupt("empty name").into());
        }
        if name.contains('\0') {
            return Err(corrupt("name contains a NUL byte").into());
        }
        let name_path = Path::new(name);
        if name_path.has_root() || name_path.is_absolute() {
            return Err(corrupt("absolute name").into());
        }
        let cleaned = name_path.clean();
        if cleaned == Path::new(".")
            || cleaned
                .components()
                .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(corrupt("name does not stay inside its parent folder").into());
        }
        if let Node::Folder(children) = node {
            check_names(children, &relative)?;
        }
    }
    Ok(())
}

struct Run<'a> {
    decider: &'a mut dyn OverwriteDecider,
    sink: &'a mut dyn LogSink,
    summary: MaterializeSummary,
}

impl Run<'_> {
    fn emit(&mut self, event: MaterializeEvent) {
        if event.is_failure() {
            warn!("{}", event);
        } else {
            debug!("{}", event);
        }
        match &event {
            MaterializeEvent::FolderCreated { .. } => self.summary.folders_created += 1,
            MaterializeEvent::FolderExists { .. } => self.summary.folders_existing += 1,
            MaterializeEvent::FileCreated { .. } => self.summary.files_created += 1,
            MaterializeEvent::FileSkipped { .. } => self.summary.files_skipped += 1,
            MaterializeEvent::Completed => {}
            _ => self.summary.failures += 1,
        }
        self.sink.record(LogEntry {
            timestamp: Local::now(),
            event,
        });
    }

    fn walk(&mut self, base_path: &Path, hierarchy: &Hierarchy) {
        for (name, node) in hierarchy.iter() {
            let current_path = base_path.join(name).clean();
            match node {
                Node::Folder(children) => {
                    if self.ensure_folder(&current_path) {
                        self.walk(&current_path, children);
                    }
                }
                Node::File => self.create_file(&current_path),
            }
        }
    }

    /// Returns whether the folder is usable for its children.
    fn ensure_folder(&mut self, path: &Path) -> bool {
        if path.is_dir() {
            self.emit(MaterializeEvent::FolderExists {
                path: path.to_path_buf(),
            });
            return true;
        }
        if path.exists() {
            self.emit(MaterializeEvent::FolderFailed {
                path: path.to_path_buf(),
                reason: "path exists and is not a folder".to_string(),
            });
            return false;
        }
        // create_dir_all also succeeds when the folder appeared in the meantime.
        match fs::create_dir_all(path) {
            Ok(()) => {
                self.emit(MaterializeEvent::FolderCreated {
                    path: path.to_path_buf(),
                });
                true
            }
            Err(e) => {
                self.emit(MaterializeEvent::FolderFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                false
            }
        }
    }

    fn create_file(&mut self, path: &Path) {
        let created = match OpenOptions::new().write(true).create_new(true).open(path) {
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                if !self.decider.should_overwrite(path) {
                    self.emit(MaterializeEvent::FileSkipped {
                        path: path.to_path_buf(),
                    });
                    return;
                }
                File::create(path).map(drop)
            }
            other => other.map(drop),
        };
        let event = match created {
            Ok(()) => MaterializeEvent::FileCreated {
                path: path.to_path_buf(),
            },
            Err(e) => file_error_event(path, &e),
        };
        self.emit(event);
    }
}

fn file_error_event(path: &Path, error: &io::Error) -> MaterializeEvent {
    match error.kind() {
        io::ErrorKind::PermissionDenied => MaterializeEvent::FilePermissionDenied {
            path: path.to_path_buf(),
        },
        _ => MaterializeEvent::FileFailed {
            path: path.to_path_buf(),
            reason: error.to_string(),
        },
    }
}
