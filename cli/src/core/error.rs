//! # Arbor Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout Arbor. Most functions
//! return `Result<T>` (an alias for `anyhow::Result<T>`) so that context can be
//! attached at every IO boundary, while `ArborError` names the failures callers
//! may want to match on.
//!
//! ## Architecture
//!
//! - `ArborError`: a `thiserror` enum covering configuration, filesystem,
//!   templating, history, hierarchy corruption and structure-editing failures.
//! - `Result<T>`: alias for `anyhow::Result<T>`.
//!
//! Per-step materialization problems (a folder that could not be created, a
//! file the user declined to overwrite) are **not** errors. They are reported
//! as log events by the materializer and the run continues. Only a corrupt
//! hierarchy aborts a run, surfacing as `ArborError::CorruptHierarchy`.
//!
//! ## Examples
//!
//! ```rust
//! if !path.exists() {
//!     return Err(ArborError::FileSystem(format!("Path not found: {}", path.display())))?;
//! }
//!
//! let text = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read structure file: {}", path.display()))?;
//! ```
//!
use crate::core::editor::EditError;
use thiserror::Error;

/// Custom error type for the Arbor application.
#[derive(Error, Debug)]
pub enum ArborError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Template '{name}' not found.")]
    TemplateNotFound { name: String },

    #[error("History error: {0}")]
    History(String),

    #[error("Corrupt structure node '{path}': {reason}")]
    CorruptHierarchy { path: String, reason: String },

    #[error("Structure edit rejected: {source}")]
    Edit {
        #[from]
        source: EditError,
    },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
