//! # Arbor Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the command handlers, kept apart from the
//! structure model in `core`:
//!
//! - **`fs`**: file I/O helpers and directory scanning.
//! - **`storage`**: the history file and the template library.
//! - **`ui`**: the overwrite prompt and the console log sink.
//!
//! ```rust
//! use crate::common::{fs, storage, ui};
//!
//! let text = fs::io::read_structure_source(Some(path))?;
//! let library = storage::templates::TemplateLibrary::load(&config.templates_path())?;
//! let mut sink = ui::log::ConsoleSink::new();
//! ```
//!

/// Filesystem helpers (`io`, `scan`).
pub mod fs;
/// JSON-backed history and template stores.
pub mod storage;
/// Terminal prompts and output sinks.
pub mod ui;
