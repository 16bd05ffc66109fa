//! # Arbor Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the commands:
//!
//! - **`io`**: directory creation, whole-file reads and writes, and reading
//!   structure text from a file or stdin.
//! - **`scan`**: turning an existing directory into a `Hierarchy`.
//!
//! Creating a structure on disk is not here; that is
//! `core::materializer`.
//!

/// Basic file I/O (`ensure_dir_exists`, `read_file_to_string`, `write_string_to_file`).
pub mod io;
/// Captures an existing directory as a `Hierarchy`.
pub mod scan;
