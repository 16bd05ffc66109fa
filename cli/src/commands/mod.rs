//! # Arbor Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! One module per top-level command. Each defines a clap `*Args` struct and an
//! async `handle_*` function that `main.rs` dispatches to; command groups
//! (`history`, `template`) declare their subcommands in their own `mod.rs`.
//!
//! ## Commands
//!
//! - `parse`: structure text → canonical hierarchy (preview only)
//! - `create`: build a structure on disk
//! - `scan`: capture an existing directory as structure text
//! - `history`: list and show previously created structures
//! - `template`: list, show and add structure templates
//!

/// `arbor create`: builds folders and empty files from a structure.
pub mod create;
/// `arbor history`: recorded structures.
pub mod history;
/// Shared `--format` rendering.
pub mod output;
/// `arbor parse`: previews how structure text is interpreted.
pub mod parse;
/// `arbor scan`: captures an existing directory.
pub mod scan;
/// `arbor template`: structure templates.
pub mod template;
