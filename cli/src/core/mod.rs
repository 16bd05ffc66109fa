//! # Arbor Core
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! The structure model and the operations on it, plus the infrastructure the
//! commands share.
//!
//! ## Architecture
//!
//! - `hierarchy`: the canonical nested name → folder/file mapping
//! - `parser`: indented or tree-drawn text → `Hierarchy`
//! - `render`: `Hierarchy` → indented or tree-drawn text
//! - `editor`: an editable node tree with naming rules
//! - `materializer`: creates a `Hierarchy` on disk and logs every action
//! - `templating`: tera rendering of structure templates
//! - `config`: layered TOML configuration
//! - `error`: error types and the crate `Result`
//!
//! Nothing here prints to the terminal; user-facing output lives in
//! `commands` and `common::ui`.
//!
pub mod config;
pub mod editor;
pub mod error;
pub mod hierarchy;
pub mod materializer;
pub mod parser;
pub mod render;
pub mod templating;
