//! # Arbor Persistent Storage (`common::storage`)
//!
//! File: cli/src/common/storage/mod.rs
//!
//! ## Overview
//!
//! JSON-backed stores kept between runs:
//!
//! - **`history`**: every structure created, in creation order.
//! - **`templates`**: named structure templates, built-in and user-defined.
//!
//! Both files live at the paths configured under `[storage]`.
//!

/// Append-only history of created structures.
pub mod history;
/// Built-in and user structure templates.
pub mod templates;
