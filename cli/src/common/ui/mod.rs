//! # Arbor Terminal UI (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! Terminal-facing adapters for the core's injected collaborators:
//!
//! - **`prompts`**: overwrite decisions, interactive (`dialoguer`) or fixed.
//! - **`log`**: prints materialization log records as they happen.
//!

/// Overwrite decision providers.
pub mod prompts;
/// Console log sink for materialization records.
pub mod log;
