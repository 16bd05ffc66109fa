//! # Structure Output Formats
//!
//! File: cli/src/commands/output.rs
//!
//! Shared `--format` handling for commands that print a hierarchy.
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::hierarchy::{to_pretty_json, Hierarchy};
use crate::core::render::{self, IndentStyle};
use std::io::IsTerminal;

/// How a hierarchy is printed.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Canonical JSON: folders are objects, files are null.
    Json,
    /// `tree`-style drawing with box connectors.
    Tree,
    /// One entry per line, indented; accepted back as input.
    Indent,
}

/// `--tabs` wins over the configured `[render] indent`.
pub fn indent_style(config: &Config, tabs: bool) -> IndentStyle {
    if tabs {
        IndentStyle::Tabs
    } else {
        config.render.indent
    }
}

/// Renders `hierarchy` as `format`. Tree output is bolded only on a terminal.
pub fn format_hierarchy(
    hierarchy: &Hierarchy,
    format: OutputFormat,
    style: IndentStyle,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", to_pretty_json(hierarchy)?),
        OutputFormat::Tree => render::tree(hierarchy, std::io::stdout().is_terminal()),
        OutputFormat::Indent => render::indented(hierarchy, style),
    })
}
