//! # Arbor Parse Command
//!
//! File: cli/src/commands/parse/mod.rs
//!
//! ## Overview
//!
//! `arbor parse [FILE|-]` reads structure text (or canonical JSON) and prints the canonical
//! hierarchy it describes, without touching the filesystem. It is the quickest
//! way to check how indentation and names will be interpreted before running
//! `arbor create`.
//!
//! ## Examples
//!
//! ```bash
//! arbor parse layout.txt
//! tree -F my-project | arbor parse --format indent
//! arbor parse layout.txt --format tree
//! ```
//!
use crate::commands::output::{format_hierarchy, indent_style, OutputFormat};
use crate::common::fs::io::read_structure_source;
use crate::core::config;
use crate::core::error::Result;
use crate::core::parser;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// Structure text file. Reads stdin when omitted or `-`.
    source: Option<PathBuf>,

    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Indent `--format indent` output with tabs instead of four spaces.
    #[arg(long)]
    tabs: bool,
}

pub async fn handle_parse(args: ParseArgs) -> Result<()> {
    info!("Handling parse command...");
    let cfg = config::load_config().context("Failed to load Arbor configuration")?;

    let text = read_structure_source(args.source.as_deref())?;
    let hierarchy = parser::parse_input(&text)?;
    if hierarchy.is_empty() {
        warn!("The structure text describes no entries.");
    }
    info!(
        "Parsed {} folder(s) and {} file(s)",
        hierarchy.folder_count(),
        hierarchy.file_count()
    );

    print!(
        "{}",
        format_hierarchy(&hierarchy, args.format, indent_style(&cfg, args.tabs))?
    );
    Ok(())
}
