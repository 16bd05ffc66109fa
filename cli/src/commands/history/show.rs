//! # `arbor history show N`
//!
//! File: cli/src/commands/history/show.rs
//!
use crate::commands::output::{format_hierarchy, OutputFormat};
use crate::common::storage::history::{HistoryStore, JsonHistoryFile};
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// History position, as shown by `arbor history list`.
    position: usize,

    /// Print the record as JSON instead of a tree.
    #[arg(long)]
    json: bool,
}

pub async fn handle_show(args: ShowArgs) -> Result<()> {
    info!("Handling history show command for entry {}", args.position);
    let cfg = config::load_config().context("Failed to load Arbor configuration")?;
    let record = JsonHistoryFile::new(cfg.history_path()).get(args.position)?;

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Tree
    };
    print!("{}", format_hierarchy(&record, format, cfg.render.indent)?);
    Ok(())
}
