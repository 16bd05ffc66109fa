//! # Arbor History Commands
//!
//! File: cli/src/commands/history/mod.rs
//!
//! ## Overview
//!
//! Inspects the structures recorded by `arbor create`:
//!
//! - `arbor history list`: numbered project labels, oldest first.
//! - `arbor history show N`: one record as a tree, or as JSON with `--json`.
//!
//! Recreate an entry with `arbor create --from-history N`.
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod list;
mod show;

#[derive(Parser, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    command: HistoryCommand,
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// List recorded structures.
    List(list::ListArgs),
    /// Print one recorded structure.
    Show(show::ShowArgs),
}

pub async fn handle_history(args: HistoryArgs) -> Result<()> {
    match args.command {
        HistoryCommand::List(args) => list::handle_list(args).await,
        HistoryCommand::Show(args) => show::handle_show(args).await,
    }
}
