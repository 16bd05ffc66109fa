//! # `arbor history list`
//!
//! File: cli/src/commands/history/list.rs
//!
use crate::common::storage::history::{HistoryStore, JsonHistoryFile};
use crate::core::config;
use crate::core::error::Result;
use crate::core::hierarchy::Hierarchy;
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ListArgs {}

pub async fn handle_list(_args: ListArgs) -> Result<()> {
    info!("Handling history list command...");
    let cfg = config::load_config().context("Failed to load Arbor configuration")?;
    let store = JsonHistoryFile::new(cfg.history_path());
    let records = store.load_all();

    if records.is_empty() {
        println!("No history recorded yet ({}).", store.path().display());
        return Ok(());
    }
    for line in history_lines(&records) {
        println!("{}", line);
    }
    Ok(())
}

/// `History N: <label>` for each record, numbered from 1.
fn history_lines(records: &[Hierarchy]) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                "History {}: {}",
                index + 1,
                record.project_name().unwrap_or("(empty)")
            )
        })
        .collect()
}
