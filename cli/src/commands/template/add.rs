//! # `arbor template add NAME FILE`
//!
//! File: cli/src/commands/template/add.rs
//!
//! Reads structure text or canonical JSON from `FILE` (or stdin with `-`) and
//! stores it as a user template. The text must describe at least one entry.
//!
use crate::common::fs::io::read_structure_source;
use crate::common::storage::templates::TemplateLibrary;
use crate::core::config;
use crate::core::error::{ArborError, Result};
use crate::core::parser;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Template name.
    name: String,
    /// Structure text file, or `-` for stdin.
    file: PathBuf,
}

pub async fn handle_add(args: AddArgs) -> Result<()> {
    info!("Handling template add command for '{}'", args.name);
    let cfg = config::load_config().context("Failed to load Arbor configuration")?;

    let text = read_structure_source(Some(&args.file))?;
    if parser::parse_input(&text)?.is_empty() {
        anyhow::bail!(ArborError::ArgumentParsing(format!(
            "{} describes no entries; nothing to save.",
            args.file.display()
        )));
    }

    let mut library = TemplateLibrary::load(&cfg.templates_path())?;
    let replaced = library.add(&args.name, text.trim_end())?;
    if replaced {
        println!("Template '{}' updated.", args.name.trim());
    } else {
        println!("Template '{}' added.", args.name.trim());
    }
    Ok(())
}
