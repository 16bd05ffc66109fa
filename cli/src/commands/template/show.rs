//! # `arbor template show NAME`
//!
//! File: cli/src/commands/template/show.rs
//!
use crate::common::storage::templates::TemplateLibrary;
use crate::core::config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Template name.
    name: String,
}

pub async fn handle_show(args: ShowArgs) -> Result<()> {
    info!("Handling template show command for '{}'", args.name);
    let cfg = config::load_config().context("Failed to load Arbor configuration")?;
    let template = TemplateLibrary::load(&cfg.templates_path())?.get(&args.name)?;
    println!("{}", template.text.trim_end());
    Ok(())
}
