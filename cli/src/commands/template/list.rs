//! # `arbor template list`
//!
//! File: cli/src/commands/template/list.rs
//!
use crate::common::storage::templates::TemplateLibrary;
use crate::core::config;
use crate::core::error::Result;
use crate::core::parser;
use anyhow::Context;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct ListArgs {}

pub async fn handle_list(_args: ListArgs) -> Result<()> {
    info!("Handling template list command...");
    let cfg = config::load_config().context("Failed to load Arbor configuration")?;
    let library = TemplateLibrary::load(&cfg.templates_path())?;
    let templates = library.list();

    println!("Available Templates:");
    let width = templates.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for template in &templates {
        // Counts come from the unrendered text; variables are plain names here.
        let hierarchy = parser::parse_input(&template.text)
            .unwrap_or_else(|_| parser::parse(&template.text));
        println!(
            "  {:<width$}  {:<8}  {} folder(s), {} file(s)",
            template.name,
            template.origin.to_string(),
            hierarchy.folder_count(),
            hierarchy.file_count(),
            width = width
        );
    }
    println!("\nUse `arbor create --template <NAME> --name <PROJECT>` to create one.");
    Ok(())
}
