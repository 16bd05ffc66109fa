//! # Arbor Template Commands
//!
//! File: cli/src/commands/template/mod.rs
//!
//! ## Overview
//!
//! Manages named structure templates:
//!
//! - `arbor template list`: every template and where it comes from.
//! - `arbor template show NAME`: the raw template text.
//! - `arbor template add NAME FILE`: saves structure text as a user template.
//!
//! Templates describe a project's contents; `arbor create --template NAME
//! --name PROJECT` renders one inside a `PROJECT` folder.
//!
use crate::core::error::Result;
use clap::{Parser, Subcommand};

mod add;
mod list;
mod show;

#[derive(Parser, Debug)]
pub struct TemplateArgs {
    #[command(subcommand)]
    command: TemplateCommand,
}

#[derive(Subcommand, Debug)]
enum TemplateCommand {
    /// List built-in and user templates.
    List(list::ListArgs),
    /// Print a template's text.
    Show(show::ShowArgs),
    /// Save structure text as a user template.
    Add(add::AddArgs),
}

pub async fn handle_template(args: TemplateArgs) -> Result<()> {
    match args.command {
        TemplateCommand::List(args) => list::handle_list(args).await,
        TemplateCommand::Show(args) => show::handle_show(args).await,
        TemplateCommand::Add(args) => add::handle_add(args).await,
    }
}
