//! # Arbor Scan Command
//!
//! File: cli/src/commands/scan/mod.rs
//!
//! ## Overview
//!
//! `arbor scan DIR` captures an existing directory as structure text, the
//! reverse of `arbor create`. The directory itself becomes the single
//! top-level folder. The output can be saved and fed back to `arbor create`
//! or `arbor template add`:
//!
//! ```bash
//! arbor scan ./my-service --format json > service.json
//! arbor template add service service.json
//! ```
//!
//! JSON keeps every entry's kind. Indented and tree text cannot mark a file
//! without an extension (`Makefile`, `LICENSE`), which reads back as a folder;
//! such files are listed in a warning when a text format is printed.
//!
use crate::commands::output::{format_hierarchy, indent_style, OutputFormat};
use crate::common::fs::scan::scan_directory;
use crate::core::config;
use crate::core::error::Result;
use crate::core::render::untyped_files;
use anyhow::Context;
use clap::Parser;
use path_clean::PathClean;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Directory to capture.
    directory: PathBuf,

    /// Output format.
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Indent)]
    format: OutputFormat,

    /// Indent with tabs instead of four spaces.
    #[arg(long)]
    tabs: bool,

    /// Print only the directory's contents, without the directory itself.
    #[arg(long)]
    contents_only: bool,
}

pub async fn handle_scan(args: ScanArgs) -> Result<()> {
    info!("Handling scan command for {:?}", args.directory);
    let cfg = config::load_config().context("Failed to load Arbor configuration")?;

    let directory = if args.directory.is_absolute() {
        args.directory.clean()
    } else {
        env::current_dir()
            .context("Failed to get current directory")?
            .join(&args.directory)
            .clean()
    };
    let contents = scan_directory(&directory)?;

    let hierarchy = match directory.file_name() {
        Some(name) if !args.contents_only => contents.wrap(name.to_string_lossy()),
        _ => contents,
    };
    if args.format != OutputFormat::Json {
        let untyped = untyped_files(&hierarchy);
        if !untyped.is_empty() {
            warn!(
                "{} file(s) without an extension will read back as folders: {}. Use --format json to keep them as files.",
                untyped.len(),
                untyped.join(", ")
            );
        }
    }
    print!(
        "{}",
        format_hierarchy(&hierarchy, args.format, indent_style(&cfg, args.tabs))?
    );
    Ok(())
}
