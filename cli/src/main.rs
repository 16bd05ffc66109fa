//! # Arbor Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Arbor turns a plain-text outline of folders and files into a real project
//! skeleton on disk. This file:
//! - parses command-line arguments with Clap,
//! - sets up logging from the `-v` count (or `RUST_LOG`),
//! - routes to the command handlers and reports their errors.
//!
//! ## Examples
//!
//! ```bash
//! # Preview how an outline is understood
//! arbor parse layout.txt --format tree
//!
//! # Create it under ./my-app, logging every step
//! arbor -v create layout.txt --name my-app
//! ```
//!
//! Processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to the command handler
//! 4. Print any error and exit with status 1
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (parse, create, scan, history, template)
mod common; // Shared utilities (fs, storage, ui)
mod core; // Structure model, materializer, config, errors

#[derive(Parser, Debug)]
#[command(
    name = "arbor",
    about = "🌳 Arbor: create project folder structures from a text outline",
    long_about = "Describe a project's folders and files as an indented outline (or paste \
                  `tree` output) and Arbor creates them: folders plus empty files.\n\
                  Templates and a history of created structures make layouts reusable.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Show how structure text is interpreted.
    #[command(alias = "p")]
    Parse(commands::parse::ParseArgs),
    /// Create folders and empty files from a structure.
    #[command(alias = "c")]
    Create(commands::create::CreateArgs),
    /// Capture an existing directory as structure text.
    Scan(commands::scan::ScanArgs),
    /// List or show previously created structures.
    #[command(alias = "h")]
    History(commands::history::HistoryArgs),
    /// List, show or add structure templates.
    #[command(alias = "t")]
    Template(commands::template::TemplateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Parse(args) => commands::parse::handle_parse(args).await,
        Commands::Create(args) => commands::create::handle_create(args).await,
        Commands::Scan(args) => commands::scan::handle_scan(args).await,
        Commands::History(args) => commands::history::handle_history(args).await,
        Commands::Template(args) => commands::template::handle_template(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
