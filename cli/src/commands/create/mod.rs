//! # Arbor Create Command
//!
//! File: cli/src/commands/create/mod.rs
//!
//! ## Overview
//!
//! `arbor create` builds a project skeleton (folders and empty files) on disk.
//!
//! ## Architecture
//!
//! 1. **Load** the structure from a text file or stdin, a template, or a
//!    history entry (see [`source`]).
//! 2. **Edit** it with `--remove`, `--folder` and `--file`, applied in that
//!    order through `StructureTree` so the usual naming rules hold.
//! 3. **Name** it: with a project name (`--name`, or the template/history
//!    default) the structure is placed inside a folder of that name.
//! 4. **Preview** with `--dry-run`, or **materialize** it under `--output`
//!    (default: the current directory), printing one log line per action.
//! 5. **Record** the created structure in the history file unless disabled.
//!
//! Per-entry failures (a permission error on one file, say) are logged and do
//! not stop the run. A structure that names a path outside the output
//! directory is rejected before anything is created.
//!
//! ## Examples
//!
//! ```bash
//! arbor create layout.txt --name my-app --output ~/code
//! arbor create --template python-package --name data-tool
//! arbor create --from-history 3 --remove docs --file src/cli.py
//! tree -F --noreport old-project | arbor create --dry-run
//! ```
//!
mod source;

use crate::commands::output::{format_hierarchy, OutputFormat};
use crate::common::fs::io::ensure_dir_exists;
use crate::common::storage::history::{HistoryStore, JsonHistoryFile};
use crate::common::ui::{log::ConsoleSink, prompts};
use crate::core::config::{self, OverwritePolicy};
use crate::core::editor::StructureTree;
use crate::core::error::{ArborError, Result};
use crate::core::hierarchy::{EntryKind, Hierarchy};
use crate::core::materializer::{materialize, LogEntry, MaterializeSummary};
use anyhow::{anyhow, Context};
use clap::Parser;
use path_clean::PathClean;
use source::{load_structure, StructureSource};
use std::{
    env,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Structure text file. Reads stdin when omitted or `-` and no template or
    /// history entry is given.
    #[arg(conflicts_with_all = ["template", "from_history"])]
    source: Option<PathBuf>,

    /// Start from a named template (see `arbor template list`).
    #[arg(long, short = 't', conflicts_with = "from_history")]
    template: Option<String>,

    /// Start from a history entry (see `arbor history list`).
    #[arg(long, value_name = "N")]
    from_history: Option<usize>,

    /// Project folder to create the structure in.
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Directory to create the project in. Defaults to the current directory.
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,

    /// Add a folder, e.g. `src/utils`. Missing parent folders are added too.
    #[arg(long = "folder", value_name = "PATH", action = clap::ArgAction::Append)]
    folders: Vec<String>,

    /// Add an empty file, e.g. `src/utils/helpers.py`.
    #[arg(long = "file", value_name = "PATH", action = clap::ArgAction::Append)]
    files: Vec<String>,

    /// Remove an entry and everything below it.
    #[arg(long = "remove", value_name = "PATH", action = clap::ArgAction::Append)]
    removals: Vec<String>,

    /// What to do with files that already exist. Defaults to `[create] overwrite`.
    #[arg(long, value_enum)]
    overwrite: Option<OverwritePolicy>,

    /// Print the structure instead of creating it.
    #[arg(long)]
    dry_run: bool,

    /// Do not add the created structure to the history file.
    #[arg(long)]
    no_history: bool,

    /// Extra template variable (KEY=VALUE). Can be repeated.
    #[arg(long = "var", value_parser = parse_key_val, action = clap::ArgAction::Append)]
    vars: Vec<(String, String)>,
}

fn parse_key_val(s: &str) -> Result<(String, String)> {
    let (key, value) = s
        .split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| {
            anyhow!(
                "Invalid variable format: '{}'. Expected format: KEY=VALUE",
                s
            )
        })?;
    if key.is_empty() {
        anyhow::bail!("Invalid variable '{}': the key is empty", s);
    }
    Ok((key, value))
}

impl CreateArgs {
    fn structure_source(&self) -> StructureSource {
        match (&self.template, self.from_history) {
            (Some(name), _) => StructureSource::Template(name.clone()),
            (None, Some(position)) => StructureSource::History(position),
            (None, None) => StructureSource::Text(self.source.clone()),
        }
    }
}

pub async fn handle_create(args: CreateArgs) -> Result<()> {
    info!("Handling create command...");
    let cfg = config::load_config().context("Failed to load Arbor configuration")?;

    let structure_source = args.structure_source();
    if !args.vars.is_empty() && !matches!(structure_source, StructureSource::Template(_)) {
        warn!("--var only applies to templates; ignoring {} variable(s)", args.vars.len());
    }
    let loaded = load_structure(&structure_source, &cfg, args.name.as_deref(), &args.vars)?;

    let contents = apply_edits(loaded.contents, &args.removals, &args.folders, &args.files)?;
    let project_name = args.name.clone().or(loaded.project_name);
    let structure = match project_name {
        Some(name) => {
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!(ArborError::ArgumentParsing(
                    "Project name cannot be empty.".to_string()
                ));
            }
            contents.wrap(name)
        }
        None => contents,
    };
    if structure.is_empty() {
        anyhow::bail!(ArborError::ArgumentParsing(
            "Nothing to create: the structure has no entries.".to_string()
        ));
    }

    let output_dir = resolve_output_dir(args.output.as_deref())?;
    debug!("Resolved output directory: {}", output_dir.display());

    if args.dry_run {
        print!(
            "{}",
            format_hierarchy(&structure, OutputFormat::Tree, cfg.render.indent)?
        );
        println!(
            "\nDry run: {} folder(s) and {} file(s) would be created in {}",
            structure.folder_count(),
            structure.file_count(),
            output_dir.display()
        );
        return Ok(());
    }

    ensure_dir_exists(&output_dir)?;
    let policy = args.overwrite.unwrap_or(cfg.create.overwrite);
    debug!("Overwrite policy: {:?}", policy);
    let mut decider = prompts::decider_for(policy);
    let mut sink = ConsoleSink::new();
    let summary = materialize(&output_dir, &structure, decider.as_mut(), &mut sink)?;

    if cfg.create.record_history && !args.no_history {
        let mut history = JsonHistoryFile::new(cfg.history_path());
        match history.append(&structure) {
            Ok(()) => debug!("Recorded structure in {:?}", history.path()),
            Err(e) => warn!("Failed to save history: {:#}", e),
        }
    }

    print_completion_message(&output_dir, &structure, &summary, sink.failures());
    Ok(())
}

/// Applies removals, then folder additions, then file additions.
fn apply_edits(
    contents: Hierarchy,
    removals: &[String],
    folders: &[String],
    files: &[String],
) -> Result<Hierarchy> {
    if removals.is_empty() && folders.is_empty() && files.is_empty() {
        return Ok(contents);
    }
    let mut tree = StructureTree::from_hierarchy(&contents);
    for path in removals {
        tree.delete_path(path)
            .map_err(ArborError::from)
            .with_context(|| format!("Cannot remove '{}'", path))?;
    }
    for (paths, kind) in [(folders, EntryKind::Folder), (files, EntryKind::File)] {
        for path in paths {
            tree.insert_path(path, kind)
                .map_err(ArborError::from)
                .with_context(|| format!("Cannot add {} '{}'", kind, path))?;
        }
    }
    Ok(tree.to_hierarchy())
}

fn resolve_output_dir(output: Option<&Path>) -> Result<PathBuf> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    Ok(match output {
        Some(dir) => {
            let expanded = PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).into_owned());
            if expanded.is_absolute() {
                expanded.clean()
            } else {
                current_dir.join(expanded).clean()
            }
        }
        None => current_dir,
    })
}

fn print_completion_message(
    output_dir: &Path,
    structure: &Hierarchy,
    summary: &MaterializeSummary,
    failures: &[LogEntry],
) {
    let display_path = match env::current_dir() {
        Ok(cwd) => match pathdiff::diff_paths(output_dir, &cwd) {
            Some(relative) if relative.as_os_str().is_empty() => ".".to_string(),
            Some(relative) => relative.display().to_string(),
            None => output_dir.display().to_string(),
        },
        Err(_) => output_dir.display().to_string(),
    };
    let label = structure.project_name().unwrap_or("structure");

    if summary.failures > 0 {
        println!(
            "\n⚠️  '{}' created in {} with {} failure(s):",
            label, display_path, summary.failures
        );
        for entry in failures {
            println!("   - {}", entry.event);
        }
    } else {
        println!("\n✅ '{}' created in {}", label, display_path);
    }
    println!("   {}", summary);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CreateArgs {
        CreateArgs::try_parse_from(std::iter::once("create").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_source_selection() {
        assert_eq!(parse(&[]).structure_source(), StructureSource::Text(None));
        assert_eq!(
            parse(&["layout.txt"]).structure_source(),
            StructureSource::Text(Some(PathBuf::from("layout.txt")))
        );
        assert_eq!(
            parse(&["--template", "web-app"]).structure_source(),
            StructureSource::Template("web-app".into())
        );
        assert_eq!(
            parse(&["--from-history", "2"]).structure_source(),
            StructureSource::History(2)
        );
    }

    #[test]
    fn test_sources_conflict() {
        assert!(CreateArgs::try_parse_from(["create", "a.txt", "--template", "x"]).is_err());
        assert!(
            CreateArgs::try_parse_from(["create", "--template", "x", "--from-history", "1"])
                .is_err()
        );
    }

    #[test]
    fn test_repeated_edit_flags_and_vars() {
        let args = parse(&[
            "--folder", "src", "--folder", "docs", "--file", "a.md", "--remove", "old",
            "--var", "owner = me", "--overwrite", "never",
        ]);
        assert_eq!(args.folders, ["src", "docs"]);
        assert_eq!(args.files, ["a.md"]);
        assert_eq!(args.removals, ["old"]);
        assert_eq!(args.vars, [("owner".to_string(), "me".to_string())]);
        assert_eq!(args.overwrite, Some(OverwritePolicy::Never));
    }

    #[test]
    fn test_parse_key_val() {
        assert!(parse_key_val("novalue").is_err());
        assert!(parse_key_val("=x").is_err());
        assert_eq!(
            parse_key_val("a=b=c").unwrap(),
            ("a".to_string(), "b=c".to_string())
        );
    }

    #[test]
    fn test_edits_apply_removals_first() -> Result<()> {
        let contents = Hierarchy::from_json(r#"{"docs": {"old.md": null}, "src": {}}"#)?;
        let edited = apply_edits(
            contents,
            &["docs".into()],
            &["docs".into(), "src/utils".into()],
            &["src/utils/helpers.py".into(), ".env".into()],
        )?;
        assert_eq!(
            serde_json::to_string(&edited)?,
            r#"{"src":{"utils":{"helpers.py":null}},"docs":{},".env":null}"#
        );
        Ok(())
    }

    #[test]
    fn test_edit_errors_are_reported() -> Result<()> {
        let contents = Hierarchy::from_json(r#"{"README.md": null}"#)?;
        let err = apply_edits(contents.clone(), &["missing".into()], &[], &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("No entry at 'missing'"));

        let err = apply_edits(contents.clone(), &[], &["v1.0".into()], &[]).unwrap_err();
        assert!(format!("{:#}", err).contains("cannot contain an extension"));

        let err = apply_edits(contents, &[], &[], &["README.md/x.txt".into()]).unwrap_err();
        assert!(format!("{:#}", err).contains("it is a file"));
        Ok(())
    }

    #[test]
    fn test_no_edits_keeps_contents() -> Result<()> {
        // Loaded structures are not re-validated: dotted folders survive.
        let contents = Hierarchy::from_json(r#"{"v1.0": {"Makefile": null}}"#)?;
        assert_eq!(apply_edits(contents.clone(), &[], &[], &[])?, contents);
        Ok(())
    }

    #[test]
    fn test_resolve_output_dir() -> Result<()> {
        let cwd = env::current_dir()?;
        assert_eq!(resolve_output_dir(None)?, cwd);
        assert_eq!(resolve_output_dir(Some(Path::new("out/../gen")))?, cwd.join("gen"));
        Ok(())
    }
}
