//! # Structure Sources for `arbor create`
//!
//! File: cli/src/commands/create/source.rs
//!
//! Resolves where the structure to create comes from and what the project is
//! called by default:
//!
//! | Source             | Contents                          | Default project name |
//! |--------------------|-----------------------------------|----------------------|
//! | `FILE` / stdin     | the parsed text or JSON, as-is    | none                 |
//! | `--template NAME`  | the rendered template             | the template name    |
//! | `--from-history N` | the folder inside record `N`      | the record's label   |
//!
use crate::common::fs::io::read_structure_source;
use crate::common::storage::history::{HistoryStore, JsonHistoryFile};
use crate::common::storage::templates::TemplateLibrary;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::hierarchy::{Hierarchy, Node};
use crate::core::parser;
use crate::core::templating::{build_template_context, render_structure_template};
use anyhow::Context;
use std::path::PathBuf;
use tracing::{debug, info};

/// Where `arbor create` reads its structure from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureSource {
    /// Structure text in a file, or on stdin for `None` / `-`.
    Text(Option<PathBuf>),
    /// A named template.
    Template(String),
    /// A 1-based history position.
    History(usize),
}

/// A structure ready for editing.
#[derive(Debug)]
pub struct LoadedStructure {
    pub contents: Hierarchy,
    pub project_name: Option<String>,
}

/// Loads the structure from `source`. `project_name` (from `--name`) and
/// `vars` are only used to render templates.
pub fn load_structure(
    source: &StructureSource,
    config: &Config,
    project_name: Option<&str>,
    vars: &[(String, String)],
) -> Result<LoadedStructure> {
    match source {
        StructureSource::Text(path) => {
            let text = read_structure_source(path.as_deref())?;
            Ok(LoadedStructure {
                contents: parser::parse_input(&text)?,
                project_name: None,
            })
        }
        StructureSource::Template(name) => {
            let library = TemplateLibrary::load(&config.templates_path())?;
            let template = library.get(name)?;
            let project = project_name.unwrap_or(name.as_str());
            info!(
                "Rendering {} template '{}' for project '{}'",
                template.origin, template.name, project
            );
            let context = build_template_context(project, vars);
            let text = render_structure_template(&template.text, &context)
                .with_context(|| format!("Failed to render template '{}'", name))?;
            Ok(LoadedStructure {
                contents: parser::parse_input(&text)
                    .with_context(|| format!("Template '{}' is not a valid structure", name))?,
                project_name: Some(project.to_string()),
            })
        }
        StructureSource::History(position) => {
            let store = JsonHistoryFile::new(config.history_path());
            let record = store.get(*position)?;
            debug!("Loaded history entry {}: {:?}", position, record.project_name());
            Ok(split_record(record))
        }
    }
}

/// A record with a single top-level folder is that folder's contents under
/// its name. Anything else is used whole, without a name.
fn split_record(record: Hierarchy) -> LoadedStructure {
    let single_folder = match record.iter().next() {
        Some((label, Node::Folder(inner))) if record.len() == 1 => {
            Some((label.clone(), inner.clone()))
        }
        _ => None,
    };
    match single_folder {
        Some((label, contents)) => LoadedStructure {
            contents,
            project_name: Some(label),
        },
        None => LoadedStructure {
            contents: record,
            project_name: None,
        },
    }
}
