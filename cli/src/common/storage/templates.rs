//! # Structure Template Library
//!
//! File: cli/src/common/storage/templates.rs
//!
//! ## Overview
//!
//! Named structure templates. Each template is the structure text of a
//! project's contents, without the project folder itself, optionally using
//! tera variables such as `{{ project_name_snake }}` (see
//! `core::templating`).
//!
//! Two sources are merged:
//!
//! 1. **Built-in** templates compiled into the binary from
//!    `cli/templates/builtin.json`.
//! 2. **User** templates in the configured `templates_file`, a JSON object of
//!    `name -> text`. A user template replaces a built-in one of the same name.
//!
//! `arbor template add` writes to the user file only.
//!
use crate::common::fs::io::{read_file_to_string, write_string_to_file};
use crate::core::error::{ArborError, Result};
use crate::core::hierarchy::to_pretty_json;
use anyhow::{anyhow, Context};
use indexmap::IndexMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const BUILTIN_TEMPLATES: &str = include_str!("../../../templates/builtin.json");

/// Where a template comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    User,
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateOrigin::Builtin => write!(f, "built-in"),
            TemplateOrigin::User => write!(f, "user"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub text: String,
    pub origin: TemplateOrigin,
}

/// The merged view of built-in and user templates.
#[derive(Debug)]
pub struct TemplateLibrary {
    builtin: IndexMap<String, String>,
    user: IndexMap<String, String>,
    user_path: PathBuf,
}

impl TemplateLibrary {
    /// Loads the built-in set and the user file at `user_path`.
    ///
    /// A missing user file is an empty set. A user file that is not a JSON
    /// object of strings is an error, so that `add` never overwrites it.
    pub fn load(user_path: &Path) -> Result<Self> {
        let builtin: IndexMap<String, String> = serde_json::from_str(BUILTIN_TEMPLATES)
            .context("Built-in template set is not valid JSON")?;

        let user = if user_path.is_file() {
            let content = read_file_to_string(user_path)?;
            if content.trim().is_empty() {
                IndexMap::new()
            } else {
                serde_json::from_str(&content).with_context(|| {
                    format!(
                        "Templates file {:?} must be a JSON object of name -> structure text",
                        user_path
                    )
                })?
            }
        } else {
            debug!("No user templates file at {:?}", user_path);
            IndexMap::new()
        };
        debug!(
            "Loaded {} built-in and {} user template(s)",
            builtin.len(),
            user.len()
        );

        Ok(Self {
            builtin,
            user,
            user_path: user_path.to_path_buf(),
        })
    }

    /// Every template, built-ins first in their shipped order, then
    /// user-only templates in file order.
    pub fn list(&self) -> Vec<Template> {
        let mut merged: IndexMap<&str, Template> = IndexMap::new();
        for (name, text, origin) in self
            .builtin
            .iter()
            .map(|(n, t)| (n, t, TemplateOrigin::Builtin))
            .chain(self.user.iter().map(|(n, t)| (n, t, TemplateOrigin::User)))
        {
            merged.insert(
                name.as_str(),
                Template {
                    name: name.clone(),
                    text: text.clone(),
                    origin,
                },
            );
        }
        merged.into_values().collect()
    }

    pub fn get(&self, name: &str) -> Result<Template> {
        let (text, origin) = match (self.user.get(name), self.builtin.get(name)) {
            (Some(text), _) => (text, TemplateOrigin::User),
            (None, Some(text)) => (text, TemplateOrigin::Builtin),
            (None, None) => {
                return Err(anyhow!(ArborError::TemplateNotFound {
                    name: name.to_string()
                }))
            }
        };
        Ok(Template {
            name: name.to_string(),
            text: text.clone(),
            origin,
        })
    }

    /// Saves `text` as the user template `name`, replacing any previous user
    /// template of that name. Returns `true` when a template was replaced
    /// or shadowed.
    pub fn add(&mut self, name: &str, text: &str) -> Result<bool> {
        let name = name.trim();
        if name.is_empty() {
            anyhow::bail!(ArborError::ArgumentParsing(
                "Template name cannot be empty".to_string()
            ));
        }
        let replaced = self.user.contains_key(name) || self.builtin.contains_key(name);
        self.user.insert(name.to_string(), text.to_string());

        let json = to_pretty_json(&self.user)?;
        write_string_to_file(&self.user_path, &json)
            .with_context(|| format!("Failed to save templates to {:?}", self.user_path))?;
        info!("Saved template '{}' to {:?}", name, self.user_path);
        Ok(replaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hierarchy::Node;
    use crate::core::parser::parse;
    use crate::core::templating::{build_template_context, render_structure_template};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_templates_render_and_parse() -> Result<()> {
        let dir = tempdir()?;
        let library = TemplateLibrary::load(&dir.path().join("templates.json"))?;
        let templates = library.list();
        assert!(!templates.is_empty());

        let context = build_template_context("demo-app", &[]);
        for template in templates {
            assert_eq!(template.origin, TemplateOrigin::Builtin);
            let text = render_structure_template(&template.text, &context)?;
            assert!(!text.contains("{{"), "template '{}' left a variable", template.name);
            let hierarchy = parse(&text);
            assert!(
                hierarchy.file_count() > 0,
                "template '{}' should describe at least one file",
                template.name
            );
        }

        let python = render_structure_template(&library.get("python-package")?.text, &context)?;
        let hierarchy = parse(&python);
        assert!(matches!(
            hierarchy.get("src"),
            Some(Node::Folder(src)) if src.contains("demo_app")
        ));
        Ok(())
    }

    #[test]
    fn test_user_templates_override_and_append() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("templates.json");
        fs::write(
            &path,
            r#"{"python-package": "mine\n    a.py", "notes": "notes\n    todo.md"}"#,
        )?;
        let library = TemplateLibrary::load(&path)?;

        let overridden = library.get("python-package")?;
        assert_eq!(overridden.origin, TemplateOrigin::User);
        assert_eq!(overridden.text, "mine\n    a.py");

        let names: Vec<String> = library.list().into_iter().map(|t| t.name).collect();
        assert_eq!(names.last().map(String::as_str), Some("notes"));
        assert_eq!(
            names.iter().filter(|n| n.as_str() == "python-package").count(),
            1
        );
        Ok(())
    }

    #[test]
    fn test_unknown_template() -> Result<()> {
        let dir = tempdir()?;
        let library = TemplateLibrary::load(&dir.path().join("none.json"))?;
        let err = library.get("nope").unwrap_err();
        assert_eq!(err.to_string(), "Template 'nope' not found.");
        Ok(())
    }

    #[test]
    fn test_add_persists_user_templates_only() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config/templates.json");
        let mut library = TemplateLibrary::load(&path)?;
        assert!(!library.add("lib", "lib\n    src\n        lib.rs")?);
        assert!(library.add("lib", "lib\n    lib.rs")?);

        let reloaded = TemplateLibrary::load(&path)?;
        assert_eq!(reloaded.get("lib")?.text, "lib\n    lib.rs");
        let on_disk: IndexMap<String, String> = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(on_disk.len(), 1);
        assert!(library.add("  ", "x").is_err());
        Ok(())
    }

    #[test]
    fn test_malformed_user_file_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("templates.json");
        fs::write(&path, "[1, 2]")?;
        assert!(TemplateLibrary::load(&path).is_err());
        Ok(())
    }
}
