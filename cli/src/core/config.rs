//! # Arbor Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads, merges, expands and validates Arbor's configuration.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Environment overrides: `ARBOR_HISTORY_FILE`, `ARBOR_TEMPLATES_FILE`
//! 2. Project-specific `.arbor.toml` in the current directory or an ancestor
//!    (the search stops at a directory containing `.git`)
//! 3. User-specific `config.toml` in the platform config directory, or the
//!    file named by `ARBOR_CONFIG`
//! 4. Default values defined in the code
//!
//! Paths may use `~`, which is expanded after merging.
//!
//! ## Example
//!
//! ```toml
//! [storage]
//! history_file = "~/.local/share/arbor/history.json"
//! templates_file = "~/.config/arbor/templates.json"
//!
//! [create]
//! overwrite = "never"      # ask | always | never
//! record_history = true
//!
//! [render]
//! indent = "tabs"          # spaces | tabs
//! ```
//!
use crate::core::error::{ArborError, Result};
use crate::core::render::IndentStyle;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub create: CreateConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

/// Where history and user templates are kept.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// JSON array of every structure created so far.
    #[serde(default = "default_history_file")]
    pub history_file: String,
    /// JSON object of user structure templates (name -> structure text).
    #[serde(default = "default_templates_file")]
    pub templates_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            history_file: default_history_file(),
            templates_file: default_templates_file(),
        }
    }
}

/// Defaults for `arbor create`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CreateConfig {
    /// What to do when a file to create already exists.
    #[serde(default)]
    pub overwrite: OverwritePolicy,
    /// Append every created structure to the history file.
    #[serde(default = "default_record_history")]
    pub record_history: bool,
}

impl Default for CreateConfig {
    fn default() -> Self {
        Self {
            overwrite: OverwritePolicy::default(),
            record_history: default_record_history(),
        }
    }
}

/// Text output settings.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(default)]
    pub indent: IndentStyle,
}

/// How existing files are treated during materialization.
#[derive(Deserialize, clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Ask interactively for each existing file.
    #[default]
    Ask,
    /// Replace existing files with empty ones.
    Always,
    /// Keep existing files untouched.
    Never,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "Arbor", "arbor")
}

/// Fallback storage root when no platform directories are available.
fn fallback_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".arbor"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_history_file() -> String {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("history.json"))
        .unwrap_or_else(|| fallback_dir().join("history.json"))
        .to_string_lossy()
        .into_owned()
}

fn default_templates_file() -> String {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("templates.json"))
        .unwrap_or_else(|| fallback_dir().join("templates.json"))
        .to_string_lossy()
        .into_owned()
}

fn default_record_history() -> bool {
    true
}

const PROJECT_CONFIG_FILENAME: &str = ".arbor.toml";
const USER_CONFIG_ENV: &str = "ARBOR_CONFIG";
const HISTORY_FILE_ENV: &str = "ARBOR_HISTORY_FILE";
const TEMPLATES_FILE_ENV: &str = "ARBOR_TEMPLATES_FILE";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    apply_env_overrides(&mut merged_config, |key| env::var(key).ok());
    expand_config_paths(&mut merged_config);
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    let config_path = match env::var(USER_CONFIG_ENV) {
        Ok(explicit) => PathBuf::from(shellexpand::tilde(&explicit).into_owned()),
        Err(_) => match project_dirs() {
            Some(proj_dirs) => proj_dirs.config_dir().join("config.toml"),
            None => {
                warn!("Could not determine user config directory.");
                return Ok(None);
            }
        },
    };
    if config_path.is_file() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No project configuration file (.arbor.toml) found in current directory or ancestors.");
            Ok(None)
        }
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let project_config = dir.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if dir.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                dir.display()
            );
            return None;
        }
    }
    None
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the built-in defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let Some(project_cfg) = project else {
        return user;
    };
    let defaults = Config::default();
    let pick = |project: String, user: String, default: &str| {
        if project != default {
            project
        } else {
            user
        }
    };

    Config {
        storage: StorageConfig {
            history_file: pick(
                project_cfg.storage.history_file,
                user.storage.history_file,
                &defaults.storage.history_file,
            ),
            templates_file: pick(
                project_cfg.storage.templates_file,
                user.storage.templates_file,
                &defaults.storage.templates_file,
            ),
        },
        create: CreateConfig {
            overwrite: if project_cfg.create.overwrite != defaults.create.overwrite {
                project_cfg.create.overwrite
            } else {
                user.create.overwrite
            },
            record_history: if project_cfg.create.record_history
                != defaults.create.record_history
            {
                project_cfg.create.record_history
            } else {
                user.create.record_history
            },
        },
        render: RenderConfig {
            indent: if project_cfg.render.indent != defaults.render.indent {
                project_cfg.render.indent
            } else {
                user.render.indent
            },
        },
    }
}

fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(path) = lookup(HISTORY_FILE_ENV) {
        debug!("{} overrides history file: {}", HISTORY_FILE_ENV, path);
        config.storage.history_file = path;
    }
    if let Some(path) = lookup(TEMPLATES_FILE_ENV) {
        debug!("{} overrides templates file: {}", TEMPLATES_FILE_ENV, path);
        config.storage.templates_file = path;
    }
}

fn expand_config_paths(config: &mut Config) {
    config.storage.history_file = shellexpand::tilde(&config.storage.history_file).into_owned();
    config.storage.templates_file =
        shellexpand::tilde(&config.storage.templates_file).into_owned();
    debug!(
        "Expanded storage paths: history '{}', templates '{}'",
        config.storage.history_file, config.storage.templates_file
    );
}

fn validate_config(config: &Config) -> Result<()> {
    for (label, value) in [
        ("history_file", &config.storage.history_file),
        ("templates_file", &config.storage.templates_file),
    ] {
        if value.trim().is_empty() {
            return Err(anyhow!(ArborError::Config(format!(
                "storage.{} cannot be empty.",
                label
            ))));
        }
        if Path::new(value).is_dir() {
            return Err(anyhow!(ArborError::Config(format!(
                "storage.{} '{}' is a directory, expected a file path.",
                label, value
            ))));
        }
    }
    Ok(())
}

impl Config {
    pub fn history_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.history_file)
    }

    pub fn templates_path(&self) -> PathBuf {
        PathBuf::from(&self.storage.templates_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [storage]
            history_file = "~/arbor/history.json"

            [create]
            overwrite = "never"

            [render]
            indent = "tabs"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.storage.history_file, "~/arbor/history.json");
        assert_eq!(config.storage.templates_file, default_templates_file());
        assert_eq!(config.create.overwrite, OverwritePolicy::Never);
        assert!(config.create.record_history);
        assert_eq!(config.render.indent, IndentStyle::Tabs);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.create.record_history);
        assert_eq!(config.create.overwrite, OverwritePolicy::Ask);
        assert!(config.storage.history_file.ends_with("history.json"));
    }

    #[test]
    fn test_unknown_fields_and_values_are_rejected() {
        assert!(toml::from_str::<Config>("[create]\nforce = true").is_err());
        assert!(toml::from_str::<Config>("[create]\noverwrite = \"maybe\"").is_err());
    }

    #[test]
    fn test_merge_prefers_project_values() {
        let user: Config =
            toml::from_str("[create]\noverwrite = \"always\"\n[render]\nindent = \"tabs\"")
                .unwrap();
        let project: Config =
            toml::from_str("[storage]\nhistory_file = \"/p/history.json\"").unwrap();

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.storage.history_file, "/p/history.json");
        assert_eq!(merged.create.overwrite, OverwritePolicy::Always);
        assert_eq!(merged.render.indent, IndentStyle::Tabs);
    }

    #[test]
    fn test_env_overrides_and_path_expansion() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, |key| match key {
            HISTORY_FILE_ENV => Some("~/hist.json".to_string()),
            _ => None,
        });
        expand_config_paths(&mut config);

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.storage.history_file,
            home_dir.join("hist.json").to_string_lossy()
        );
        assert_eq!(config.storage.templates_file, default_templates_file());
    }

    #[test]
    fn test_validate_rejects_directory_paths() {
        let temp_dir = tempdir().unwrap();
        let mut config = Config::default();
        config.storage.history_file = temp_dir.path().to_string_lossy().into_owned();
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("is a directory"));

        config.storage.history_file = temp_dir
            .path()
            .join("history.json")
            .to_string_lossy()
            .into_owned();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_find_project_config_stops_at_git_root() {
        let root = tempdir().unwrap();
        let repo = root.path().join("repo");
        let nested = repo.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(root.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join("a").join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join("a").join(PROJECT_CONFIG_FILENAME))
        );
    }
}
