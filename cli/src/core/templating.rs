//! # Arbor Structure Templating
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! Structure templates are ordinary structure text that may mention the
//! project being created, for example:
//!
//! ```text
//! {{ project_name }}/
//!     src/
//!         {{ project_name_snake }}/
//!             __init__.py
//!     README.md
//! ```
//!
//! This module builds the variable context for a project and renders template
//! text through `tera` before it reaches the parser. Text without any tera
//! syntax renders unchanged.
//!
//! ## Variables
//!
//! - `project_name` and its `_lowercase`, `_uppercase`, `_snake`, `_kebab`,
//!   `_camel` and `_pascal` variants
//! - `current_date` (`YYYY-MM-DD`), `current_year`
//! - `username` (`$USER`, `$USERNAME`, or `user`)
//! - any `--var KEY=VALUE` pairs, which override the defaults
//!
use crate::core::error::{ArborError, Result};
use anyhow::anyhow;
use std::collections::HashMap;
use std::env;
use tera::Tera;
use tracing::debug;

/// Builds the variables available to a structure template.
pub fn build_template_context(
    project_name: &str,
    overrides: &[(String, String)],
) -> HashMap<String, String> {
    let mut context = HashMap::new();

    context.insert("project_name".to_string(), project_name.to_string());
    context.insert(
        "project_name_lowercase".to_string(),
        project_name.to_lowercase(),
    );
    context.insert(
        "project_name_uppercase".to_string(),
        project_name.to_uppercase(),
    );
    context.insert("project_name_snake".to_string(), to_snake_case(project_name));
    context.insert("project_name_kebab".to_string(), to_kebab_case(project_name));
    context.insert("project_name_camel".to_string(), to_camel_case(project_name));
    context.insert(
        "project_name_pascal".to_string(),
        to_pascal_case(project_name),
    );

    let now = chrono::Local::now();
    context.insert(
        "current_date".to_string(),
        now.format("%Y-%m-%d").to_string(),
    );
    context.insert("current_year".to_string(), now.format("%Y").to_string());

    let username = env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "user".to_string());
    context.insert("username".to_string(), username);

    for (key, value) in overrides {
        debug!("Template variable override: {} = {}", key, value);
        context.insert(key.clone(), value.clone());
    }
    context
}

/// Renders template text with `context`. Autoescaping is off: the output is
/// structure text, not HTML.
pub fn render_structure_template(
    template_text: &str,
    context: &HashMap<String, String>,
) -> Result<String> {
    let tera_context = tera::Context::from_serialize(context).map_err(|e| {
        anyhow!(ArborError::Template { source: e })
            .context("Failed to create template context from variables")
    })?;
    Tera::one_off(template_text, &tera_context, false).map_err(|e| {
        anyhow!(ArborError::Template { source: e }).context("Structure template rendering failed")
    })
}

/// Splits a name into lowercase words on `-`, `_`, spaces and lower→upper
/// case changes.
fn words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;
    for c in input.chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            continue;
        }
        if c.is_uppercase() && previous_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        previous_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn to_snake_case(input: &str) -> String {
    words(input).join("_")
}

fn to_kebab_case(input: &str) -> String {
    words(input).join("-")
}

fn to_pascal_case(input: &str) -> String {
    words(input).iter().map(|w| capitalize(w)).collect()
}

fn to_camel_case(input: &str) -> String {
    let pascal = to_pascal_case(input);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
