//! # Arbor Structure Renderer
//!
//! File: cli/src/core/render.rs
//!
//! ## Overview
//!
//! Turns a [`Hierarchy`] back into text. Two layouts are offered:
//!
//! - **Indented** (`indented`): one entry per line, one tab or four spaces per
//!   level. This is the format users type.
//! - **Tree** (`tree`): the `tree`-command look with `├──`, `└──` and `│`
//!   connectors.
//!
//! Folders are always written with a trailing `/`, so a folder whose name
//! contains a dot keeps its kind when the text is parsed again. Both layouts
//! are accepted by [`crate::core::parser::parse`], and for any text `t`,
//! `parse(render(parse(t)))` equals `parse(t)`.
//!
//! The reverse does not hold for every hierarchy: a file without a `.` (for
//! example a scanned `Makefile`) reads back as a folder. [`untyped_files`]
//! lists such entries; JSON is the lossless form for them.
//!
//! Example tree output:
//!
//! ```text
//! ProjectRoot/
//! ├── main.py
//! └── utils/
//!     └── helper.py
//! ```
//!
use crate::core::hierarchy::{Hierarchy, Node};
use serde::Deserialize;

// --- Constants for Tree Drawing ---

/// Connector for intermediate items in a listing.
const TEE: &str = "├── ";
/// Connector for the last item in a listing.
const ELBOW: &str = "└── ";
/// Vertical line continuing an unfinished level.
const PIPE: &str = "│   ";
/// Blank indentation below a finished level.
const SPACER: &str = "    ";
/// ANSI escape code to start bold text (folders).
const BOLD_START: &str = "\x1b[1m";
/// ANSI escape code to reset formatting.
const BOLD_END: &str = "\x1b[0m";

/// Indentation unit for the indented layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStyle {
    /// Four spaces per level.
    #[default]
    Spaces,
    /// One tab per level.
    Tabs,
}

impl IndentStyle {
    fn unit(self) -> &'static str {
        match self {
            IndentStyle::Spaces => "    ",
            IndentStyle::Tabs => "\t",
        }
    }
}

/// Renders the hierarchy one entry per line, indented by `style`.
pub fn indented(hierarchy: &Hierarchy, style: IndentStyle) -> String {
    let mut output = String::new();
    write_indented(hierarchy, style.unit(), 0, &mut output);
    output
}

fn write_indented(hierarchy: &Hierarchy, unit: &str, depth: usize, output: &mut String) {
    for (name, node) in hierarchy.iter() {
        output.push_str(&unit.repeat(depth));
        output.push_str(name);
        match node {
            Node::Folder(children) => {
                output.push_str("/\n");
                write_indented(children, unit, depth + 1, output);
            }
            Node::File => output.push('\n'),
        }
    }
}

/// Slash paths of files whose names the text parser would read as folders.
pub fn untyped_files(hierarchy: &Hierarchy) -> Vec<String> {
    let mut found = Vec::new();
    collect_untyped(hierarchy, "", &mut found);
    found
}

fn collect_untyped(hierarchy: &Hierarchy, prefix: &str, found: &mut Vec<String>) {
    for (name, node) in hierarchy.iter() {
        let path = format!("{}{}", prefix, name);
        match node {
            Node::Folder(children) => collect_untyped(children, &format!("{}/", path), found),
            Node::File if !name.contains('.') => found.push(path),
            Node::File => {}
        }
    }
}

/// Renders the hierarchy with tree connectors. Top-level entries start at the
/// left margin. With `bold`, folder names are wrapped in ANSI bold codes,
/// which is only meant for terminal display.
pub fn tree(hierarchy: &Hierarchy, bold: bool) -> String {
    let mut output = String::new();
    for (name, node) in hierarchy.iter() {
        output.push_str(&entry_label(name, node, bold));
        output.push('\n');
        if let Node::Folder(children) = node {
            walk_tree(children, &mut String::new(), bold, &mut output);
        }
    }
    output
}

fn walk_tree(hierarchy: &Hierarchy, current_prefix: &mut String, bold: bool, output: &mut String) {
    let count = hierarchy.len();
    for (index, (name, node)) in hierarchy.iter().enumerate() {
        let is_last_entry = index + 1 == count;
        output.push_str(current_prefix);
        output.push_str(if is_last_entry { ELBOW } else { TEE });
        output.push_str(&entry_label(name, node, bold));
        output.push('\n');

        if let Node::Folder(children) = node {
            let prefix_component = if is_last_entry { SPACER } else { PIPE };
            current_prefix.push_str(prefix_component);
            walk_tree(children, current_prefix, bold, output);
            // Backtrack to this level's prefix for the next sibling.
            current_prefix.truncate(current_prefix.len() - prefix_component.len());
        }
    }
}

fn entry_label(name: &str, node: &Node, bold: bool) -> String {
    match (node, bold) {
        (Node::Folder(_), true) => format!("{}{}/{}", BOLD_START, name, BOLD_END),
        (Node::Folder(_), false) => format!("{}/", name),
        (Node::File, _) => name.to_string(),
    }
}
