//! # Arbor Canonical Hierarchy
//!
//! File: cli/src/core/hierarchy.rs
//!
//! ## Overview
//!
//! The canonical hierarchy is the one domain type every part of Arbor agrees
//! on. The parser produces it, the structure editor produces it, the history
//! and template stores persist it, and the materializer consumes it.
//!
//! A `Hierarchy` is an ordered mapping from child name to `Node`:
//! - `Node::Folder(Hierarchy)` for a folder with its own children.
//! - `Node::File` for a leaf file.
//!
//! Sibling names are unique and sibling order is insertion order. A node's kind
//! is fixed when it is first inserted: asking for a folder where a file already
//! lives (or the reverse) leaves the existing node alone.
//!
//! ## JSON Representation
//!
//! Folders serialize as JSON objects and files as `null`, preserving order:
//!
//! ```json
//! { "ProjectRoot": { "main.py": null, "utils": { "helper.py": null } } }
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The two kinds of entry a structure can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Folder,
    File,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Folder => write!(f, "folder"),
            EntryKind::File => write!(f, "file"),
        }
    }
}

/// A single entry in a hierarchy: a folder with children, or a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// A folder and its ordered children (a JSON object).
    Folder(Hierarchy),
    /// A leaf file (JSON `null`).
    File,
}

impl Node {
    pub fn kind(&self) -> EntryKind {
        match self {
            Node::Folder(_) => EntryKind::Folder,
            Node::File => EntryKind::File,
        }
    }
}

/// An ordered mapping from child name to [`Node`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hierarchy {
    entries: IndexMap<String, Node>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterates children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.entries.iter()
    }

    /// Inserts a file leaf.
    ///
    /// Returns `false` without touching anything when `name` already exists
    /// as a folder. Inserting an existing file name is a no-op that returns `true`.
    pub fn insert_file(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        match self.entries.get(&name) {
            Some(Node::Folder(_)) => false,
            Some(Node::File) => true,
            None => {
                self.entries.insert(name, Node::File);
                true
            }
        }
    }

    /// Returns the folder called `name`, creating it if absent.
    ///
    /// An existing folder is reused so that repeated folder names merge.
    /// Returns `None` when `name` already exists as a file.
    pub fn folder_entry(&mut self, name: impl Into<String>) -> Option<&mut Hierarchy> {
        match self
            .entries
            .entry(name.into())
            .or_insert_with(|| Node::Folder(Hierarchy::new()))
        {
            Node::Folder(children) => Some(children),
            Node::File => None,
        }
    }

    /// Inserts a fully built child node, replacing any previous node of that name.
    pub fn insert_node(&mut self, name: impl Into<String>, node: Node) {
        self.entries.insert(name.into(), node);
    }

    /// The first top-level name, used as the label of a history record.
    pub fn project_name(&self) -> Option<&str> {
        self.entries.keys().next().map(String::as_str)
    }

    /// Wraps this hierarchy as the single folder `name` of a new top level.
    pub fn wrap(self, name: impl Into<String>) -> Hierarchy {
        let mut top = Hierarchy::new();
        top.insert_node(name, Node::Folder(self));
        top
    }

    /// Total number of folders at every depth.
    pub fn folder_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                Node::Folder(children) => 1 + children.folder_count(),
                Node::File => 0,
            })
            .sum()
    }

    /// Total number of files at every depth.
    pub fn file_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                Node::Folder(children) => children.file_count(),
                Node::File => 1,
            })
            .sum()
    }

    /// Parses a hierarchy from its JSON object form.
    pub fn from_json(json: &str) -> Result<Hierarchy> {
        serde_json::from_str(json).context("Failed to parse structure JSON")
    }
}

/// Serializes any value as JSON indented by four spaces, the layout used for
/// the history file and structure previews.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .context("Failed to serialize structure as JSON")?;
    String::from_utf8(buffer).context("Serialized JSON was not valid UTF-8")
}
