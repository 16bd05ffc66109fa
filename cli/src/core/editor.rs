//! # Arbor Structure Editor
//!
//! File: cli/src/core/editor.rs
//!
//! ## Overview
//!
//! `StructureTree` is an editable, in-memory project tree: the programmatic
//! counterpart of clicking "add folder", "add file" and "delete" in a tree
//! view. It produces the same canonical [`Hierarchy`] the text parser does,
//! without sharing any of the parser's machinery.
//!
//! ## Architecture
//!
//! Nodes live in an arena (`Vec`) and are addressed by [`NodeId`]. Deleting a
//! node detaches it (and its subtree) from its parent; detached slots are never
//! reused, so a stale `NodeId` reports `UnknownNode` instead of pointing at a
//! different entry.
//!
//! Names are validated on insertion:
//! - folder names may not contain `.`;
//! - file names must contain `.`, or be one of `.env`, `.gitignore`, `.dockerignore`;
//! - sibling names must be unique and nothing can be added under a file.
//!
//! Loading an existing hierarchy (`from_hierarchy`) skips validation so that
//! stored structures always load as they were saved.
//!
//! ## Usage
//!
//! ```rust
//! let mut tree = StructureTree::new();
//! let app = tree.insert_child(None, "app", EntryKind::Folder)?;
//! let src = tree.insert_child(Some(app), "src", EntryKind::Folder)?;
//! tree.insert_child(Some(src), "main.rs", EntryKind::File)?;
//! tree.insert_sibling(src, "README.md", EntryKind::File)?;
//! let hierarchy = tree.to_hierarchy();
//! ```
//!
use crate::core::hierarchy::{EntryKind, Hierarchy, Node};
use thiserror::Error;

/// Extension-less file names accepted by the editor.
pub const SPECIAL_FILE_NAMES: &[&str] = &[".env", ".gitignore", ".dockerignore"];

/// Reasons an edit is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Name cannot be empty.")]
    EmptyName,

    #[error("Folder name '{0}' cannot contain an extension.")]
    InvalidFolderName(String),

    #[error("File name '{0}' must contain an extension or be a special file like .env or .gitignore.")]
    InvalidFileName(String),

    #[error("'{0}' already exists at this level.")]
    DuplicateName(String),

    #[error("Cannot add '{child}' under '{parent}': it is a file.")]
    ParentIsFile { parent: String, child: String },

    #[error("No entry at '{0}'.")]
    PathNotFound(String),

    #[error("Unknown or deleted node.")]
    UnknownNode,
}

/// Handle to a node of a [`StructureTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Slot {
    name: String,
    kind: EntryKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attached: bool,
}

/// An editable project tree.
#[derive(Debug, Clone, Default)]
pub struct StructureTree {
    slots: Vec<Slot>,
    roots: Vec<NodeId>,
}

impl StructureTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tree holding every entry of `hierarchy`, in order.
    pub fn from_hierarchy(hierarchy: &Hierarchy) -> Self {
        let mut tree = Self::new();
        tree.load(None, hierarchy);
        tree
    }

    fn load(&mut self, parent: Option<NodeId>, hierarchy: &Hierarchy) {
        for (name, node) in hierarchy.iter() {
            let id = self.attach(parent, name.clone(), node.kind());
            if let Node::Folder(children) = node {
                self.load(Some(id), children);
            }
        }
    }

    fn attach(&mut self, parent: Option<NodeId>, name: String, kind: EntryKind) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            name,
            kind,
            parent,
            children: Vec::new(),
            attached: true,
        });
        match parent {
            Some(NodeId(index)) => self.slots[index].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn slot(&self, id: NodeId) -> Result<&Slot, EditError> {
        self.slots
            .get(id.0)
            .filter(|slot| slot.attached)
            .ok_or(EditError::UnknownNode)
    }

    fn siblings(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            Some(NodeId(index)) => &self.slots[index].children,
            None => &self.roots,
        }
    }

    /// Adds a new entry under `parent`, or at the top level when `parent` is `None`.
    pub fn insert_child(
        &mut self,
        parent: Option<NodeId>,
        name: &str,
        kind: EntryKind,
    ) -> Result<NodeId, EditError> {
        let name = name.trim();
        validate_name(name, kind)?;
        if let Some(parent_id) = parent {
            let parent_slot = self.slot(parent_id)?;
            if parent_slot.kind == EntryKind::File {
                return Err(EditError::ParentIsFile {
                    parent: parent_slot.name.clone(),
                    child: name.to_string(),
                });
            }
        }
        if self.child_named(parent, name).is_some() {
            return Err(EditError::DuplicateName(name.to_string()));
        }
        Ok(self.attach(parent, name.to_string(), kind))
    }

    #[allow(dead_code)] // Tree-editing operation; the CLI edits by path instead.
    /// Adds a new entry next to `sibling`, under the same parent.
    pub fn insert_sibling(
        &mut self,
        sibling: NodeId,
        name: &str,
        kind: EntryKind,
    ) -> Result<NodeId, EditError> {
        let parent = self.slot(sibling)?.parent;
        self.insert_child(parent, name, kind)
    }

    /// Removes `id` and everything below it.
    pub fn delete_node(&mut self, id: NodeId) -> Result<(), EditError> {
        let parent = self.slot(id)?.parent;
        match parent {
            Some(NodeId(index)) => self.slots[index].children.retain(|&child| child != id),
            None => self.roots.retain(|&root| root != id),
        }
        let mut pending = vec![id];
        while let Some(NodeId(index)) = pending.pop() {
            self.slots[index].attached = false;
            pending.extend(self.slots[index].children.iter().copied());
        }
        Ok(())
    }

    /// Finds the child of `parent` called `name`.
    pub fn child_named(&self, parent: Option<NodeId>, name: &str) -> Option<NodeId> {
        self.siblings(parent)
            .iter()
            .copied()
            .find(|&child| self.slots[child.0].name == name)
    }

    /// Finds a node by slash-separated path from the top level, e.g. `app/src/main.rs`.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let mut current = None;
        for component in path.split('/').filter(|c| !c.is_empty()) {
            current = Some(self.child_named(current, component)?);
        }
        current
    }

    /// Adds the entry at `path`, creating any missing intermediate folders.
    /// Existing folders along the way are reused.
    pub fn insert_path(&mut self, path: &str, kind: EntryKind) -> Result<NodeId, EditError> {
        let components: Vec<&str> = path
            .split('/')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .collect();
        let Some((leaf, folders)) = components.split_last() else {
            return Err(EditError::EmptyName);
        };

        let mut parent = None;
        for folder in folders {
            parent = Some(match self.child_named(parent, folder) {
                Some(existing) if self.slots[existing.0].kind == EntryKind::Folder => existing,
                Some(_) => {
                    return Err(EditError::ParentIsFile {
                        parent: folder.to_string(),
                        child: leaf.to_string(),
                    })
                }
                None => self.insert_child(parent, folder, EntryKind::Folder)?,
            });
        }
        self.insert_child(parent, leaf, kind)
    }

    /// Deletes the entry at `path`.
    pub fn delete_path(&mut self, path: &str) -> Result<(), EditError> {
        let id = self
            .find(path)
            .ok_or_else(|| EditError::PathNotFound(path.to_string()))?;
        self.delete_node(id)
    }

    /// Serializes the current tree into a canonical hierarchy.
    pub fn to_hierarchy(&self) -> Hierarchy {
        self.collect(&self.roots)
    }

    fn collect(&self, ids: &[NodeId]) -> Hierarchy {
        let mut hierarchy = Hierarchy::new();
        for &NodeId(index) in ids {
            let slot = &self.slots[index];
            let node = match slot.kind {
                EntryKind::Folder => Node::Folder(self.collect(&slot.children)),
                EntryKind::File => Node::File,
            };
            hierarchy.insert_node(slot.name.clone(), node);
        }
        hierarchy
    }
}

/// Checks a name against the editor's folder/file naming rules.
pub fn validate_name(name: &str, kind: EntryKind) -> Result<(), EditError> {
    if name.is_empty() {
        return Err(EditError::EmptyName);
    }
    match kind {
        EntryKind::Folder if name.contains('.') => {
            Err(EditError::InvalidFolderName(name.to_string()))
        }
        EntryKind::File if !name.contains('.') && !SPECIAL_FILE_NAMES.contains(&name) => {
            Err(EditError::InvalidFileName(name.to_string()))
        }
        _ => Ok(()),
    }
}
