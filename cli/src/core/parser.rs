//! # Arbor Tree Text Parser
//!
//! File: cli/src/core/parser.rs
//!
//! ## Overview
//!
//! Converts an indented, optionally tree-drawn, plain-text description of a
//! project layout into a canonical [`Hierarchy`]. Both of these parse the same:
//!
//! ```text
//! ProjectRoot              ProjectRoot/
//!     main.py              ├── main.py
//!     utils/               └── utils/
//!         helper.py            └── helper.py
//! ```
//!
//! ## Rules
//!
//! For each line:
//! 1. Leading tree decoration (`│ ├ └ ─ |`, spaces, tabs) is stripped to get
//!    the label. The stripped prefix is the line's indent.
//! 2. Lines with an empty label are skipped.
//! 3. Depth is the number of tabs in the indent if it has any, otherwise the
//!    indent width (in characters) divided by four.
//! 4. A label ending in `/` or containing no `.` is a folder (the trailing `/`
//!    is dropped from its name); anything else is a file. A folder such as
//!    `v1.0` must therefore be written `v1.0/`.
//! 5. The parent is the nearest open folder with a strictly smaller depth, or
//!    the top level when none is open. Folders stay open for deeper lines;
//!    files never do.
//!
//! Repeated folder names under the same parent merge into one folder. A name
//! that already exists with the other kind keeps its first kind; the conflicting
//! line is logged and dropped. The parser never fails.
//!
//! ## JSON input
//!
//! Text has no way to mark a file without a `.` (`Makefile`, `LICENSE`), so
//! commands read their input with [`parse_input`], which also accepts the
//! canonical JSON form printed by `--format json`.
//!
use crate::core::error::Result;
use crate::core::hierarchy::{EntryKind, Hierarchy, Node};
use tracing::{debug, warn};

/// Characters stripped from the start of every line before reading its label.
const TREE_DECORATION: &[char] = &['│', '├', '└', '─', '|', ' ', '\t'];

/// Number of spaces that make up one level of indentation.
const SPACES_PER_LEVEL: usize = 4;

/// One meaningful line of structure text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine<'a> {
    /// The entry name, with any trailing `/` removed from folders.
    pub name: &'a str,
    /// Number of characters stripped from the start of the line.
    pub indent_width: usize,
    pub depth: usize,
    pub kind: EntryKind,
}

/// Reads a single line. Returns `None` for blank or decoration-only lines.
pub fn read_line(line: &str) -> Option<TreeLine<'_>> {
    let rest = line.trim_start_matches(TREE_DECORATION);
    let indent = &line[..line.len() - rest.len()];
    let label = rest.trim();
    if label.is_empty() {
        return None;
    }

    let indent_width = indent.chars().count();
    let tabs = indent.chars().filter(|&c| c == '\t').count();
    let depth = if tabs > 0 {
        tabs
    } else {
        indent_width / SPACES_PER_LEVEL
    };

    let (name, kind) = if label.ends_with('/') || !label.contains('.') {
        (label.trim_end_matches('/'), EntryKind::Folder)
    } else {
        (label, EntryKind::File)
    };
    if name.is_empty() {
        return None;
    }

    Some(TreeLine {
        name,
        indent_width,
        depth,
        kind,
    })
}

/// Working node used while the hierarchy is assembled. `children` is `None`
/// for files.
struct Draft<'a> {
    name: &'a str,
    children: Option<Vec<usize>>,
}

/// Parses structure text into a canonical hierarchy.
pub fn parse(text: &str) -> Hierarchy {
    // Index 0 is the implicit top level.
    let mut drafts = vec![Draft {
        name: "",
        children: Some(Vec::new()),
    }];
    // Open folders as (draft index, depth). The top level sits below every depth.
    let mut open: Vec<(usize, isize)> = vec![(0, -1)];

    for (line_number, raw) in text.trim().lines().enumerate() {
        let Some(line) = read_line(raw) else {
            continue;
        };
        let depth = line.depth as isize;
        while open.len() > 1 && open[open.len() - 1].1 >= depth {
            open.pop();
        }
        let parent = open[open.len() - 1].0;

        let existing = drafts[parent]
            .children
            .iter()
            .flatten()
            .copied()
            .find(|&child| drafts[child].name == line.name);

        match (line.kind, existing) {
            (EntryKind::Folder, Some(child)) if drafts[child].children.is_some() => {
                debug!("Line {}: merging into folder '{}'", line_number + 1, line.name);
                open.push((child, depth));
            }
            (EntryKind::File, Some(child)) if drafts[child].children.is_none() => {
                debug!("Line {}: duplicate file '{}'", line_number + 1, line.name);
            }
            (kind, Some(_)) => {
                warn!(
                    "Line {}: '{}' already exists with a different kind; ignoring this {} entry.",
                    line_number + 1,
                    line.name,
                    kind
                );
            }
            (kind, None) => {
                let index = drafts.len();
                drafts.push(Draft {
                    name: line.name,
                    children: match kind {
                        EntryKind::Folder => Some(Vec::new()),
                        EntryKind::File => None,
                    },
                });
                if let Some(children) = drafts[parent].children.as_mut() {
                    children.push(index);
                }
                if kind == EntryKind::Folder {
                    open.push((index, depth));
                }
            }
        }
    }

    assemble(&drafts, 0)
}

/// Parses command input: a canonical JSON object when the text starts with
/// `{`, otherwise structure text. Template tags (`{{`, `{%`, `{#`) at the
/// start still mean structure text.
pub fn parse_input(text: &str) -> Result<Hierarchy> {
    if is_json_object(text) {
        debug!("Reading input as canonical JSON");
        return Hierarchy::from_json(text.trim());
    }
    Ok(parse(text))
}

fn is_json_object(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with('{') && !["{{", "{%", "{#"].iter().any(|tag| trimmed.starts_with(tag))
}

fn assemble(drafts: &[Draft<'_>], index: usize) -> Hierarchy {
    let mut hierarchy = Hierarchy::new();
    for &child in drafts[index].children.iter().flatten() {
        let node = match drafts[child].children {
            Some(_) => Node::Folder(assemble(drafts, child)),
            None => Node::File,
        };
        hierarchy.insert_node(drafts[child].name, node);
    }
    hierarchy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(h: &Hierarchy) -> serde_json::Value {
        serde_json::to_value(h).unwrap()
    }

    #[test]
    fn test_parse_spaces_example() {
        let text = "ProjectRoot\n    main.py\n    utils/\n        helper.py\n";
        assert_eq!(
            json(&parse(text)),
            serde_json::json!({"ProjectRoot": {"main.py": null, "utils": {"helper.py": null}}})
        );
    }

    #[test]
    fn test_folder_without_slash_or_dot() {
        let text = "ProjectRoot\n    main.py\n    utils\n        helper.py";
        assert_eq!(
            json(&parse(text)),
            serde_json::json!({"ProjectRoot": {"main.py": null, "utils": {"helper.py": null}}})
        );
    }

    #[test]
    fn test_parse_tabs() {
        let text = "app\n\tsrc\n\t\tlib.rs\n\tREADME.md";
        assert_eq!(
            json(&parse(text)),
            serde_json::json!({"app": {"src": {"lib.rs": null}, "README.md": null}})
        );
    }

    #[test]
    fn test_parse_box_drawing() {
        let text = "\
app/
├── Cargo.toml
├── src/
│   ├── main.rs
│   └── cli/
│       └── args.rs
└── tests/
    └── it.rs
";
        assert_eq!(
            json(&parse(text)),
            serde_json::json!({"app": {
                "Cargo.toml": null,
                "src": {"main.rs": null, "cli": {"args.rs": null}},
                "tests": {"it.rs": null}
            }})
        );
    }

    #[test]
    fn test_file_line_does_not_open_a_level() {
        let text = "ProjectRoot\n    config.yaml\n        nested.txt";
        let h = parse(text);
        assert_eq!(
            json(&h),
            serde_json::json!({"ProjectRoot": {"config.yaml": null, "nested.txt": null}})
        );
    }

    #[test]
    fn test_same_depth_lines_are_siblings() {
        let h = parse("a\nb\nc.txt");
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"a":{},"b":{},"c.txt":null}"#);
    }

    #[test]
    fn test_deep_line_attaches_to_nearest_open_folder() {
        let text = "root\n    one\n                deep.txt\n    two.txt";
        assert_eq!(
            json(&parse(text)),
            serde_json::json!({"root": {"one": {"deep.txt": null}, "two.txt": null}})
        );
    }

    #[test]
    fn test_indented_file_with_no_open_folder_goes_to_top_level() {
        let h = parse("a.txt\n        b.txt");
        assert_eq!(serde_json::to_string(&h).unwrap(), r#"{"a.txt":null,"b.txt":null}"#);
    }

    #[test]
    fn test_duplicate_folder_merges() {
        let text = "app\n    src\n        a.rs\napp\n    src\n        b.rs";
        assert_eq!(
            json(&parse(text)),
            serde_json::json!({"app": {"src": {"a.rs": null, "b.rs": null}}})
        );
    }

    #[test]
    fn test_kind_conflict_keeps_first_kind() {
        let text = "app\n    notes.md\n    notes.md/\n        inner.txt";
        assert_eq!(
            json(&parse(text)),
            serde_json::json!({"app": {"notes.md": null, "inner.txt": null}})
        );
    }

    #[test]
    fn test_dotted_folder_is_a_file_without_trailing_slash() {
        let h = parse("v1.0\nv2.0/");
        assert_eq!(h.get("v1.0").map(Node::kind), Some(EntryKind::File));
        assert_eq!(h.get("v2.0").map(Node::kind), Some(EntryKind::Folder));
    }

    #[test]
    fn test_blank_and_decoration_lines_are_skipped() {
        let h = parse("\n│\napp\n    │   \n\n    main.rs\n──\n");
        assert_eq!(
            json(&h),
            serde_json::json!({"app": {"main.rs": null}})
        );
    }

    #[test]
    fn test_read_line_depth_rules() {
        let line = read_line("      odd.txt").unwrap();
        assert_eq!(line.indent_width, 6);
        assert_eq!(line.depth, 1);

        let mixed = read_line("  \t  x.rs").unwrap();
        assert_eq!(mixed.depth, 1);

        let boxed = read_line("│   ├── lib/").unwrap();
        assert_eq!(boxed.indent_width, 8);
        assert_eq!(boxed.depth, 2);
        assert_eq!(boxed.name, "lib");
        assert_eq!(boxed.kind, EntryKind::Folder);

        assert!(read_line("   ").is_none());
        assert!(read_line("├── /").is_none());
    }

    #[test]
    fn test_trailing_whitespace_does_not_deepen_a_line() {
        let line = read_line("    main.py        \t").unwrap();
        assert_eq!(line.indent_width, 4);
        assert_eq!(line.depth, 1);
        assert_eq!(line.name, "main.py");

        let h = parse("app   \n    main.py            \n    lib/        \n        mod.rs\n");
        assert_eq!(
            serde_json::to_string(&h).unwrap(),
            r#"{"app":{"main.py":null,"lib":{"mod.rs":null}}}"#
        );
    }

    #[test]
    fn test_parse_input_accepts_json_and_text() {
        let json = parse_input("\n{\n    \"proj\": {\"Makefile\": null, \"src\": {}}\n}\n").unwrap();
        assert_eq!(
            serde_json::to_string(&json).unwrap(),
            r#"{"proj":{"Makefile":null,"src":{}}}"#
        );

        let text = parse_input("proj\n    Makefile\n").unwrap();
        assert_eq!(serde_json::to_string(&text).unwrap(), r#"{"proj":{"Makefile":{}}}"#);

        // Template tags are text, not JSON.
        let tagged = parse_input("{{ name }}/\n    main.rs\n").unwrap();
        assert!(tagged.contains("{{ name }}"));

        assert!(parse_input("{\"proj\": [1, 2]}").is_err());
    }

    #[test]
    fn test_empty_text() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\t\n").is_empty());
    }
}
