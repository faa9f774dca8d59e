//! Declarative sidebar configuration model.
//!
//! A sidebar is an ordered list of top-level [`NavGroup`] sections. Each group
//! holds an ordered list of [`NavNode`] children: explicit entries, nested
//! groups, or [`AutogenerateDirective`] placeholders that expand into one
//! entry per content document found under a directory.
//!
//! # Path Convention
//!
//! Document paths are relative to the content root and use `/` separators,
//! including the file extension (e.g., `"javascript/notes/closures.md"`).

use serde::Serialize;

/// Leaf navigation entry pointing at a content document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    /// Display label.
    pub label: String,
    /// Referenced document (path or slug in configuration, canonical path once resolved).
    pub target: String,
}

impl NavEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// Group of navigation nodes as authored in configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavGroup {
    /// Display label, unique among sibling groups.
    pub label: String,
    /// Whether the group starts collapsed. `None` resolves to expanded.
    pub collapsed: Option<bool>,
    /// Ordered children.
    pub children: Vec<NavNode>,
}

impl NavGroup {
    /// Create an empty group.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            collapsed: None,
            children: Vec::new(),
        }
    }

    /// Set the collapsed flag.
    #[must_use]
    pub fn with_collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = Some(collapsed);
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<NavNode>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Placeholder expanded into entries for every document under `directory`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutogenerateDirective {
    /// Directory prefix relative to the content root (`""` for the whole root).
    pub directory: String,
}

impl AutogenerateDirective {
    /// Create a directive for a directory prefix.
    #[must_use]
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

/// Child of a [`NavGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavNode {
    /// Explicit entry.
    Entry(NavEntry),
    /// Nested group.
    Group(NavGroup),
    /// Directory expansion placeholder.
    Autogenerate(AutogenerateDirective),
}

impl From<NavEntry> for NavNode {
    fn from(entry: NavEntry) -> Self {
        Self::Entry(entry)
    }
}

impl From<NavGroup> for NavNode {
    fn from(group: NavGroup) -> Self {
        Self::Group(group)
    }
}

impl From<AutogenerateDirective> for NavNode {
    fn from(directive: AutogenerateDirective) -> Self {
        Self::Autogenerate(directive)
    }
}

/// Content document discovered under the content root.
///
/// Owned by the content scanner; the resolver only reads it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContentDocument {
    /// Path relative to the content root (e.g., "javascript/notes/a.md").
    pub path: String,
    /// Document title, used as the label of autogenerated entries.
    pub title: String,
    /// Manual sort order within an autogenerated listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Collapsed hint from frontmatter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl ContentDocument {
    /// Create a document without ordering metadata.
    #[must_use]
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            order: None,
            collapsed: None,
        }
    }

    /// Set the manual sort order.
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }
}

/// Normalize a configured path: `\` becomes `/`, and leading `./` and
/// surrounding slashes are removed.
///
/// ```
/// use sidebar_nav::normalize_path;
///
/// assert_eq!(normalize_path("/javascript/notes/"), "javascript/notes");
/// assert_eq!(normalize_path("./guide\\intro.md"), "guide/intro.md");
/// assert_eq!(normalize_path("/"), "");
/// ```
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let path = path.strip_prefix("./").unwrap_or(&path);
    path.trim_matches('/').to_owned()
}

/// Slug of a document path: extension dropped and trailing `index` removed.
///
/// ```
/// use sidebar_nav::slug_of;
///
/// assert_eq!(slug_of("guide/intro.md"), "guide/intro");
/// assert_eq!(slug_of("guide/index.mdx"), "guide");
/// assert_eq!(slug_of("index.md"), "");
/// ```
#[must_use]
pub fn slug_of(path: &str) -> String {
    let (dir, file) = match path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, path),
    };
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);

    match (dir, stem) {
        (Some(dir), "index") => dir.to_owned(),
        (None, "index") => String::new(),
        (Some(dir), stem) => format!("{dir}/{stem}"),
        (None, stem) => stem.to_owned(),
    }
}
