//! Resolved navigation tree.
//!
//! The output of [`resolve`](crate::resolve). Unlike the configuration model,
//! resolved nodes cannot hold autogenerate placeholders, and every group has a
//! definite collapsed state.

use serde::Serialize;

use crate::model::NavEntry;

/// Resolved group with its expanded children.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedGroup {
    /// Display label.
    pub label: String,
    /// Whether the renderer should start with the group collapsed.
    pub collapsed: bool,
    /// Ordered children.
    #[serde(rename = "items")]
    pub children: Vec<ResolvedNode>,
}

/// Node of the resolved tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResolvedNode {
    /// Link to a document.
    Entry(NavEntry),
    /// Nested group.
    Group(ResolvedGroup),
}

/// Fully expanded sidebar: an ordered list of top-level sections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedTree {
    sections: Vec<ResolvedGroup>,
}

impl ResolvedTree {
    pub(crate) fn new(sections: Vec<ResolvedGroup>) -> Self {
        Self { sections }
    }

    /// Top-level sections in declaration order.
    #[must_use]
    pub fn sections(&self) -> &[ResolvedGroup] {
        &self.sections
    }

    /// Number of top-level sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True if the tree has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over top-level sections.
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedGroup> {
        self.sections.iter()
    }

    /// Total number of entries at any depth.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.targets().len()
    }

    /// Entry targets in depth-first order.
    #[must_use]
    pub fn targets(&self) -> Vec<&str> {
        fn walk<'a>(nodes: &'a [ResolvedNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                match node {
                    ResolvedNode::Entry(entry) => out.push(&entry.target),
                    ResolvedNode::Group(group) => walk(&group.children, out),
                }
            }
        }

        let mut out = Vec::new();
        for section in &self.sections {
            walk(&section.children, &mut out);
        }
        out
    }

    /// Consume the tree, returning its sections.
    #[must_use]
    pub fn into_sections(self) -> Vec<ResolvedGroup> {
        self.sections
    }
}

impl<'a> IntoIterator for &'a ResolvedTree {
    type Item = &'a ResolvedGroup;
    type IntoIter = std::slice::Iter<'a, ResolvedGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}
