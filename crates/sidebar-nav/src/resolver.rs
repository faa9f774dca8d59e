//! Navigation tree resolver.
//!
//! Expands a declarative sidebar into a [`ResolvedTree`] using the set of
//! discovered content documents. Resolution is a pure, single pass over the
//! configuration:
//!
//! 1. Collect every autogenerate directory and reject exact duplicates.
//! 2. Assign each document to the most specific directory containing it.
//! 3. Walk the configuration depth-first in declaration order, copying explicit
//!    entries, recursing into groups and splicing directive expansions in place.
//!
//! # Example
//!
//! ```
//! use sidebar_nav::{AutogenerateDirective, ContentDocument, NavGroup, resolve};
//!
//! let config = vec![
//!     NavGroup::new("JS").with_child(AutogenerateDirective::new("javascript/notes")),
//! ];
//! let documents = vec![
//!     ContentDocument::new("javascript/notes/a.md", "A").with_order(2),
//!     ContentDocument::new("javascript/notes/b.md", "B").with_order(1),
//! ];
//!
//! let resolution = resolve(&config, &documents).unwrap();
//! assert_eq!(
//!     resolution.tree.targets(),
//!     vec!["javascript/notes/b.md", "javascript/notes/a.md"]
//! );
//! ```

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use crate::error::{Location, ResolveError, ResolveWarning};
use crate::index::{PageIndex, assign_claims, is_under};
use crate::model::{
    AutogenerateDirective, ContentDocument, NavEntry, NavGroup, NavNode, normalize_path,
};
use crate::tree::{ResolvedGroup, ResolvedNode, ResolvedTree};

/// Section name used in errors about top-level sections.
const ROOT_SECTION: &str = "<root>";

/// Successful resolution result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Fully expanded tree.
    pub tree: ResolvedTree,
    /// Non-fatal findings, in the order they were found.
    pub warnings: Vec<ResolveWarning>,
}

/// Resolve a sidebar configuration against the discovered documents.
///
/// The result does not depend on the order of `documents`.
///
/// # Errors
///
/// - [`ResolveError::AmbiguousClaim`] if two directives name the same directory.
/// - [`ResolveError::DuplicateLabel`] if sibling groups share a label.
/// - [`ResolveError::BrokenReference`] if an entry targets a missing document.
pub fn resolve(
    config: &[NavGroup],
    documents: &[ContentDocument],
) -> Result<Resolution, ResolveError> {
    let mut sorted: Vec<&ContentDocument> = documents.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let directories = collect_directories(config)?;
    let claims = assign_claims(&sorted, &directories);

    let mut resolver = Resolver {
        index: PageIndex::new(&sorted),
        documents: &sorted,
        claims,
        warnings: Vec::new(),
    };

    check_unique_labels(
        config
            .iter()
            .enumerate()
            .map(|(i, group)| (group.label.as_str(), Location::section(i))),
        ROOT_SECTION,
    )?;

    let sections = config
        .iter()
        .enumerate()
        .map(|(i, group)| resolver.resolve_group(group, &Location::section(i)))
        .collect::<Result<Vec<_>, _>>()?;

    let tree = ResolvedTree::new(sections);
    tracing::debug!(
        sections = tree.len(),
        entries = tree.entry_count(),
        warnings = resolver.warnings.len(),
        "Sidebar resolved"
    );

    Ok(Resolution {
        tree,
        warnings: resolver.warnings,
    })
}

/// Per-call resolution state.
struct Resolver<'a> {
    index: PageIndex<'a>,
    documents: &'a [&'a ContentDocument],
    claims: HashMap<String, Vec<&'a ContentDocument>>,
    warnings: Vec<ResolveWarning>,
}

impl Resolver<'_> {
    fn resolve_group(
        &mut self,
        group: &NavGroup,
        location: &Location,
    ) -> Result<ResolvedGroup, ResolveError> {
        check_unique_labels(
            group
                .children
                .iter()
                .enumerate()
                .filter_map(|(i, child)| match child {
                    NavNode::Group(g) => Some((g.label.as_str(), location.child(i))),
                    _ => None,
                }),
            &group.label,
        )?;

        let mut children = Vec::with_capacity(group.children.len());
        for (i, child) in group.children.iter().enumerate() {
            let child_location = location.child(i);
            match child {
                NavNode::Entry(entry) => {
                    children.push(ResolvedNode::Entry(self.resolve_entry(
                        entry,
                        child_location,
                        &group.label,
                    )?));
                }
                NavNode::Group(nested) => {
                    children.push(ResolvedNode::Group(
                        self.resolve_group(nested, &child_location)?,
                    ));
                }
                NavNode::Autogenerate(directive) => {
                    children.extend(
                        self.expand(directive, child_location, &group.label)
                            .into_iter()
                            .map(ResolvedNode::Entry),
                    );
                }
            }
        }

        Ok(ResolvedGroup {
            label: group.label.clone(),
            collapsed: group.collapsed.unwrap_or(false),
            children,
        })
    }

    fn resolve_entry(
        &self,
        entry: &NavEntry,
        location: Location,
        section: &str,
    ) -> Result<NavEntry, ResolveError> {
        let Some(doc) = self.index.lookup(&entry.target) else {
            return Err(ResolveError::BrokenReference {
                label: entry.label.clone(),
                target: entry.target.clone(),
                location,
                section: section.to_owned(),
            });
        };

        Ok(NavEntry {
            label: entry.label.clone(),
            target: doc.path.clone(),
        })
    }

    /// Entries for the documents owned by `directive`, sorted for display.
    fn expand(
        &mut self,
        directive: &AutogenerateDirective,
        location: Location,
        section: &str,
    ) -> Vec<NavEntry> {
        let directory = normalize_path(&directive.directory);
        let mut owned = self.claims.get(&directory).cloned().unwrap_or_default();

        if owned.is_empty() {
            let matched_any = self
                .documents
                .iter()
                .any(|doc| is_under(&normalize_path(&doc.path), &directory));
            if !matched_any {
                tracing::warn!(
                    directory = %directory,
                    location = %location,
                    section,
                    "Autogenerate directory matched no documents"
                );
                self.warnings.push(ResolveWarning::EmptyAutogenerate {
                    directory,
                    location,
                    section: section.to_owned(),
                });
            }
            return Vec::new();
        }

        owned.sort_by(|a, b| compare_documents(a, b));
        owned
            .into_iter()
            .map(|doc| NavEntry::new(doc.title.clone(), doc.path.clone()))
            .collect()
    }
}

/// Display order within an autogenerated listing.
///
/// Documents with an `order` come first (ascending); the rest follow. Ties and
/// unordered documents sort by path.
fn compare_documents(a: &ContentDocument, b: &ContentDocument) -> Ordering {
    let by_order = match (a.order, b.order) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_order.then_with(|| a.path.cmp(&b.path))
}

/// Collect normalized directive directories, rejecting exact duplicates.
fn collect_directories(config: &[NavGroup]) -> Result<HashSet<String>, ResolveError> {
    fn walk(
        nodes: &[NavNode],
        location: &Location,
        seen: &mut HashMap<String, Location>,
    ) -> Result<(), ResolveError> {
        for (i, node) in nodes.iter().enumerate() {
            let child_location = location.child(i);
            match node {
                NavNode::Entry(_) => {}
                NavNode::Group(group) => walk(&group.children, &child_location, seen)?,
                NavNode::Autogenerate(directive) => {
                    match seen.entry(normalize_path(&directive.directory)) {
                        Entry::Occupied(existing) => {
                            return Err(ResolveError::AmbiguousClaim {
                                directory: existing.key().clone(),
                                first: existing.get().clone(),
                                second: child_location,
                            });
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(child_location);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    let mut seen = HashMap::new();
    for (i, group) in config.iter().enumerate() {
        walk(&group.children, &Location::section(i), &mut seen)?;
    }
    Ok(seen.into_keys().collect())
}

/// Reject sibling groups that share a label.
fn check_unique_labels<'g>(
    groups: impl Iterator<Item = (&'g str, Location)>,
    section: &str,
) -> Result<(), ResolveError> {
    let mut seen: HashMap<&str, Location> = HashMap::new();
    for (label, location) in groups {
        match seen.entry(label) {
            Entry::Occupied(first) => {
                return Err(ResolveError::DuplicateLabel {
                    label: label.to_owned(),
                    first: first.get().clone(),
                    second: location,
                    section: section.to_owned(),
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(location);
            }
        }
    }
    Ok(())
}
