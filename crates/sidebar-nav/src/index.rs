//! Document lookups used during resolution.
//!
//! [`PageIndex`] answers "which document does this target name?" by canonical
//! path or by slug. [`assign_claims`] decides, before the configuration is
//! walked, which autogenerate directory owns each document, so ownership never
//! depends on traversal order.

use std::collections::{HashMap, HashSet};

use crate::model::{ContentDocument, normalize_path, slug_of};

/// Path and slug lookups over the discovered documents.
pub(crate) struct PageIndex<'a> {
    by_path: HashMap<String, &'a ContentDocument>,
    by_slug: HashMap<String, &'a ContentDocument>,
}

impl<'a> PageIndex<'a> {
    /// Build the index from documents sorted by path.
    ///
    /// On slug collisions the lexicographically first path wins.
    pub(crate) fn new(sorted: &[&'a ContentDocument]) -> Self {
        let mut by_path = HashMap::with_capacity(sorted.len());
        let mut by_slug = HashMap::with_capacity(sorted.len());

        for &doc in sorted {
            let path = normalize_path(&doc.path);
            by_slug.entry(slug_of(&path)).or_insert(doc);
            by_path.entry(path).or_insert(doc);
        }

        Self { by_path, by_slug }
    }

    /// Find a document by canonical path, falling back to its slug.
    ///
    /// A target is either a full document path or a slug as written. The only
    /// rewrite applied is dropping a trailing `index` segment, so `dir/index`
    /// matches `dir/index.md`. A target with any other suffix (`a.txt`, or
    /// `intro.md` when only `intro.mdx` exists) names no document.
    pub(crate) fn lookup(&self, target: &str) -> Option<&'a ContentDocument> {
        let target = normalize_path(target);
        self.by_path
            .get(&target)
            .or_else(|| self.by_slug.get(&target))
            .or_else(|| strip_index(&target).and_then(|slug| self.by_slug.get(slug)))
            .copied()
    }
}

/// Slug named by a target ending in an `index` segment.
fn strip_index(target: &str) -> Option<&str> {
    if target == "index" {
        return Some("");
    }
    target.strip_suffix("/index")
}

/// True if `path` lies under `directory` on a segment boundary.
pub(crate) fn is_under(path: &str, directory: &str) -> bool {
    directory.is_empty()
        || path
            .strip_prefix(directory)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Assign each document to the most specific directory that contains it.
///
/// Returns documents grouped by owning directory, each group in input order.
/// Documents under no directory are left out.
pub(crate) fn assign_claims<'a>(
    sorted: &[&'a ContentDocument],
    directories: &HashSet<String>,
) -> HashMap<String, Vec<&'a ContentDocument>> {
    let mut claims: HashMap<String, Vec<&'a ContentDocument>> = HashMap::new();
    if directories.is_empty() {
        return claims;
    }

    for &doc in sorted {
        let path = normalize_path(&doc.path);
        if let Some(owner) = owning_directory(&path, directories) {
            claims.entry(owner.to_owned()).or_default().push(doc);
        }
    }

    claims
}

/// Longest directory in `directories` that is a segment prefix of `path`.
///
/// Only whole segments match: `js/notes` owns `js/notes/a.md` but not
/// `js/notes-old/a.md`. The empty directory owns everything.
fn owning_directory<'d>(path: &str, directories: &'d HashSet<String>) -> Option<&'d str> {
    let mut current = path;
    while let Some((parent, _)) = current.rsplit_once('/') {
        if let Some(dir) = directories.get(parent) {
            return Some(dir.as_str());
        }
        current = parent;
    }
    directories.get("").map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(paths: &[&str]) -> Vec<ContentDocument> {
        paths
            .iter()
            .map(|path| ContentDocument::new(*path, *path))
            .collect()
    }

    fn dirs(list: &[&str]) -> HashSet<String> {
        list.iter().map(|d| (*d).to_owned()).collect()
    }

    #[test]
    fn test_owning_directory_requires_segment_boundary() {
        let directories = dirs(&["javascript", "javascript/notes"]);

        assert_eq!(
            owning_directory("javascript/notes/a.md", &directories),
            Some("javascript/notes")
        );
        assert_eq!(
            owning_directory("javascript/notes-old/a.md", &directories),
            Some("javascript")
        );
        assert_eq!(owning_directory("javascript.md", &directories), None);
        assert_eq!(owning_directory("anything.md", &dirs(&[""])), Some(""));
    }

    #[test]
    fn test_is_under_matches_whole_segments() {
        assert!(is_under("javascript/notes/a.md", "javascript/notes"));
        assert!(is_under("javascript/notes/deep/a.md", "javascript"));
        assert!(!is_under("javascript/notes-old/a.md", "javascript/notes"));
        assert!(!is_under("javascript/notes", "javascript/notes"));
        assert!(is_under("anything.md", ""));
    }

    #[test]
    fn test_lookup_by_path_and_slug() {
        let documents = docs(&["guide/index.md", "guide/intro.mdx"]);
        let sorted: Vec<_> = documents.iter().collect();
        let index = PageIndex::new(&sorted);

        assert_eq!(
            index.lookup("guide/intro.mdx").map(|d| d.path.as_str()),
            Some("guide/intro.mdx")
        );
        assert_eq!(
            index.lookup("guide/intro").map(|d| d.path.as_str()),
            Some("guide/intro.mdx")
        );
        assert_eq!(
            index.lookup("/guide/").map(|d| d.path.as_str()),
            Some("guide/index.md")
        );
        assert_eq!(
            index.lookup("guide/index").map(|d| d.path.as_str()),
            Some("guide/index.md")
        );
        assert!(index.lookup("/nope").is_none());
    }

    #[test]
    fn test_lookup_rejects_foreign_extensions() {
        let documents = docs(&["javascript/a.md", "javascript/node.md", "javascript/intro.mdx"]);
        let sorted: Vec<_> = documents.iter().collect();
        let index = PageIndex::new(&sorted);

        assert!(index.lookup("javascript/a.txt").is_none());
        assert!(index.lookup("javascript/node.js").is_none());
        assert!(index.lookup("javascript/intro.md").is_none());
        assert!(index.lookup("javascript/a.md.bak").is_none());
    }

    #[test]
    fn test_lookup_dotted_slug_matches_exactly() {
        let documents = docs(&["runtimes/node.js.md", "index.md"]);
        let sorted: Vec<_> = documents.iter().collect();
        let index = PageIndex::new(&sorted);

        assert_eq!(
            index.lookup("runtimes/node.js").map(|d| d.path.as_str()),
            Some("runtimes/node.js.md")
        );
        assert_eq!(index.lookup("index").map(|d| d.path.as_str()), Some("index.md"));
        assert!(index.lookup("runtimes/node").is_none());
    }

    #[test]
    fn test_lookup_slug_collision_prefers_first_path() {
        let documents = docs(&["a.md", "a.mdx"]);
        let sorted: Vec<_> = documents.iter().collect();
        let index = PageIndex::new(&sorted);

        assert_eq!(index.lookup("a").map(|d| d.path.as_str()), Some("a.md"));
    }

    #[test]
    fn test_assign_claims_most_specific_wins() {
        let documents = docs(&["js/a.md", "js/notes/b.md", "js/notes/deep/c.md", "ts/d.md"]);
        let sorted: Vec<_> = documents.iter().collect();

        let claims = assign_claims(&sorted, &dirs(&["js", "js/notes"]));

        let paths = |dir: &str| -> Vec<&str> {
            claims[dir].iter().map(|d| d.path.as_str()).collect()
        };
        assert_eq!(paths("js"), vec!["js/a.md"]);
        assert_eq!(paths("js/notes"), vec!["js/notes/b.md", "js/notes/deep/c.md"]);
        assert_eq!(claims.len(), 2);
    }

    #[test]
    fn test_assign_claims_root_directory_takes_the_rest() {
        let documents = docs(&["index.md", "js/a.md", "ts/b.md"]);
        let sorted: Vec<_> = documents.iter().collect();

        let claims = assign_claims(&sorted, &dirs(&["", "ts"]));

        assert_eq!(claims[""].len(), 2);
        assert_eq!(claims["ts"].len(), 1);
    }

    #[test]
    fn test_assign_claims_no_directories() {
        let documents = docs(&["a.md"]);
        let sorted: Vec<_> = documents.iter().collect();

        assert!(assign_claims(&sorted, &HashSet::new()).is_empty());
    }
}
