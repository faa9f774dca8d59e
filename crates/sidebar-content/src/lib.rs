//! Content directory scanning for Sidebar.
//!
//! Walks a source directory, reads the frontmatter of every content file and
//! produces the [`ContentDocument`]s consumed by [`sidebar_nav::resolve`].
//!
//! Titles come from, in order:
//! 1. The frontmatter `title` field
//! 2. The first `# ` heading in the body
//! 3. The file stem, title-cased (`setup-guide.md` becomes "Setup Guide").
//!    `index` files use their parent directory name instead.
//!
//! # Example
//!
//! ```no_run
//! use sidebar_content::ContentScanner;
//!
//! let documents = ContentScanner::new("src/content/docs")
//!     .with_extensions(["md", "mdx"])
//!     .with_exclude(["drafts/**"])?
//!     .scan()?;
//!
//! for doc in &documents {
//!     println!("{} -> {}", doc.path, doc.title);
//! }
//! # Ok::<(), sidebar_content::ContentError>(())
//! ```

mod frontmatter;
mod scanner;

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use rayon::prelude::*;
use sidebar_nav::ContentDocument;

use scanner::{SourceFile, Walker};

/// Extensions scanned when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Content scanning error.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Directory or file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Exclude pattern is not a valid glob.
    #[error("Invalid exclude pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

impl ContentError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Scans a source directory for content documents.
#[derive(Debug, Clone)]
pub struct ContentScanner {
    source_dir: PathBuf,
    extensions: Vec<String>,
    exclude: Vec<Pattern>,
}

impl ContentScanner {
    /// Create a scanner for `source_dir` with the default extensions.
    #[must_use]
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_owned()).collect(),
            exclude: Vec::new(),
        }
    }

    /// Replace the scanned file extensions. A leading `.` is ignored.
    #[must_use]
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_owned())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Exclude files whose relative path matches any of the glob patterns.
    pub fn with_exclude<I, S>(mut self, patterns: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude = patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref();
                Pattern::new(pattern).map_err(|source| ContentError::InvalidPattern {
                    pattern: pattern.to_owned(),
                    source,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    /// Root directory being scanned.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Scan the source directory.
    ///
    /// Returns documents sorted by path. A missing source directory yields an
    /// empty list.
    pub fn scan(&self) -> Result<Vec<ContentDocument>, ContentError> {
        let files = Walker::new(&self.source_dir, &self.extensions, &self.exclude).walk()?;

        let mut documents = files
            .par_iter()
            .map(build_document)
            .collect::<Result<Vec<_>, _>>()?;
        documents.sort_by(|a, b| a.path.cmp(&b.path));

        tracing::debug!(
            source_dir = %self.source_dir.display(),
            documents = documents.len(),
            "Scanned content"
        );
        Ok(documents)
    }
}

fn build_document(file: &SourceFile) -> Result<ContentDocument, ContentError> {
    let content =
        fs::read_to_string(&file.abs_path).map_err(|e| ContentError::io(&file.abs_path, e))?;
    let (frontmatter, body) = frontmatter::read(&content, &file.rel_path);
    let sidebar = frontmatter.sidebar.unwrap_or_default();

    let title = frontmatter
        .title
        .filter(|t| !t.trim().is_empty())
        .or_else(|| frontmatter::first_heading(body))
        .unwrap_or_else(|| title_from_path(&file.rel_path));

    Ok(ContentDocument {
        path: file.rel_path.clone(),
        title,
        order: sidebar.order,
        collapsed: sidebar.collapsed,
    })
}

/// Derive a title from a relative path's file stem.
fn title_from_path(rel_path: &str) -> String {
    let mut segments = rel_path.rsplit('/');
    let file_name = segments.next().unwrap_or(rel_path);
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);

    let slug = match segments.next() {
        Some(parent) if stem.eq_ignore_ascii_case("index") => parent,
        _ => stem,
    };
    titlecase_from_slug(&slug.to_lowercase())
}

/// Convert a kebab-case or `snake_case` slug to Title Case.
fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

/// Capitalize the first character of a word, appending to `buf`.
fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_titlecase_from_slug() {
        assert_eq!(titlecase_from_slug("setup-guide"), "Setup Guide");
        assert_eq!(titlecase_from_slug("event_loop"), "Event Loop");
        assert_eq!(titlecase_from_slug("--a--b"), "A B");
        assert_eq!(titlecase_from_slug(""), "");
    }

    #[test]
    fn test_title_from_path() {
        assert_eq!(title_from_path("guide/setup-guide.md"), "Setup Guide");
        assert_eq!(title_from_path("web-architecture/index.mdx"), "Web Architecture");
        assert_eq!(title_from_path("index.md"), "Index");
        assert_eq!(title_from_path("Closures.MD"), "Closures");
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();

        let documents = ContentScanner::new(temp_dir.path().join("nope"))
            .scan()
            .unwrap();

        assert!(documents.is_empty());
    }

    #[test]
    fn test_scan_reads_frontmatter() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "javascript/hoisting.md",
            "---\ntitle: Hoisting\nsidebar:\n  order: 1\n  collapsed: true\n---\n# Ignored\n",
        );

        let documents = ContentScanner::new(temp_dir.path()).scan().unwrap();

        assert_eq!(
            documents,
            vec![ContentDocument {
                path: "javascript/hoisting.md".to_owned(),
                title: "Hoisting".to_owned(),
                order: Some(1),
                collapsed: Some(true),
            }]
        );
    }

    #[test]
    fn test_scan_title_fallbacks() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a/heading.md", "Intro\n\n# From Heading\n");
        write(temp_dir.path(), "a/setup-guide.md", "No heading here.\n");
        write(temp_dir.path(), "a/empty-title.md", "---\ntitle: \"\"\n---\n");
        write(temp_dir.path(), "nodejs/index.md", "");

        let documents = ContentScanner::new(temp_dir.path()).scan().unwrap();
        let titles: Vec<(&str, &str)> = documents
            .iter()
            .map(|d| (d.path.as_str(), d.title.as_str()))
            .collect();

        assert_eq!(
            titles,
            vec![
                ("a/empty-title.md", "Empty Title"),
                ("a/heading.md", "From Heading"),
                ("a/setup-guide.md", "Setup Guide"),
                ("nodejs/index.md", "Nodejs"),
            ]
        );
    }

    #[test]
    fn test_scan_malformed_frontmatter_treated_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        write(
            temp_dir.path(),
            "broken.md",
            "---\nsidebar: [unclosed\n---\n# Still Titled\n",
        );

        let documents = ContentScanner::new(temp_dir.path()).scan().unwrap();

        assert_eq!(documents[0].title, "Still Titled");
        assert_eq!(documents[0].order, None);
    }

    #[test]
    fn test_scan_sorted_by_path() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["z.md", "b/c.md", "a.md", "b.md"] {
            write(temp_dir.path(), name, "# T\n");
        }

        let documents = ContentScanner::new(temp_dir.path()).scan().unwrap();
        let paths: Vec<&str> = documents.iter().map(|d| d.path.as_str()).collect();

        assert_eq!(paths, vec!["a.md", "b.md", "b/c.md", "z.md"]);
    }

    #[test]
    fn test_with_extensions_strips_dot() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "page.markdown", "# Page\n");
        write(temp_dir.path(), "page.md", "# Page\n");

        let documents = ContentScanner::new(temp_dir.path())
            .with_extensions([".markdown"])
            .scan()
            .unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].path, "page.markdown");
    }

    #[test]
    fn test_with_exclude_invalid_pattern() {
        let err = ContentScanner::new("docs").with_exclude(["[unclosed"]).unwrap_err();

        assert!(matches!(err, ContentError::InvalidPattern { ref pattern, .. } if pattern == "[unclosed"));
    }

    #[test]
    fn test_with_exclude_filters_documents() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "drafts/wip.md", "# WIP\n");
        write(temp_dir.path(), "guide.md", "# Guide\n");

        let documents = ContentScanner::new(temp_dir.path())
            .with_exclude(["drafts/**"])
            .unwrap()
            .scan()
            .unwrap();

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].path, "guide.md");
    }
}
