//! Source file discovery by filesystem walking.
//!
//! The walker only identifies candidate files. Reading them and building
//! [`ContentDocument`](sidebar_nav::ContentDocument)s happens in
//! [`ContentScanner::scan`](crate::ContentScanner::scan).

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::ContentError;

/// Location of one content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceFile {
    /// Path relative to the source directory, `/`-separated (e.g., "javascript/index.md").
    pub rel_path: String,
    /// Absolute path used for reading.
    pub abs_path: PathBuf,
}

/// Walks a source directory and collects content files.
pub(crate) struct Walker<'a> {
    source_dir: &'a Path,
    extensions: &'a [String],
    exclude: &'a [Pattern],
}

impl<'a> Walker<'a> {
    pub fn new(source_dir: &'a Path, extensions: &'a [String], exclude: &'a [Pattern]) -> Self {
        Self {
            source_dir,
            extensions,
            exclude,
        }
    }

    /// Walk the tree and return matching files.
    ///
    /// Returns an empty Vec if the source directory doesn't exist.
    pub fn walk(&self) -> Result<Vec<SourceFile>, ContentError> {
        let mut files = Vec::new();
        if self.source_dir.is_dir() {
            self.walk_directory(self.source_dir, "", &mut files)?;
        }
        Ok(files)
    }

    fn walk_directory(
        &self,
        dir_path: &Path,
        prefix: &str,
        files: &mut Vec<SourceFile>,
    ) -> Result<(), ContentError> {
        let entries = fs::read_dir(dir_path).map_err(|e| ContentError::io(dir_path, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| ContentError::io(dir_path, e))?;
            // Relative paths must be exact, so names that are not UTF-8 are skipped.
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::warn!(
                        dir = %dir_path.display(),
                        name = ?raw,
                        "Skipping entry with non-UTF-8 name"
                    );
                    continue;
                }
            };

            // Skip hidden files/dirs
            if name.starts_with('.') {
                continue;
            }

            let rel_path = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            let path = entry.path();
            let is_dir = entry
                .file_type()
                .map_err(|e| ContentError::io(&path, e))?
                .is_dir();

            if is_dir {
                self.walk_directory(&path, &rel_path, files)?;
            } else if self.has_content_extension(&path) && !self.is_excluded(&rel_path) {
                files.push(SourceFile {
                    rel_path,
                    abs_path: path,
                });
            }
        }

        Ok(())
    }

    fn has_content_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }

    fn is_excluded(&self, rel_path: &str) -> bool {
        self.exclude.iter().any(|p| p.matches(rel_path))
    }
}
