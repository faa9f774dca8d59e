//! Resolution errors and warnings.

use std::fmt;

/// Position of a node in the sidebar configuration.
///
/// Displays as `sidebar[0].items[2]`, matching the shape of `sidebar.toml`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    indices: Vec<usize>,
}

impl Location {
    /// Location of a top-level section.
    #[must_use]
    pub fn section(index: usize) -> Self {
        Self {
            indices: vec![index],
        }
    }

    /// Location of the `index`-th child of this node.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.indices.len() + 1);
        indices.extend_from_slice(&self.indices);
        indices.push(index);
        Self { indices }
    }

    /// Index path from the top-level section down.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("sidebar")?;
        for (depth, index) in self.indices.iter().enumerate() {
            if depth == 0 {
                write!(f, "[{index}]")?;
            } else {
                write!(f, ".items[{index}]")?;
            }
        }
        Ok(())
    }
}

/// Fatal configuration defect found during resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Explicit entry points at a document that does not exist.
    #[error("Broken reference at {location} in section \"{section}\": entry \"{label}\" points to missing document \"{target}\"")]
    BrokenReference {
        /// Entry label.
        label: String,
        /// Target as written in configuration.
        target: String,
        /// Position of the entry.
        location: Location,
        /// Label of the enclosing group.
        section: String,
    },
    /// Two sibling groups share a label.
    #[error("Duplicate group label \"{label}\" in section \"{section}\": {first} and {second}")]
    DuplicateLabel {
        /// Shared label.
        label: String,
        /// First group with the label.
        first: Location,
        /// Second group with the label.
        second: Location,
        /// Label of the enclosing group (`<root>` for top-level sections).
        section: String,
    },
    /// Two autogenerate directives claim the same documents.
    #[error("Ambiguous claim: directory \"{directory}\" is autogenerated at both {first} and {second}")]
    AmbiguousClaim {
        /// Directory claimed twice.
        directory: String,
        /// First directive.
        first: Location,
        /// Second directive.
        second: Location,
    },
}

/// Non-fatal finding reported alongside a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// Autogenerate directive matched no documents.
    EmptyAutogenerate {
        /// Directory of the directive.
        directory: String,
        /// Position of the directive.
        location: Location,
        /// Label of the enclosing group.
        section: String,
    },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAutogenerate {
                directory,
                location,
                section,
            } => write!(
                f,
                "Autogenerate directory \"{directory}\" at {location} in section \"{section}\" matched no documents"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display_top_level() {
        assert_eq!(Location::section(3).to_string(), "sidebar[3]");
    }

    #[test]
    fn test_location_display_nested() {
        let location = Location::section(0).child(2).child(1);

        assert_eq!(location.to_string(), "sidebar[0].items[2].items[1]");
        assert_eq!(location.indices(), &[0, 2, 1]);
    }

    #[test]
    fn test_broken_reference_message_names_label_and_target() {
        let err = ResolveError::BrokenReference {
            label: "Nope".to_owned(),
            target: "/nope".to_owned(),
            location: Location::section(0).child(0),
            section: "JS".to_owned(),
        };

        let message = err.to_string();
        assert!(message.contains("\"Nope\""));
        assert!(message.contains("\"/nope\""));
        assert!(message.contains("sidebar[0].items[0]"));
        assert!(message.contains("\"JS\""));
    }

    #[test]
    fn test_duplicate_label_message_names_both_locations() {
        let err = ResolveError::DuplicateLabel {
            label: "Notes".to_owned(),
            first: Location::section(0).child(1),
            second: Location::section(0).child(4),
            section: "JS".to_owned(),
        };

        let message = err.to_string();
        assert!(message.contains("sidebar[0].items[1]"));
        assert!(message.contains("sidebar[0].items[4]"));
    }

    #[test]
    fn test_empty_autogenerate_display() {
        let warning = ResolveWarning::EmptyAutogenerate {
            directory: "ts/drafts".to_owned(),
            location: Location::section(1).child(0),
            section: "TS".to_owned(),
        };

        assert_eq!(
            warning.to_string(),
            "Autogenerate directory \"ts/drafts\" at sidebar[1].items[0] in section \"TS\" matched no documents"
        );
    }
}
