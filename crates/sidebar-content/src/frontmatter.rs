//! YAML frontmatter and heading extraction.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

static H1_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").expect("H1 pattern is valid"));

/// Recognized frontmatter fields. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub(crate) struct Frontmatter {
    pub title: Option<String>,
    pub sidebar: Option<SidebarFields>,
}

/// The `sidebar:` mapping.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub(crate) struct SidebarFields {
    pub order: Option<i64>,
    pub collapsed: Option<bool>,
}

/// Split a document into its frontmatter block and body.
///
/// The block must start on the first line with `---` and end with a line
/// containing only `---`. Without a closing delimiter the whole content is body.
pub(crate) fn split(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let Some(rest) = content
        .strip_prefix("---")
        .and_then(|r| r.strip_prefix('\n').or_else(|| r.strip_prefix("\r\n")))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parse a frontmatter block.
///
/// An empty block yields default fields.
pub(crate) fn parse(yaml: &str) -> Result<Frontmatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(yaml)
}

/// Read frontmatter from a document, logging and ignoring malformed YAML.
pub(crate) fn read<'c>(content: &'c str, path: &str) -> (Frontmatter, &'c str) {
    let (block, body) = split(content);
    let frontmatter = block
        .map(|yaml| {
            parse(yaml)
                .inspect_err(|e| {
                    tracing::warn!(path = %path, error = %e, "Failed to parse frontmatter, ignoring");
                })
                .unwrap_or_default()
        })
        .unwrap_or_default();
    (frontmatter, body)
}

/// Extract the text of the first `# ` heading.
pub(crate) fn first_heading(body: &str) -> Option<String> {
    let caps = H1_REGEX.captures(body)?;
    let title = caps[1].trim().trim_end_matches('#').trim_end();
    (!title.is_empty()).then(|| title.to_owned())
}
