//! Conversion of raw `[[sidebar]]` tables into the navigation model.

use serde::Deserialize;
use sidebar_nav::{AutogenerateDirective, NavEntry, NavGroup, NavNode};

use crate::ConfigError;

/// Sidebar item as written in TOML.
///
/// Every field is optional here; [`build_sections`] decides which shape the
/// item has and rejects ambiguous combinations.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SidebarItemRaw {
    label: Option<String>,
    slug: Option<String>,
    collapsed: Option<bool>,
    items: Option<Vec<SidebarItemRaw>>,
    autogenerate: Option<AutogenerateRaw>,
}

/// `autogenerate = { directory = "..." }` table.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AutogenerateRaw {
    directory: String,
}

/// Validate top-level sections.
pub(crate) fn build_sections(raw: &[SidebarItemRaw]) -> Result<Vec<NavGroup>, ConfigError> {
    raw.iter()
        .enumerate()
        .map(|(i, item)| {
            let location = format!("sidebar[{i}]");
            match build_node(item, &location)? {
                NavNode::Group(group) => Ok(group),
                NavNode::Entry(_) | NavNode::Autogenerate(_) => Err(invalid(
                    &location,
                    "top-level sidebar sections must have a label and items or autogenerate",
                )),
            }
        })
        .collect()
}

fn build_node(item: &SidebarItemRaw, location: &str) -> Result<NavNode, ConfigError> {
    match (&item.slug, &item.items, &item.autogenerate) {
        (Some(slug), None, None) => {
            if item.collapsed.is_some() {
                return Err(invalid(location, "`collapsed` is only valid on groups"));
            }
            let label = require_label(item, location)?;
            if slug.trim().is_empty() {
                return Err(invalid(location, "`slug` cannot be empty"));
            }
            Ok(NavEntry::new(label, slug.clone()).into())
        }
        (None, Some(items), None) => {
            let label = require_label(item, location)?;
            let children = items
                .iter()
                .enumerate()
                .map(|(i, child)| build_node(child, &format!("{location}.items[{i}]")))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(NavNode::Group(NavGroup {
                label,
                collapsed: item.collapsed,
                children,
            }))
        }
        (None, None, Some(autogenerate)) => {
            let directive = AutogenerateDirective::new(autogenerate.directory.clone());
            // A labelled directive is shorthand for a group holding only that directive.
            if item.label.is_some() {
                let label = require_label(item, location)?;
                return Ok(NavNode::Group(NavGroup {
                    label,
                    collapsed: item.collapsed,
                    children: vec![directive.into()],
                }));
            }
            if item.collapsed.is_some() {
                return Err(invalid(
                    location,
                    "`collapsed` requires a `label` on autogenerate items",
                ));
            }
            Ok(directive.into())
        }
        _ => Err(invalid(
            location,
            "item must have exactly one of `slug`, `items` or `autogenerate`",
        )),
    }
}

fn require_label(item: &SidebarItemRaw, location: &str) -> Result<String, ConfigError> {
    match &item.label {
        Some(label) if !label.trim().is_empty() => Ok(label.clone()),
        Some(_) => Err(invalid(location, "`label` cannot be empty")),
        None => Err(invalid(location, "`label` is required")),
    }
}

fn invalid(location: &str, message: &str) -> ConfigError {
    ConfigError::Validation(format!("{location}: {message}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Deserialize)]
    struct Doc {
        sidebar: Vec<SidebarItemRaw>,
    }

    fn parse(toml_src: &str) -> Result<Vec<NavGroup>, ConfigError> {
        let doc: Doc = toml::from_str(toml_src).unwrap();
        build_sections(&doc.sidebar)
    }

    fn error_message(toml_src: &str) -> String {
        parse(toml_src).unwrap_err().to_string()
    }

    #[test]
    fn test_entry_group_and_directive() {
        let sections = parse(
            r#"
[[sidebar]]
label = "Web"
items = [
  { label = "HTTP", slug = "web/http" },
  { label = "Caching", collapsed = true, items = [{ label = "ETags", slug = "web/caching/etags" }] },
  { autogenerate = { directory = "web/patterns" } },
]
"#,
        )
        .unwrap();

        assert_eq!(
            sections,
            vec![
                NavGroup::new("Web")
                    .with_child(NavEntry::new("HTTP", "web/http"))
                    .with_child(
                        NavGroup::new("Caching")
                            .with_collapsed(true)
                            .with_child(NavEntry::new("ETags", "web/caching/etags"))
                    )
                    .with_child(AutogenerateDirective::new("web/patterns")),
            ]
        );
    }

    #[test]
    fn test_labelled_directive_becomes_group() {
        let sections = parse(
            r#"
[[sidebar]]
label = "Node.js"
items = [{ label = "Streams", collapsed = true, autogenerate = { directory = "nodejs/streams" } }]
"#,
        )
        .unwrap();

        assert_eq!(
            sections[0].children,
            vec![NavNode::Group(
                NavGroup::new("Streams")
                    .with_collapsed(true)
                    .with_child(AutogenerateDirective::new("nodejs/streams"))
            )]
        );
    }

    #[test]
    fn test_top_level_entry_rejected() {
        let msg = error_message("[[sidebar]]\nlabel = \"Intro\"\nslug = \"intro\"\n");

        assert!(msg.contains("sidebar[0]"));
        assert!(msg.contains("top-level"));
    }

    #[test]
    fn test_slug_and_items_together_rejected() {
        let msg = error_message(
            "[[sidebar]]\nlabel = \"JS\"\nitems = [{ label = \"X\", slug = \"x\", items = [] }]\n",
        );

        assert!(msg.contains("sidebar[0].items[0]"));
        assert!(msg.contains("exactly one"));
    }

    #[test]
    fn test_missing_label_rejected() {
        let msg = error_message("[[sidebar]]\nlabel = \"JS\"\nitems = [{ slug = \"x\" }]\n");

        assert!(msg.contains("`label` is required"));
    }

    #[test]
    fn test_empty_slug_rejected() {
        let msg =
            error_message("[[sidebar]]\nlabel = \"JS\"\nitems = [{ label = \"X\", slug = \" \" }]\n");

        assert!(msg.contains("`slug` cannot be empty"));
    }

    #[test]
    fn test_collapsed_on_entry_rejected() {
        let msg = error_message(
            "[[sidebar]]\nlabel = \"JS\"\nitems = [{ label = \"X\", slug = \"x\", collapsed = true }]\n",
        );

        assert!(msg.contains("only valid on groups"));
    }

    #[test]
    fn test_collapsed_on_bare_directive_rejected() {
        let msg = error_message(
            "[[sidebar]]\nlabel = \"JS\"\nitems = [{ collapsed = false, autogenerate = { directory = \"js\" } }]\n",
        );

        assert!(msg.contains("requires a `label`"));
    }

    #[test]
    fn test_nested_location_in_error() {
        let msg = error_message(
            "[[sidebar]]\nlabel = \"A\"\nitems = []\n\n[[sidebar]]\nlabel = \"B\"\nitems = [{ label = \"C\", items = [{ label = \"D\" }] }]\n",
        );

        assert!(msg.contains("sidebar[1].items[0].items[0]"), "{msg}");
    }
}
