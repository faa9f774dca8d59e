//! Navigation tree model and resolver for Sidebar.
//!
//! This crate provides:
//! - The declarative sidebar model ([`NavGroup`], [`NavNode`], [`NavEntry`],
//!   [`AutogenerateDirective`]) and the [`ContentDocument`] input type
//! - [`resolve`]: the pure function turning configuration plus discovered
//!   documents into a [`ResolvedTree`]
//! - [`ResolveError`] and [`ResolveWarning`] diagnostics with configuration
//!   [`Location`]s
//!
//! # Quick Start
//!
//! ```
//! use sidebar_nav::{AutogenerateDirective, ContentDocument, NavEntry, NavGroup, resolve};
//!
//! let config = vec![
//!     NavGroup::new("JavaScript")
//!         .with_child(NavEntry::new("Introduction", "javascript/intro"))
//!         .with_child(AutogenerateDirective::new("javascript/notes")),
//! ];
//! let documents = vec![
//!     ContentDocument::new("javascript/intro.md", "Intro"),
//!     ContentDocument::new("javascript/notes/closures.md", "Closures"),
//! ];
//!
//! let resolution = resolve(&config, &documents)?;
//! assert_eq!(resolution.tree.entry_count(), 2);
//! assert!(resolution.warnings.is_empty());
//! # Ok::<(), sidebar_nav::ResolveError>(())
//! ```

mod error;
mod index;
mod model;
mod resolver;
mod tree;

pub use error::{Location, ResolveError, ResolveWarning};
pub use model::{
    AutogenerateDirective, ContentDocument, NavEntry, NavGroup, NavNode, normalize_path, slug_of,
};
pub use resolver::{Resolution, resolve};
pub use tree::{ResolvedGroup, ResolvedNode, ResolvedTree};
