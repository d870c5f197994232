//! Sidebar navigation tree for documentation sites.
//!
//! This crate provides:
//! - [`NodeDefinition`]: the raw sidebar literal as authors write it
//! - [`NavigationTree`]: the validated, immutable tree built from it
//! - [`ValidationError`]: path-qualified configuration errors
//!
//! # Quick Start
//!
//! ```
//! use docnav_tree::NavigationTree;
//!
//! let json = r#"[
//!     { "label": "Getting Started", "items": [
//!         { "label": "Installation", "slug": "getting-started/1-installation" }
//!     ] },
//!     { "label": "API Reference", "autogenerate": { "directory": "api-reference" } }
//! ]"#;
//!
//! let tree: NavigationTree = serde_json::from_str(json).unwrap();
//!
//! let entries: Vec<_> = tree.flatten().collect();
//! assert_eq!(entries.len(), 1);
//! assert_eq!(entries[0].label, "Installation");
//! assert_eq!(entries[0].depth, 1);
//! ```

mod definition;
mod error;
mod flatten;
mod tree;

pub use definition::{AutogenerateDefinition, NodeDefinition};
pub use error::{NodePath, NotFound, ValidationError, ValidationReason};
pub use flatten::{FlatEntry, Flatten, Visit, Walk};
pub use tree::{NavigationNode, NavigationTree, NodeKind};
