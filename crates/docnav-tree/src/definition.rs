//! Raw sidebar definition as written by authors.
//!
//! Mirrors the literal shape the site generator consumes:
//!
//! ```json
//! { "label": "Getting Started", "items": [ { "label": "Installation", "slug": "getting-started/1-installation" } ] }
//! { "label": "API Reference", "autogenerate": { "directory": "api-reference" } }
//! ```
//!
//! Every kind field is optional here. Kind exclusivity and label rules are
//! checked by [`NavigationTree::build`](crate::NavigationTree::build), which
//! reports a path-qualified [`ValidationError`](crate::ValidationError).

use serde::{Deserialize, Serialize};

/// One sidebar entry before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDefinition {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Content page slug (leaf).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Explicit children (group).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NodeDefinition>>,
    /// Directory-derived children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autogenerate: Option<AutogenerateDefinition>,
}

impl NodeDefinition {
    /// Leaf entry pointing at a content page.
    #[must_use]
    pub fn leaf(label: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            slug: Some(slug.into()),
            ..Self::default()
        }
    }

    /// Group entry with explicit children.
    #[must_use]
    pub fn group(label: impl Into<String>, items: Vec<NodeDefinition>) -> Self {
        Self {
            label: label.into(),
            items: Some(items),
            ..Self::default()
        }
    }

    /// Entry whose children come from a content directory.
    #[must_use]
    pub fn autogenerate(label: impl Into<String>, directory: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            autogenerate: Some(AutogenerateDefinition {
                directory: directory.into(),
            }),
            ..Self::default()
        }
    }
}

/// `autogenerate` block of a sidebar entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutogenerateDefinition {
    /// Content directory, relative to the content root.
    pub directory: String,
}
