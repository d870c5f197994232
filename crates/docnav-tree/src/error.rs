//! Validation errors with tree-position context.

use std::fmt;

/// Position of a node in the navigation tree as a sequence of labels from the root.
///
/// Nodes with an empty label are rendered as `#<position>` (1-based among
/// siblings) so that the path still identifies them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath(Vec<String>);

impl NodePath {
    /// Path of the (virtual) root that holds the top-level nodes.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Extend the path with a child segment.
    ///
    /// `index` is the zero-based sibling position, used when `label` is blank.
    #[must_use]
    pub fn child(&self, label: &str, index: usize) -> Self {
        let segment = if label.trim().is_empty() {
            format!("#{}", index + 1)
        } else {
            label.to_owned()
        };
        let mut segments = self.0.clone();
        segments.push(segment);
        Self(segments)
    }

    /// Labels from the top-level node down to this node.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" > "))
    }
}

impl<S: Into<String>> FromIterator<S> for NodePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Why a navigation node failed validation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationReason {
    /// Label is empty or whitespace.
    #[error("has an empty label")]
    EmptyLabel,
    /// Another sibling already uses this label.
    #[error("duplicates sibling label \"{label}\"")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
    },
    /// Another leaf already uses this slug.
    #[error("has duplicate slug \"{slug}\" (first defined at \"{first}\")")]
    DuplicateSlug {
        /// The repeated slug.
        slug: String,
        /// Path of the leaf that declared the slug first.
        first: NodePath,
    },
    /// Node declares more than one of `items`, `slug` and `autogenerate`.
    #[error("declares conflicting kinds: {}", .declared.join(", "))]
    ConflictingKinds {
        /// Field names that were declared together.
        declared: Vec<&'static str>,
    },
    /// Node declares none of `items`, `slug` and `autogenerate`.
    #[error("must declare one of items, slug or autogenerate")]
    MissingKind,
    /// Slug is not a well-formed relative path.
    #[error("has invalid slug \"{slug}\": {problem}")]
    InvalidSlug {
        /// The rejected slug.
        slug: String,
        /// What is wrong with it.
        problem: &'static str,
    },
    /// Autogenerate directory is empty or malformed.
    #[error("has invalid autogenerate directory \"{directory}\": {problem}")]
    InvalidDirectory {
        /// The rejected directory.
        directory: String,
        /// What is wrong with it.
        problem: &'static str,
    },
    /// No content page exists for the slug.
    #[error("references missing content \"{slug}\"")]
    MissingContent {
        /// Slug that did not resolve.
        slug: String,
    },
    /// Autogenerate directory holds no content pages.
    #[error("autogenerates from empty or missing directory \"{directory}\"")]
    DanglingDirectory {
        /// Directory that had no pages.
        directory: String,
    },
}

/// Navigation configuration error.
///
/// Identifies the offending node by its [`NodePath`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("\"{path}\" {reason}")]
pub struct ValidationError {
    /// What is wrong.
    pub reason: ValidationReason,
    /// Where in the tree.
    pub path: NodePath,
}

impl ValidationError {
    pub(crate) fn new(reason: ValidationReason, path: NodePath) -> Self {
        Self { reason, path }
    }

    /// Create an error for a missing content page.
    #[must_use]
    pub fn missing_content(slug: impl Into<String>, path: NodePath) -> Self {
        Self::new(ValidationReason::MissingContent { slug: slug.into() }, path)
    }

    /// Create an error for an autogenerate directory without pages.
    #[must_use]
    pub fn dangling_directory(directory: impl Into<String>, path: NodePath) -> Self {
        Self::new(
            ValidationReason::DanglingDirectory {
                directory: directory.into(),
            },
            path,
        )
    }
}

/// Slug lookup miss.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("no navigation entry with slug \"{slug}\"")]
pub struct NotFound {
    /// Slug that was looked up.
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_path_display() {
        let path = NodePath::root()
            .child("Package Manager", 1)
            .child("Installing Packages", 1);

        assert_eq!(path.to_string(), "Package Manager > Installing Packages");
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_node_path_blank_label_uses_position() {
        let path = NodePath::root().child("Roblox", 3).child("  ", 0);

        assert_eq!(path.to_string(), "Roblox > #1");
    }

    #[test]
    fn test_duplicate_slug_message() {
        let err = ValidationError::new(
            ValidationReason::DuplicateSlug {
                slug: "packages/2-install".to_owned(),
                first: ["Package Manager", "Initialize Project"].into_iter().collect(),
            },
            ["Package Manager", "Installing Packages"].into_iter().collect(),
        );

        assert_eq!(
            err.to_string(),
            "\"Package Manager > Installing Packages\" has duplicate slug \"packages/2-install\" \
             (first defined at \"Package Manager > Initialize Project\")"
        );
    }

    #[test]
    fn test_conflicting_kinds_message() {
        let err = ValidationError::new(
            ValidationReason::ConflictingKinds {
                declared: vec!["items", "slug"],
            },
            ["Roblox"].into_iter().collect(),
        );

        assert_eq!(
            err.to_string(),
            "\"Roblox\" declares conflicting kinds: items, slug"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = NotFound {
            slug: "roblox/3-missing".to_owned(),
        };

        assert_eq!(
            err.to_string(),
            "no navigation entry with slug \"roblox/3-missing\""
        );
    }
}
