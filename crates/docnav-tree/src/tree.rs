//! Validated navigation tree.
//!
//! # Architecture
//!
//! Nodes are stored as an owned recursive tree in sibling order. A side
//! index maps each leaf slug to its position (child indices from the root),
//! giving O(d) slug resolution where d is the leaf depth.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize, Serializer};

use crate::definition::{AutogenerateDefinition, NodeDefinition};
use crate::error::{NodePath, NotFound, ValidationError, ValidationReason};
use crate::flatten::{Flatten, Walk};

/// Validated navigation node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationNode {
    /// Display label, unique among siblings.
    pub label: String,
    /// What the node points at.
    pub kind: NodeKind,
}

/// Kind of a navigation node. A node is exactly one of these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Section with explicit children.
    Group {
        /// Ordered children.
        children: Vec<NavigationNode>,
    },
    /// Link to a content page.
    Leaf {
        /// Tree-wide unique slug.
        slug: String,
    },
    /// Section whose children are derived from a content directory.
    Autogenerate {
        /// Directory relative to the content root.
        directory: String,
    },
}

impl NavigationNode {
    /// Slug if this node is a leaf.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { slug } => Some(slug),
            _ => None,
        }
    }

    /// Children if this node is a group.
    #[must_use]
    pub fn children(&self) -> &[NavigationNode] {
        match &self.kind {
            NodeKind::Group { children } => children,
            _ => &[],
        }
    }

    /// Autogenerate directory if this node has one.
    #[must_use]
    pub fn autogenerate_directory(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Autogenerate { directory } => Some(directory),
            _ => None,
        }
    }

    /// Convert back to the raw definition shape.
    #[must_use]
    pub fn to_definition(&self) -> NodeDefinition {
        let label = self.label.clone();
        match &self.kind {
            NodeKind::Group { children } => NodeDefinition {
                label,
                items: Some(children.iter().map(Self::to_definition).collect()),
                ..NodeDefinition::default()
            },
            NodeKind::Leaf { slug } => NodeDefinition {
                label,
                slug: Some(slug.clone()),
                ..NodeDefinition::default()
            },
            NodeKind::Autogenerate { directory } => NodeDefinition {
                label,
                autogenerate: Some(AutogenerateDefinition {
                    directory: directory.clone(),
                }),
                ..NodeDefinition::default()
            },
        }
    }
}

/// Validated, immutable sidebar tree.
///
/// Built once from a [`NodeDefinition`] list; read-only afterwards.
///
/// # Example
///
/// ```
/// use docnav_tree::{NavigationTree, NodeDefinition};
///
/// let tree = NavigationTree::build(vec![NodeDefinition::group(
///     "Roblox",
///     vec![NodeDefinition::leaf("Introduction", "roblox/1-introduction")],
/// )])
/// .unwrap();
///
/// let first = tree.flatten().next().unwrap();
/// assert_eq!(first.slug, "roblox/1-introduction");
/// assert_eq!(first.depth, 1);
/// assert_eq!(tree.resolve("roblox/1-introduction").unwrap().label, "Introduction");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<NodeDefinition>")]
pub struct NavigationTree {
    roots: Vec<NavigationNode>,
    slug_index: HashMap<String, Vec<usize>>,
}

impl NavigationTree {
    /// Validate a definition and build the tree.
    ///
    /// Checks, in document order:
    /// - every label is non-empty and unique among its siblings,
    /// - every node declares exactly one of `items`, `slug`, `autogenerate`,
    /// - every slug is well-formed and unique across the whole tree,
    /// - every autogenerate directory is well-formed.
    ///
    /// The first violation found is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] naming the offending node's path.
    pub fn build(definition: Vec<NodeDefinition>) -> Result<Self, ValidationError> {
        let mut builder = TreeBuilder::default();
        let roots = builder.build_level(definition, &NodePath::root(), &[])?;

        tracing::debug!(
            top_level = roots.len(),
            leaves = builder.slug_index.len(),
            "Navigation tree built"
        );

        Ok(Self {
            roots,
            slug_index: builder
                .slug_index
                .into_iter()
                .map(|(slug, (position, _))| (slug, position))
                .collect(),
        })
    }

    /// Top-level nodes in sidebar order.
    #[must_use]
    pub fn roots(&self) -> &[NavigationNode] {
        &self.roots
    }

    /// Number of top-level nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Whether the sidebar has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of leaves (slug entries) in the whole tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.slug_index.len()
    }

    /// Pre-order traversal of leaves.
    ///
    /// Lazy and restartable: each call starts a fresh traversal.
    #[must_use]
    pub fn flatten(&self) -> Flatten<'_> {
        Flatten::new(self.walk())
    }

    /// Pre-order traversal of every node with its depth.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.roots)
    }

    /// Autogenerate nodes in document order, with their depth.
    pub fn autogenerated(&self) -> impl Iterator<Item = (&NavigationNode, usize)> {
        self.walk()
            .filter(|visit| visit.node.autogenerate_directory().is_some())
            .map(|visit| (visit.node, visit.depth))
    }

    /// Look up a leaf by slug.
    ///
    /// # Errors
    ///
    /// Returns [`NotFound`] if no leaf has this slug.
    pub fn resolve(&self, slug: &str) -> Result<&NavigationNode, NotFound> {
        let not_found = || NotFound {
            slug: slug.to_owned(),
        };
        let position = self.slug_index.get(slug).ok_or_else(not_found)?;
        self.node_at(position).ok_or_else(not_found)
    }

    /// Whether a leaf with this slug exists.
    #[must_use]
    pub fn contains(&self, slug: &str) -> bool {
        self.slug_index.contains_key(slug)
    }

    /// Label path from the top level down to the leaf with this slug.
    #[must_use]
    pub fn breadcrumbs(&self, slug: &str) -> Option<NodePath> {
        let position = self.slug_index.get(slug)?;
        let mut siblings = self.roots.as_slice();
        let mut labels = Vec::with_capacity(position.len());
        for &i in position {
            let node = siblings.get(i)?;
            labels.push(node.label.as_str());
            siblings = node.children();
        }
        Some(labels.into_iter().collect())
    }

    /// Convert back to the raw definition shape.
    #[must_use]
    pub fn to_definition(&self) -> Vec<NodeDefinition> {
        self.roots.iter().map(NavigationNode::to_definition).collect()
    }

    fn node_at(&self, position: &[usize]) -> Option<&NavigationNode> {
        let (&first, rest) = position.split_first()?;
        let mut node = self.roots.get(first)?;
        for &i in rest {
            node = node.children().get(i)?;
        }
        Some(node)
    }
}

impl TryFrom<Vec<NodeDefinition>> for NavigationTree {
    type Error = ValidationError;

    fn try_from(definition: Vec<NodeDefinition>) -> Result<Self, Self::Error> {
        Self::build(definition)
    }
}

impl Serialize for NavigationTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_definition().serialize(serializer)
    }
}

/// Accumulates the slug index while validating.
#[derive(Default)]
struct TreeBuilder {
    /// Slug -> (position, path of the declaring leaf).
    slug_index: HashMap<String, (Vec<usize>, NodePath)>,
}

impl TreeBuilder {
    fn build_level(
        &mut self,
        definitions: Vec<NodeDefinition>,
        parent: &NodePath,
        parent_position: &[usize],
    ) -> Result<Vec<NavigationNode>, ValidationError> {
        let mut labels = HashSet::with_capacity(definitions.len());
        let mut nodes = Vec::with_capacity(definitions.len());

        for (index, definition) in definitions.into_iter().enumerate() {
            let path = parent.child(&definition.label, index);

            if definition.label.trim().is_empty() {
                return Err(ValidationError::new(ValidationReason::EmptyLabel, path));
            }
            if !labels.insert(definition.label.clone()) {
                return Err(ValidationError::new(
                    ValidationReason::DuplicateLabel {
                        label: definition.label,
                    },
                    path,
                ));
            }

            let mut position = parent_position.to_vec();
            position.push(index);

            let kind = match (definition.items, definition.slug, definition.autogenerate) {
                (Some(items), None, None) => NodeKind::Group {
                    children: self.build_level(items, &path, &position)?,
                },
                (None, Some(slug), None) => {
                    check_slug(&slug, &path)?;
                    self.register_slug(&slug, position, &path)?;
                    NodeKind::Leaf { slug }
                }
                (None, None, Some(auto)) => {
                    check_directory(&auto.directory, &path)?;
                    NodeKind::Autogenerate {
                        directory: auto.directory,
                    }
                }
                (None, None, None) => {
                    return Err(ValidationError::new(ValidationReason::MissingKind, path));
                }
                (items, slug, auto) => {
                    let declared = [
                        ("items", items.is_some()),
                        ("slug", slug.is_some()),
                        ("autogenerate", auto.is_some()),
                    ]
                    .into_iter()
                    .filter_map(|(name, present)| present.then_some(name))
                    .collect();
                    return Err(ValidationError::new(
                        ValidationReason::ConflictingKinds { declared },
                        path,
                    ));
                }
            };

            nodes.push(NavigationNode {
                label: definition.label,
                kind,
            });
        }

        Ok(nodes)
    }

    fn register_slug(
        &mut self,
        slug: &str,
        position: Vec<usize>,
        path: &NodePath,
    ) -> Result<(), ValidationError> {
        if let Some((_, first)) = self.slug_index.get(slug) {
            return Err(ValidationError::new(
                ValidationReason::DuplicateSlug {
                    slug: slug.to_owned(),
                    first: first.clone(),
                },
                path.clone(),
            ));
        }
        self.slug_index
            .insert(slug.to_owned(), (position, path.clone()));
        Ok(())
    }
}

/// Problem with a relative content path, if any.
fn relative_path_problem(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("must not be empty");
    }
    if value.starts_with('/') || value.ends_with('/') {
        return Some("must not start or end with '/'");
    }
    if value.chars().any(char::is_whitespace) {
        return Some("must not contain whitespace");
    }
    if value
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Some("must not contain empty, '.' or '..' segments");
    }
    None
}

fn check_slug(slug: &str, path: &NodePath) -> Result<(), ValidationError> {
    match relative_path_problem(slug) {
        Some(problem) => Err(ValidationError::new(
            ValidationReason::InvalidSlug {
                slug: slug.to_owned(),
                problem,
            },
            path.clone(),
        )),
        None => Ok(()),
    }
}

fn check_directory(directory: &str, path: &NodePath) -> Result<(), ValidationError> {
    match relative_path_problem(directory) {
        Some(problem) => Err(ValidationError::new(
            ValidationReason::InvalidDirectory {
                directory: directory.to_owned(),
                problem,
            },
            path.clone(),
        )),
        None => Ok(()),
    }
}
