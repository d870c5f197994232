//! Lazy pre-order traversals.
//!
//! Both iterators hold a stack of sibling iterators and borrow the tree, so
//! they allocate at most one stack slot per nesting level. Cloning an
//! iterator forks the traversal at its current position.

use std::iter::FusedIterator;
use std::slice;

use serde::Serialize;

use crate::tree::{NavigationNode, NodeKind};

/// Node visited during a [`Walk`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visit<'a> {
    /// The node.
    pub node: &'a NavigationNode,
    /// Nesting level; top-level nodes are at depth 0.
    pub depth: usize,
}

/// Pre-order, depth-first traversal of every node.
#[derive(Clone, Debug)]
pub struct Walk<'a> {
    stack: Vec<slice::Iter<'a, NavigationNode>>,
}

impl<'a> Walk<'a> {
    pub(crate) fn new(roots: &'a [NavigationNode]) -> Self {
        Self {
            stack: vec![roots.iter()],
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let Some(node) = self.stack.last_mut()?.next() else {
                self.stack.pop();
                continue;
            };
            if let NodeKind::Group { children } = &node.kind {
                self.stack.push(children.iter());
            }
            return Some(Visit { node, depth });
        }
    }
}

impl FusedIterator for Walk<'_> {}

/// Leaf entry produced by [`Flatten`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FlatEntry<'a> {
    /// Display label.
    pub label: &'a str,
    /// Content page slug.
    pub slug: &'a str,
    /// Nesting level; top-level leaves are at depth 0.
    pub depth: usize,
}

/// Pre-order traversal of leaves in sidebar order.
///
/// Groups and autogenerate nodes are descended into or skipped; only
/// nodes with a slug are yielded.
#[derive(Clone, Debug)]
pub struct Flatten<'a> {
    walk: Walk<'a>,
}

impl<'a> Flatten<'a> {
    pub(crate) fn new(walk: Walk<'a>) -> Self {
        Self { walk }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = FlatEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.find_map(|visit| {
            visit.node.slug().map(|slug| FlatEntry {
                label: &visit.node.label,
                slug,
                depth: visit.depth,
            })
        })
    }
}

impl FusedIterator for Flatten<'_> {}
