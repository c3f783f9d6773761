// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree traversal utilities.

use alloc::{vec, vec::Vec};

use crate::tree::Tree;
use crate::types::ElementId;

/// An iterator over the ancestors of an element, nearest first.
///
/// Created by [`Tree::ancestors`].
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a Tree,
    current: Option<ElementId>,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(tree: &'a Tree, id: ElementId) -> Self {
        Self {
            tree,
            current: tree.parent_of(id),
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let id = self.current?;
        self.current = self.tree.parent_of(id);
        Some(id)
    }
}

/// A pre-order iterator over a subtree, children in append order.
///
/// Created by [`Tree::depth_first`]. The subtree root is yielded first.
#[derive(Debug)]
pub struct DepthFirst<'a> {
    tree: &'a Tree,
    stack: Vec<ElementId>,
}

impl<'a> DepthFirst<'a> {
    pub(crate) fn new(tree: &'a Tree, root: ElementId) -> Self {
        let stack = if tree.is_alive(root) {
            vec![root]
        } else {
            Vec::new()
        };
        Self { tree, stack }
    }
}

impl Iterator for DepthFirst<'_> {
    type Item = ElementId;

    fn next(&mut self) -> Option<ElementId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children_of(id).iter().rev().copied());
        Some(id)
    }
}
