// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: element slots, parent/child links, reparenting.

use alloc::vec::Vec;

use crate::error::TreeError;
use crate::transform::Transform;
use crate::traverse::{Ancestors, DepthFirst};
use crate::types::{ElementId, LocalTransform};

/// Retained tree of elements, each owning one [`Transform`].
///
/// Unlike a batched scene, there is no commit step: every structural change
/// and every transform setter resolves the affected subtree before returning.
///
/// ## Example
///
/// ```rust
/// use kurbo::Vec2;
/// use understory_element_tree::{LocalTransform, Tree};
///
/// let mut tree = Tree::new();
/// let window = tree.insert(None, LocalTransform::sized(Vec2::new(800.0, 600.0)))?;
///
/// // A 100x100 box centered in the window.
/// let centered = tree.insert(
///     Some(window),
///     LocalTransform::sized(Vec2::new(100.0, 100.0))
///         .with_anchor(Vec2::new(0.5, 0.5))
///         .with_offset(Vec2::new(0.5, 0.5)),
/// )?;
/// assert_eq!(
///     tree.transform(centered).unwrap().world_position(),
///     Vec2::new(350.0, 250.0)
/// );
///
/// // Resizing the window keeps the box centered.
/// tree.set_size(window, Vec2::new(400.0, 400.0));
/// assert_eq!(
///     tree.transform(centered).unwrap().world_position(),
///     Vec2::new(150.0, 150.0)
/// );
/// # Ok::<(), understory_element_tree::TreeError>(())
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) transform: Transform,
}

impl Node {
    fn new(generation: u32, transform: Transform) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            transform,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    ///
    /// The element's transform is built from `local` and resolved against its
    /// parent before this returns.
    pub fn insert(
        &mut self,
        parent: Option<ElementId>,
        local: LocalTransform,
    ) -> Result<ElementId, TreeError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(TreeError::StaleElement(p));
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(None);
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        self.nodes[id.idx()] = Some(Node::new(generation, Transform::attached(id, local)));
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        self.update_transforms(id);
        Ok(id)
    }

    /// Remove an element and its whole subtree.
    ///
    /// Identifiers of removed elements become stale; operations on them are
    /// no-ops or report [`TreeError::StaleElement`].
    pub fn remove(&mut self, id: ElementId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let doomed: Vec<ElementId> = self.depth_first(id).collect();
        log::trace!("removing {id:?} and {} descendants", doomed.len() - 1);
        for e in doomed {
            self.nodes[e.idx()] = None;
            self.free_list.push(e.idx());
        }
    }

    /// Attach `id` under `new_parent` (or make it a root if `None`).
    ///
    /// The element is appended after its new siblings and its subtree is
    /// re-resolved against the new ancestor chain. Assigning the current
    /// parent again does nothing.
    ///
    /// # Errors
    ///
    /// - [`TreeError::CircularReference`] if `new_parent` is `id` itself or
    ///   one of its descendants. Nothing is changed.
    /// - [`TreeError::StaleElement`] if either identifier is stale.
    pub fn set_parent(
        &mut self,
        id: ElementId,
        new_parent: Option<ElementId>,
    ) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::StaleElement(id));
        }
        if let Some(p) = new_parent
            && !self.is_alive(p)
        {
            return Err(TreeError::StaleElement(p));
        }
        let old_parent = self.node(id).parent;
        if old_parent == new_parent {
            return Ok(());
        }
        if let Some(p) = new_parent
            && (p == id || self.ancestors(p).any(|a| a == id))
        {
            log::debug!("rejected reparenting {id:?} under its descendant {p:?}");
            return Err(TreeError::CircularReference {
                element: id,
                parent: p,
            });
        }

        if let Some(old) = old_parent {
            self.unlink_parent(id, old);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        log::trace!("reparented {id:?} from {old_parent:?} to {new_parent:?}");
        self.update_transforms(id);
        Ok(())
    }

    /// Append `child` to the children of `parent`.
    ///
    /// Shorthand for `set_parent(child, Some(parent))`.
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), TreeError> {
        self.set_parent(child, Some(parent))
    }

    /// Detach `child` if, and only if, its parent is `parent`.
    ///
    /// Returns whether `child` was detached.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        if self.parent_of(child) != Some(parent) {
            return false;
        }
        self.set_parent(child, None).is_ok()
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// An `ElementId` is live if its slot exists and its generation matches
    /// the generation currently stored in that slot.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Whether the tree has no live elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The transform of a live element.
    pub fn transform(&self, id: ElementId) -> Option<&Transform> {
        self.node_opt(id).map(|n| &n.transform)
    }

    /// Returns the parent of an element, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: ElementId) -> Option<ElementId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Get the children of an element in append order, or an empty slice if
    /// the element is stale.
    pub fn children_of(&self, id: ElementId) -> &[ElementId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Iterate live elements without a parent, in slot order.
    pub fn roots(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| match n {
                Some(n) if n.parent.is_none() =>
                {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "ElementId uses 32-bit indices by design."
                    )]
                    Some(ElementId::new(i as u32, n.generation))
                }
                _ => None,
            })
    }

    /// Iterate the ancestors of `id`, from its parent up to its root.
    pub fn ancestors(&self, id: ElementId) -> Ancestors<'_> {
        Ancestors::new(self, id)
    }

    /// Iterate the subtree rooted at `id` in pre-order, `id` first.
    ///
    /// Siblings are visited in append order, which is also the order in
    /// which cascades resolve them.
    pub fn depth_first(&self, id: ElementId) -> DepthFirst<'_> {
        DepthFirst::new(self, id)
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: ElementId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling ElementId")
    }

    /// Access a node mutably; panics if `id` is stale.
    pub(crate) fn node_mut(&mut self, id: ElementId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling ElementId")
    }

    fn node_opt(&self, id: ElementId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn node_opt_mut(&mut self, id: ElementId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn transform_opt_mut(&mut self, id: ElementId) -> Option<&mut Transform> {
        self.node_opt_mut(id).map(|n| &mut n.transform)
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: ElementId, parent: ElementId) {
        let siblings = &mut self.node_mut(parent).children;
        if let Some(pos) = siblings.iter().position(|c| *c == id) {
            siblings.remove(pos);
        }
        self.node_mut(id).parent = None;
    }
}
