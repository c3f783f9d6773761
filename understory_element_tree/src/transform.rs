// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element transform: local inputs, resolved geometry, and the cascades
//! that keep them consistent across the tree.

use alloc::{vec, vec::Vec};
use kurbo::{Affine, Point, Rect, Vec2};

use crate::error::TreeError;
use crate::tree::Tree;
use crate::types::{ElementId, LocalTransform};
use crate::util::{contains_inclusive, mul, rect_from_origin_size};

/// Geometry of an element, resolved against its ancestors.
///
/// A `Transform` is owned by exactly one element slot of a [`Tree`]. Its local
/// inputs are changed through the `Tree::set_*` methods, each of which
/// re-resolves the element and cascades into its descendants before
/// returning, so the resolved values read here are never stale:
///
/// - `size[a] = parent_size[a] * parent_scale[a] + local_size_offset[a]` when
///   `parent_scale[a] != 0`, else `size[a] = local_size_offset[a]`.
/// - `pivot_position = parent_size * anchor_position - size * offset_position + local_position`.
/// - `world_position = parent_world_position + pivot_position`.
/// - `world_rotation = parent_world_rotation + local_rotation`.
///
/// Roots resolve against a zero parent.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    element: Option<ElementId>,

    local_size_offset: Vec2,
    parent_scale: Vec2,
    size: Vec2,

    local_position: Vec2,
    anchor_position: Vec2,
    offset_position: Vec2,
    pivot_position: Vec2,
    world_position: Vec2,

    local_rotation: f64,
    world_rotation: f64,

    rotation_offset: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_local(LocalTransform::default())
    }
}

/// Resolved values of a parent, or zeros for roots.
#[derive(Clone, Copy, Default)]
pub(crate) struct ParentFrame {
    size: Vec2,
    position: Vec2,
    rotation: f64,
}

impl Transform {
    /// Create a detached transform from authoring inputs.
    ///
    /// Resolved values start at zero (apart from `size`, which starts at the
    /// local size offset) and are computed once the transform is installed
    /// on an element.
    pub fn from_local(local: LocalTransform) -> Self {
        Self {
            element: None,
            local_size_offset: local.local_size_offset,
            parent_scale: local.parent_scale,
            size: local.local_size_offset,
            local_position: local.local_position,
            anchor_position: local.anchor_position,
            offset_position: local.offset_position,
            pivot_position: Vec2::ZERO,
            world_position: Vec2::ZERO,
            local_rotation: local.local_rotation,
            world_rotation: 0.0,
            rotation_offset: local.rotation_offset,
        }
    }

    pub(crate) fn attached(element: ElementId, local: LocalTransform) -> Self {
        Self {
            element: Some(element),
            ..Self::from_local(local)
        }
    }

    /// The authoring inputs of this transform.
    pub fn local(&self) -> LocalTransform {
        LocalTransform {
            local_size_offset: self.local_size_offset,
            parent_scale: self.parent_scale,
            local_position: self.local_position,
            anchor_position: self.anchor_position,
            offset_position: self.offset_position,
            local_rotation: self.local_rotation,
            rotation_offset: self.rotation_offset,
        }
    }

    /// The element owning this transform, or `None` if it is detached.
    ///
    /// This is an association, not ownership: the element's slot owns the
    /// transform.
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }

    /// Resolved size.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Size added on top of the parent-scaled size.
    pub fn local_size_offset(&self) -> Vec2 {
        self.local_size_offset
    }

    /// Per-axis factor of the parent's size tracked by this element.
    pub fn parent_scale(&self) -> Vec2 {
        self.parent_scale
    }

    /// Whether the width tracks the parent's width.
    pub fn scale_width(&self) -> bool {
        self.parent_scale.x != 0.0
    }

    /// Whether the height tracks the parent's height.
    pub fn scale_height(&self) -> bool {
        self.parent_scale.y != 0.0
    }

    /// Translation added after anchoring.
    pub fn local_position(&self) -> Vec2 {
        self.local_position
    }

    /// Fraction of the parent's size used as origin.
    pub fn anchor_position(&self) -> Vec2 {
        self.anchor_position
    }

    /// Fraction of this element's size placed at the anchor.
    pub fn offset_position(&self) -> Vec2 {
        self.offset_position
    }

    /// Resolved placement relative to the parent's world position.
    pub fn pivot_position(&self) -> Vec2 {
        self.pivot_position
    }

    /// Resolved placement in world space.
    pub fn world_position(&self) -> Vec2 {
        self.world_position
    }

    /// Rotation relative to the parent, in degrees.
    pub fn local_rotation(&self) -> f64 {
        self.local_rotation
    }

    /// Resolved rotation in degrees.
    pub fn world_rotation(&self) -> f64 {
        self.world_rotation
    }

    /// Fraction of the size used as rotation origin when rendering.
    pub fn rotation_offset(&self) -> Vec2 {
        self.rotation_offset
    }

    /// Point the renderer rotates about: `pivot_position + size * rotation_offset`.
    pub fn rotation_origin(&self) -> Vec2 {
        self.pivot_position + mul(self.size, self.rotation_offset)
    }

    /// Placement for a drawing surface in the parent's drawing space.
    ///
    /// Rotates by [`world_rotation`](Self::world_rotation) degrees about the
    /// [`rotation_origin`](Self::rotation_origin), after translating content
    /// by the pivot position.
    pub fn canvas_transform(&self) -> Affine {
        Affine::rotate_about(
            self.world_rotation.to_radians(),
            self.rotation_origin().to_point(),
        ) * Affine::translate(self.pivot_position)
    }

    /// Axis-aligned box from the pivot to `pivot + size`.
    pub fn bounds(&self) -> Rect {
        rect_from_origin_size(self.pivot_position, self.size)
    }

    /// Axis-aligned box from the world position to `world_position + size`.
    pub fn world_bounds(&self) -> Rect {
        rect_from_origin_size(self.world_position, self.size)
    }

    /// Whether `pt` lies within [`bounds`](Self::bounds), edges included.
    ///
    /// Rotation is ignored.
    pub fn contains_point(&self, pt: Point) -> bool {
        contains_inclusive(self.bounds(), pt)
    }

    fn anchored(&self, parent_size: Vec2) -> Vec2 {
        mul(parent_size, self.anchor_position) - mul(self.size, self.offset_position)
    }

    pub(crate) fn frame(&self) -> ParentFrame {
        ParentFrame {
            size: self.size,
            position: self.world_position,
            rotation: self.world_rotation,
        }
    }

    pub(crate) fn detach(&mut self) {
        self.element = None;
    }

    pub(crate) fn attach(&mut self, element: ElementId) {
        self.element = Some(element);
    }

    fn resolve_size(&mut self, parent: &ParentFrame) {
        self.size = Vec2::new(
            scaled_axis(parent.size.x, self.parent_scale.x, self.local_size_offset.x),
            scaled_axis(parent.size.y, self.parent_scale.y, self.local_size_offset.y),
        );
    }

    fn resolve_position(&mut self, parent: &ParentFrame) {
        self.pivot_position = self.anchored(parent.size) + self.local_position;
        self.world_position = parent.position + self.pivot_position;
    }

    fn resolve_rotation(&mut self, parent: &ParentFrame) {
        self.world_rotation = parent.rotation + self.local_rotation;
    }

    fn resolve_all(&mut self, parent: &ParentFrame) {
        self.resolve_size(parent);
        self.resolve_position(parent);
        self.resolve_rotation(parent);
    }
}

fn scaled_axis(parent: f64, scale: f64, offset: f64) -> f64 {
    if scale != 0.0 {
        parent * scale + offset
    } else {
        offset
    }
}

/// Local offset that makes a scaled axis resolve to `size`.
fn back_solve_axis(size: f64, parent: f64, scale: f64) -> f64 {
    if scale != 0.0 {
        size - parent * scale
    } else {
        size
    }
}

impl Tree {
    /// Resolve every element on `stack` and then its descendants, parents
    /// strictly before children.
    fn cascade(
        &mut self,
        mut stack: Vec<ElementId>,
        resolve: fn(&mut Transform, &ParentFrame),
    ) {
        while let Some(id) = stack.pop() {
            let frame = self.parent_frame(id);
            let node = self.node_mut(id);
            resolve(&mut node.transform, &frame);
            // Reversed so children are visited in the order they were appended.
            stack.extend(node.children.iter().rev().copied());
        }
    }

    fn cascade_children(&mut self, id: ElementId, resolve: fn(&mut Transform, &ParentFrame)) {
        let stack = self.node(id).children.iter().rev().copied().collect();
        self.cascade(stack, resolve);
    }

    pub(crate) fn parent_frame(&self, id: ElementId) -> ParentFrame {
        match self.node(id).parent {
            Some(parent) => self.node(parent).transform.frame(),
            None => ParentFrame::default(),
        }
    }

    /// Recompute the size of `id` and of every descendant.
    pub fn update_size(&mut self, id: ElementId) {
        if self.is_alive(id) {
            self.cascade(vec![id], Transform::resolve_size);
        }
    }

    /// Recompute pivot and world position of `id` and of every descendant.
    pub fn update_position(&mut self, id: ElementId) {
        if self.is_alive(id) {
            self.cascade(vec![id], Transform::resolve_position);
        }
    }

    /// Recompute the world rotation of `id` and of every descendant.
    pub fn update_rotation(&mut self, id: ElementId) {
        if self.is_alive(id) {
            self.cascade(vec![id], Transform::resolve_rotation);
        }
    }

    /// Recompute size, position and rotation of `id` and of every descendant
    /// in a single pass.
    pub fn update_transforms(&mut self, id: ElementId) {
        if self.is_alive(id) {
            self.cascade(vec![id], Transform::resolve_all);
        }
    }

    // --- size ---

    /// Set the per-axis factor of the parent's size that `id` tracks.
    ///
    /// Re-resolves size, then position (the offset term depends on size).
    pub fn set_parent_scale(&mut self, id: ElementId, scale: Vec2) {
        let Some(t) = self.transform_opt_mut(id) else {
            return;
        };
        t.parent_scale = scale;
        self.update_size(id);
        self.update_position(id);
    }

    /// Track (`1.0`) or stop tracking (`0.0`) the parent's width.
    pub fn set_scale_width(&mut self, id: ElementId, scale: bool) {
        if let Some(t) = self.transform(id) {
            let y = t.parent_scale.y;
            self.set_parent_scale(id, Vec2::new(if scale { 1.0 } else { 0.0 }, y));
        }
    }

    /// Track (`1.0`) or stop tracking (`0.0`) the parent's height.
    pub fn set_scale_height(&mut self, id: ElementId, scale: bool) {
        if let Some(t) = self.transform(id) {
            let x = t.parent_scale.x;
            self.set_parent_scale(id, Vec2::new(x, if scale { 1.0 } else { 0.0 }));
        }
    }

    /// Set the size added on top of the parent-scaled size.
    pub fn set_local_size_offset(&mut self, id: ElementId, offset: Vec2) {
        let Some(t) = self.transform_opt_mut(id) else {
            return;
        };
        t.local_size_offset = offset;
        self.update_size(id);
        self.update_position(id);
    }

    /// Make `id` resolve to exactly `size`.
    ///
    /// The local size offset is solved from the parent's current size: on
    /// axes tracking the parent it becomes `size - parent_size * scale`, on
    /// the others it becomes `size`. Descendant sizes and the position of
    /// `id` and its subtree are then re-resolved.
    pub fn set_size(&mut self, id: ElementId, size: Vec2) {
        if !self.is_alive(id) {
            return;
        }
        let parent = self.parent_frame(id);
        let t = &mut self.node_mut(id).transform;
        t.local_size_offset = Vec2::new(
            back_solve_axis(size.x, parent.size.x, t.parent_scale.x),
            back_solve_axis(size.y, parent.size.y, t.parent_scale.y),
        );
        t.size = size;
        self.cascade_children(id, Transform::resolve_size);
        self.update_position(id);
    }

    // --- position ---

    /// Set the translation added after anchoring.
    pub fn set_local_position(&mut self, id: ElementId, position: Vec2) {
        let Some(t) = self.transform_opt_mut(id) else {
            return;
        };
        t.local_position = position;
        self.update_position(id);
    }

    /// Set the fraction of the parent's size used as origin.
    pub fn set_anchor_position(&mut self, id: ElementId, anchor: Vec2) {
        let Some(t) = self.transform_opt_mut(id) else {
            return;
        };
        t.anchor_position = anchor;
        self.update_position(id);
    }

    /// Set the fraction of the element's own size placed at the anchor.
    pub fn set_offset_position(&mut self, id: ElementId, offset: Vec2) {
        let Some(t) = self.transform_opt_mut(id) else {
            return;
        };
        t.offset_position = offset;
        self.update_position(id);
    }

    /// Move `id` so it resolves to `position` in world space.
    ///
    /// Solves the local position against the parent's world position and the
    /// current anchor and offset.
    pub fn set_world_position(&mut self, id: ElementId, position: Vec2) {
        if !self.is_alive(id) {
            return;
        }
        let parent = self.parent_frame(id);
        let t = &self.node(id).transform;
        let local = position - parent.position - t.anchored(parent.size);
        self.set_local_position(id, local);
    }

    /// Move `id` so its pivot resolves to `pivot`.
    pub fn set_pivot_position(&mut self, id: ElementId, pivot: Vec2) {
        if !self.is_alive(id) {
            return;
        }
        let parent = self.parent_frame(id);
        let t = &mut self.node_mut(id).transform;
        t.local_position = pivot - t.anchored(parent.size);
        t.pivot_position = pivot;
        self.update_position(id);
    }

    // --- rotation ---

    /// Set the rotation relative to the parent, in degrees.
    pub fn set_local_rotation(&mut self, id: ElementId, degrees: f64) {
        let Some(t) = self.transform_opt_mut(id) else {
            return;
        };
        t.local_rotation = degrees;
        self.update_rotation(id);
    }

    /// Rotate `id` so it resolves to `degrees` in world space.
    pub fn set_world_rotation(&mut self, id: ElementId, degrees: f64) {
        if !self.is_alive(id) {
            return;
        }
        let parent = self.parent_frame(id);
        self.set_local_rotation(id, degrees - parent.rotation);
    }

    /// Set the rotation origin used by [`Transform::canvas_transform`].
    ///
    /// Nothing else depends on it, so no cascade runs.
    pub fn set_rotation_offset(&mut self, id: ElementId, rotation_offset: Vec2) {
        if let Some(t) = self.transform_opt_mut(id) {
            t.rotation_offset = rotation_offset;
        }
    }

    // --- association ---

    /// Replace the transform of `id` with a fresh one built from `local`.
    pub fn set_transform(&mut self, id: ElementId, local: LocalTransform) {
        let Some(t) = self.transform_opt_mut(id) else {
            return;
        };
        *t = Transform::attached(id, local);
        self.update_transforms(id);
    }

    /// Detach the transform of `id`, leaving a default transform in its slot.
    ///
    /// The returned transform keeps its inputs and last resolved values, and
    /// reports no owning element.
    pub fn take_transform(&mut self, id: ElementId) -> Option<Transform> {
        let t = self.transform_opt_mut(id)?;
        let mut taken = core::mem::replace(t, Transform::attached(id, LocalTransform::default()));
        taken.detach();
        self.update_transforms(id);
        Some(taken)
    }

    /// Install `transform` as the transform of `id` and resolve it there.
    ///
    /// The transform previously owned by `id` is dropped. On a stale `id` the
    /// given transform is dropped and an error is returned.
    pub fn put_transform(
        &mut self,
        id: ElementId,
        transform: Transform,
    ) -> Result<(), TreeError> {
        let Some(t) = self.transform_opt_mut(id) else {
            return Err(TreeError::StaleElement(id));
        };
        *t = transform;
        t.attach(id);
        self.update_transforms(id);
        Ok(())
    }

    /// Move the transform owned by `from` onto `to`.
    ///
    /// `from` is left with a fresh default transform. Both elements are
    /// re-resolved. Moving a transform onto its own element does nothing.
    pub fn move_transform(
        &mut self,
        from: ElementId,
        to: ElementId,
    ) -> Result<(), TreeError> {
        for id in [from, to] {
            if !self.is_alive(id) {
                return Err(TreeError::StaleElement(id));
            }
        }
        if from == to {
            return Ok(());
        }
        log::trace!("moving transform from {from:?} to {to:?}");
        let Some(transform) = self.take_transform(from) else {
            unreachable!("`from` was checked to be live");
        };
        self.put_transform(to, transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    fn approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).hypot() < 1e-9
    }

    /// Parent sized 100x100 at the origin with a single default child.
    fn parent_and_child() -> (Tree, ElementId, ElementId) {
        let mut tree = Tree::new();
        let parent = tree.insert(None, LocalTransform::default()).unwrap();
        let child = tree.insert(Some(parent), LocalTransform::default()).unwrap();
        tree.set_size(parent, Vec2::new(100.0, 100.0));
        (tree, parent, child)
    }

    #[test]
    fn parent_scale_tracks_parent_size() {
        let (mut tree, parent, child) = parent_and_child();
        tree.set_scale_width(child, true);
        assert_eq!(tree.transform(child).unwrap().size().x, 100.0, "width should track");
        assert_eq!(tree.transform(child).unwrap().size().y, 0.0, "height should not track");

        tree.set_size(parent, Vec2::new(40.0, 60.0));
        assert_eq!(tree.transform(child).unwrap().size(), Vec2::new(40.0, 0.0));
    }

    #[test]
    fn scale_flags_touch_one_axis() {
        let (mut tree, _, child) = parent_and_child();
        tree.set_parent_scale(child, Vec2::new(0.5, 2.0));
        tree.set_scale_width(child, true);
        let t = tree.transform(child).unwrap();
        assert_eq!(t.parent_scale(), Vec2::new(1.0, 2.0));
        assert!(t.scale_width() && t.scale_height(), "both axes tracked");

        tree.set_scale_height(child, false);
        let t = tree.transform(child).unwrap();
        assert_eq!(t.parent_scale(), Vec2::new(1.0, 0.0));
        assert!(!t.scale_height(), "height no longer tracked");
    }

    #[test]
    fn fractional_parent_scale_with_offset() {
        let (mut tree, _, child) = parent_and_child();
        tree.set_parent_scale(child, Vec2::new(0.5, 0.25));
        tree.set_local_size_offset(child, Vec2::new(-10.0, 5.0));
        assert_eq!(tree.transform(child).unwrap().size(), Vec2::new(40.0, 30.0));
    }

    #[test]
    fn set_size_back_solves_offset() {
        let (mut tree, _, child) = parent_and_child();
        tree.set_scale_width(child, true);
        tree.set_size(child, Vec2::new(80.0, 30.0));
        let t = tree.transform(child).unwrap();
        assert_eq!(t.size(), Vec2::new(80.0, 30.0));
        assert_eq!(t.local_size_offset(), Vec2::new(-20.0, 30.0));

        // Recomputing from inputs reproduces the requested size.
        tree.update_size(child);
        assert_eq!(tree.transform(child).unwrap().size(), Vec2::new(80.0, 30.0));
    }

    #[test]
    fn rotation_composes() {
        let (mut tree, parent, child) = parent_and_child();
        tree.set_world_rotation(parent, 50.0);
        tree.set_local_rotation(child, 50.0);
        assert_eq!(tree.transform(child).unwrap().world_rotation(), 100.0);

        tree.set_world_rotation(child, 20.0);
        let t = tree.transform(child).unwrap();
        assert_eq!(t.local_rotation(), -30.0);
        assert_eq!(t.world_rotation(), 20.0);
    }

    #[test]
    fn centered_child_pivot() {
        let (mut tree, _, child) = parent_and_child();
        tree.set_scale_width(child, true);
        tree.set_scale_width(child, false);
        tree.set_size(child, Vec2::new(50.0, 50.0));
        tree.set_anchor_position(child, Vec2::new(0.5, 0.5));
        tree.set_offset_position(child, Vec2::new(0.5, 0.5));
        // 100 * 0.5 - 50 * 0.5 + 0
        assert_eq!(
            tree.transform(child).unwrap().pivot_position(),
            Vec2::new(25.0, 25.0)
        );
    }

    #[test]
    fn centered_child_of_zero_sized_parent() {
        let mut tree = Tree::new();
        let parent = tree.insert(None, LocalTransform::default()).unwrap();
        let child = tree.insert(Some(parent), LocalTransform::default()).unwrap();
        tree.set_size(child, Vec2::new(50.0, 50.0));
        tree.set_anchor_position(child, Vec2::new(0.5, 0.5));
        tree.set_offset_position(child, Vec2::new(0.5, 0.5));
        assert_eq!(
            tree.transform(child).unwrap().pivot_position(),
            Vec2::new(-25.0, -25.0)
        );
    }

    #[test]
    fn world_position_round_trip() {
        let (mut tree, parent, child) = parent_and_child();
        tree.set_local_position(parent, Vec2::new(10.0, 20.0));
        tree.set_size(child, Vec2::new(20.0, 10.0));
        tree.set_anchor_position(child, Vec2::new(1.0, 0.5));
        tree.set_offset_position(child, Vec2::new(1.0, 0.0));

        tree.set_world_position(child, Vec2::new(0.0, 0.0));
        let t = tree.transform(child).unwrap();
        assert_eq!(t.world_position(), Vec2::ZERO);
        assert_eq!(t.pivot_position(), Vec2::new(-10.0, -20.0));
        // -10 = 100 * 1 - 20 * 1 + lx, -20 = 100 * 0.5 - 10 * 0 + ly
        assert_eq!(t.local_position(), Vec2::new(-90.0, -70.0));
    }

    #[test]
    fn pivot_position_round_trip() {
        let (mut tree, parent, child) = parent_and_child();
        tree.set_local_position(parent, Vec2::new(5.0, 5.0));
        tree.set_size(child, Vec2::new(10.0, 10.0));
        tree.set_anchor_position(child, Vec2::new(0.5, 0.5));
        tree.set_offset_position(child, Vec2::new(0.5, 0.5));

        tree.set_pivot_position(child, Vec2::new(30.0, 40.0));
        let t = tree.transform(child).unwrap();
        assert_eq!(t.pivot_position(), Vec2::new(30.0, 40.0));
        assert_eq!(t.world_position(), Vec2::new(35.0, 45.0));
        assert_eq!(t.local_position(), Vec2::new(-15.0, -5.0));
    }

    #[test]
    fn scaling_inputs_keep_position_consistent() {
        let (mut tree, _, child) = parent_and_child();
        tree.set_offset_position(child, Vec2::new(1.0, 1.0));
        tree.set_local_size_offset(child, Vec2::new(10.0, 10.0));
        assert_eq!(
            tree.transform(child).unwrap().pivot_position(),
            Vec2::new(-10.0, -10.0)
        );
        tree.set_parent_scale(child, Vec2::new(1.0, 0.0));
        assert_eq!(
            tree.transform(child).unwrap().pivot_position(),
            Vec2::new(-110.0, -10.0)
        );
    }

    #[test]
    fn parent_resize_moves_anchored_children() {
        let (mut tree, parent, child) = parent_and_child();
        tree.set_anchor_position(child, Vec2::new(1.0, 1.0));
        assert_eq!(
            tree.transform(child).unwrap().world_position(),
            Vec2::new(100.0, 100.0)
        );
        tree.set_size(parent, Vec2::new(10.0, 20.0));
        assert_eq!(
            tree.transform(child).unwrap().world_position(),
            Vec2::new(10.0, 20.0)
        );
    }

    #[test]
    fn cascade_reaches_whole_chain() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalTransform::default()).unwrap();
        let mut chain = vec![root];
        for _ in 0..16 {
            let parent = *chain.last().unwrap();
            let id = tree
                .insert(Some(parent), LocalTransform::default().with_scale(Vec2::new(1.0, 0.0)))
                .unwrap();
            chain.push(id);
        }
        tree.set_size(root, Vec2::new(64.0, 8.0));
        for &id in &chain[1..] {
            assert_eq!(
                tree.transform(id).unwrap().size().x,
                64.0,
                "every link should track the root width"
            );
        }
    }

    #[test]
    fn update_is_idempotent() {
        let (mut tree, parent, child) = parent_and_child();
        tree.set_parent_scale(child, Vec2::new(0.3, 0.7));
        tree.set_size(child, Vec2::new(33.3, 12.1));
        tree.set_anchor_position(child, Vec2::new(0.1, 0.9));
        tree.set_offset_position(child, Vec2::new(0.25, 0.75));
        tree.set_world_rotation(child, 12.5);

        tree.update_transforms(parent);
        let first = tree.transform(child).unwrap().clone();
        tree.update_transforms(parent);
        assert_eq!(tree.transform(child).unwrap(), &first, "no drift between passes");
    }

    #[test]
    fn separate_and_combined_updates_agree() {
        let (mut tree, parent, child) = parent_and_child();
        tree.set_parent_scale(child, Vec2::new(0.5, 1.0));
        tree.set_anchor_position(child, Vec2::new(0.5, 0.0));
        tree.set_local_rotation(parent, 15.0);

        tree.update_size(parent);
        tree.update_position(parent);
        tree.update_rotation(parent);
        let separate = tree.transform(child).unwrap().clone();
        tree.update_transforms(parent);
        assert_eq!(tree.transform(child).unwrap(), &separate);
    }

    #[test]
    fn canvas_transform_places_origin_at_pivot() {
        let mut tree = Tree::new();
        let id = tree
            .insert(
                None,
                LocalTransform::sized(Vec2::new(20.0, 10.0)).with_position(Vec2::new(5.0, 7.0)),
            )
            .unwrap();
        let affine = tree.transform(id).unwrap().canvas_transform();
        assert!(approx_eq((affine * Point::ZERO).to_vec2(), Vec2::new(5.0, 7.0)));
    }

    #[test]
    fn canvas_transform_rotates_about_rotation_origin() {
        let mut tree = Tree::new();
        let id = tree
            .insert(
                None,
                LocalTransform::sized(Vec2::new(20.0, 10.0))
                    .with_rotation(90.0)
                    .with_rotation_offset(Vec2::new(0.5, 0.5)),
            )
            .unwrap();
        let t = tree.transform(id).unwrap();
        assert_eq!(t.rotation_origin(), Vec2::new(10.0, 5.0));

        let affine = t.canvas_transform();
        // The rotation origin is a fixed point.
        assert!(approx_eq((affine * Point::new(10.0, 5.0)).to_vec2(), Vec2::new(10.0, 5.0)));
        let expected = Affine::rotate_about(FRAC_PI_2, Point::new(10.0, 5.0)) * Point::ZERO;
        assert!(approx_eq((affine * Point::ZERO).to_vec2(), expected.to_vec2()));
    }

    #[test]
    fn bounds_follow_pivot_and_size() {
        let (mut tree, parent, child) = parent_and_child();
        tree.set_local_position(parent, Vec2::new(100.0, 0.0));
        tree.set_size(child, Vec2::new(10.0, 20.0));
        tree.set_local_position(child, Vec2::new(5.0, 5.0));
        let t = tree.transform(child).unwrap();
        assert_eq!(t.bounds(), Rect::new(5.0, 5.0, 15.0, 25.0));
        assert_eq!(t.world_bounds(), Rect::new(105.0, 5.0, 115.0, 25.0));
        assert!(t.contains_point(Point::new(15.0, 25.0)), "edges are inclusive");
        assert!(!t.contains_point(Point::new(16.0, 10.0)), "outside to the right");
    }

    #[test]
    fn move_transform_leaves_default_behind() {
        let (mut tree, parent, child) = parent_and_child();
        let other = tree.insert(None, LocalTransform::default()).unwrap();
        tree.set_size(child, Vec2::new(10.0, 10.0));
        tree.set_local_position(child, Vec2::new(3.0, 4.0));

        tree.move_transform(child, other).unwrap();
        let moved = tree.transform(other).unwrap();
        assert_eq!(moved.element(), Some(other));
        assert_eq!(moved.size(), Vec2::new(10.0, 10.0));
        assert_eq!(moved.world_position(), Vec2::new(3.0, 4.0));

        let fresh = tree.transform(child).unwrap();
        assert_eq!(fresh.element(), Some(child));
        assert_eq!(fresh.local(), LocalTransform::default());
        assert_eq!(fresh.size(), Vec2::ZERO);
        assert_eq!(tree.parent_of(child), Some(parent));
    }

    #[test]
    fn moved_transform_resolves_against_new_parent() {
        let (mut tree, parent, child) = parent_and_child();
        let other = tree.insert(Some(parent), LocalTransform::default()).unwrap();
        let grandchild = tree.insert(Some(other), LocalTransform::default()).unwrap();
        tree.set_scale_width(child, true);
        tree.set_anchor_position(child, Vec2::new(1.0, 0.0));

        tree.move_transform(child, grandchild).unwrap();
        // `other` is zero-sized, so the moved inputs now resolve against it.
        let t = tree.transform(grandchild).unwrap();
        assert_eq!(t.size(), Vec2::ZERO);
        assert_eq!(t.world_position(), Vec2::ZERO);
    }

    #[test]
    fn take_and_put_transform() {
        let (mut tree, _, child) = parent_and_child();
        tree.set_local_rotation(child, 30.0);
        let taken = tree.take_transform(child).unwrap();
        assert_eq!(taken.element(), None);
        assert_eq!(taken.local_rotation(), 30.0);
        assert_eq!(tree.transform(child).unwrap().world_rotation(), 0.0);

        tree.put_transform(child, taken).unwrap();
        let t = tree.transform(child).unwrap();
        assert_eq!(t.element(), Some(child));
        assert_eq!(t.world_rotation(), 30.0);
    }

    #[test]
    fn set_transform_reconfigures() {
        let (mut tree, _, child) = parent_and_child();
        tree.set_transform(
            child,
            LocalTransform::sized(Vec2::new(0.0, 30.0)).with_scale(Vec2::new(1.0, 0.0)),
        );
        let t = tree.transform(child).unwrap();
        assert_eq!(t.size(), Vec2::new(100.0, 30.0));
        assert_eq!(t.element(), Some(child));
    }

    #[test]
    fn no_input_validation() {
        let (mut tree, _, child) = parent_and_child();
        tree.set_size(child, Vec2::new(-10.0, 10.0));
        tree.set_anchor_position(child, Vec2::new(2.0, -1.0));
        let t = tree.transform(child).unwrap();
        assert_eq!(t.size(), Vec2::new(-10.0, 10.0));
        assert_eq!(t.pivot_position(), Vec2::new(200.0, -100.0));
        assert_eq!(t.bounds(), Rect::new(190.0, -100.0, 200.0, -90.0));
    }
}
