// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: element identifiers and authoring data.

use kurbo::Vec2;

/// Identifier for an element in the tree (generational).
///
/// An identifier stays valid until its element is removed. Slots are reused
/// after removal, but with a bumped generation, so an old identifier never
/// aliases a newer element.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Authoring inputs for an element's transform.
///
/// These are the local values a [`Transform`](crate::Transform) resolves
/// from. Everything resolved (size, pivot, world position and rotation) is
/// derived when the data is installed with [`Tree::insert`](crate::Tree::insert)
/// or [`Tree::set_transform`](crate::Tree::set_transform).
///
/// ```rust
/// use kurbo::Vec2;
/// use understory_element_tree::LocalTransform;
///
/// // A 100x40 bar, centered on its parent and stretched to its width.
/// let bar = LocalTransform::sized(Vec2::new(0.0, 40.0))
///     .with_scale(Vec2::new(1.0, 0.0))
///     .with_anchor(Vec2::new(0.5, 0.5))
///     .with_offset(Vec2::new(0.5, 0.5));
/// assert_eq!(bar.parent_scale, Vec2::new(1.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalTransform {
    /// Size added on top of the parent-scaled size. On axes that do not track
    /// the parent this is the whole size.
    pub local_size_offset: Vec2,
    /// Per-axis factor of the parent's size to track; `0.0` disables tracking.
    pub parent_scale: Vec2,
    /// Translation added after anchoring.
    pub local_position: Vec2,
    /// Fraction of the parent's size used as origin.
    pub anchor_position: Vec2,
    /// Fraction of the element's own size placed at the anchor.
    pub offset_position: Vec2,
    /// Rotation relative to the parent, in degrees.
    pub local_rotation: f64,
    /// Fraction of the element's size used as rotation origin when rendering.
    pub rotation_offset: Vec2,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            local_size_offset: Vec2::ZERO,
            parent_scale: Vec2::ZERO,
            local_position: Vec2::ZERO,
            anchor_position: Vec2::ZERO,
            offset_position: Vec2::ZERO,
            local_rotation: 0.0,
            rotation_offset: Vec2::ZERO,
        }
    }
}

impl LocalTransform {
    /// A transform with a fixed size that does not track its parent.
    pub fn sized(size: Vec2) -> Self {
        Self {
            local_size_offset: size,
            ..Self::default()
        }
    }

    /// Set the per-axis parent scale.
    #[must_use]
    pub fn with_scale(mut self, parent_scale: Vec2) -> Self {
        self.parent_scale = parent_scale;
        self
    }

    /// Set the anchor position.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Vec2) -> Self {
        self.anchor_position = anchor;
        self
    }

    /// Set the offset position.
    #[must_use]
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset_position = offset;
        self
    }

    /// Set the local position.
    #[must_use]
    pub fn with_position(mut self, position: Vec2) -> Self {
        self.local_position = position;
        self
    }

    /// Set the local rotation, in degrees.
    #[must_use]
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.local_rotation = degrees;
        self
    }

    /// Set the rotation offset.
    #[must_use]
    pub fn with_rotation_offset(mut self, rotation_offset: Vec2) -> Self {
        self.rotation_offset = rotation_offset;
        self
    }
}
