// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_element_tree --heading-base-level=0

//! Understory Element Tree: a retained element tree with anchored, parent-relative 2D transforms.
//!
//! Understory Element Tree is a reusable building block for retained-mode UIs and scene editors.
//!
//! - Represents a hierarchy of elements, each owning exactly one [`Transform`].
//! - Resolves declarative placement (parent-relative size, anchor/offset/pivot positioning,
//!   relative rotation) into world-space size, position, and rotation.
//! - Keeps everything resolved at all times: every mutation cascades through the affected
//!   subtree before returning. There is no commit step.
//!
//! ## Resolution model
//!
//! Each element resolves against its parent's resolved values, or against zero for roots:
//!
//! - **Size**: per axis, either a fixed size or `parent_size * parent_scale + local_size_offset`
//!   when the axis tracks the parent.
//! - **Position**: the *pivot* is `parent_size * anchor - size * offset + local_position`, the
//!   world position is the parent's world position plus the pivot.
//! - **Rotation**: world rotation is the parent's world rotation plus the local rotation, in
//!   degrees.
//!
//! Several setters run the other way: [`Tree::set_size`], [`Tree::set_world_position`],
//! [`Tree::set_pivot_position`], and [`Tree::set_world_rotation`] solve for the local input that
//! produces the requested resolved value.
//!
//! Cascades visit an element before any of its descendants and siblings in append order, so a
//! single pass is always enough.
//!
//! ## Not a layout engine
//!
//! This crate does not measure content or arrange children (no flex, grid, or flow policies).
//! Higher layers can compute sizes and positions and feed them through the setters. It also
//! does not render or dispatch input; it exposes what those layers need:
//! [`Transform::canvas_transform`] for placing a drawing surface and [`Transform::bounds`] /
//! [`Transform::contains_point`] for hit tests.
//!
//! ## API overview
//!
//! - [`Tree`]: arena of elements and the entry point for all mutations.
//! - [`ElementId`]: generational handle of an element.
//! - [`Transform`]: read-only view of an element's inputs and resolved geometry.
//! - [`LocalTransform`]: authoring inputs used to configure a transform.
//! - [`TreeError`]: structural failures (cycles, stale handles).
//!
//! Key operations:
//! - [`Tree::insert`] → [`ElementId`], [`Tree::remove`].
//! - [`Tree::set_parent`] / [`Tree::add_child`] / [`Tree::remove_child`]: reject cycles without
//!   changing anything.
//! - [`Tree::parent_of`], [`Tree::children_of`], [`Tree::ancestors`], [`Tree::depth_first`],
//!   [`Tree::roots`].
//! - Size: [`Tree::set_parent_scale`], [`Tree::set_scale_width`], [`Tree::set_scale_height`],
//!   [`Tree::set_local_size_offset`], [`Tree::set_size`].
//! - Position: [`Tree::set_local_position`], [`Tree::set_anchor_position`],
//!   [`Tree::set_offset_position`], [`Tree::set_world_position`], [`Tree::set_pivot_position`].
//! - Rotation: [`Tree::set_local_rotation`], [`Tree::set_world_rotation`].
//! - Transform ownership: [`Tree::set_transform`], [`Tree::move_transform`],
//!   [`Tree::take_transform`], [`Tree::put_transform`].
//!
//! The tree is single-threaded: mutations take `&mut Tree` and run to completion.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod transform;
mod traverse;
mod tree;
mod types;
mod util;

pub use error::TreeError;
pub use transform::Transform;
pub use traverse::{Ancestors, DepthFirst};
pub use tree::Tree;
pub use types::{ElementId, LocalTransform};
