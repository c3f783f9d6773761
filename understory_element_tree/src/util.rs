// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

/// Component-wise product of two vectors.
#[inline]
pub(crate) fn mul(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x * b.x, a.y * b.y)
}

/// Axis-aligned rectangle spanning `origin` to `origin + size`.
///
/// Negative sizes are allowed; the result is normalized so that
/// `x0 <= x1` and `y0 <= y1`.
pub(crate) fn rect_from_origin_size(origin: Vec2, size: Vec2) -> Rect {
    Rect::from_points(origin.to_point(), (origin + size).to_point())
}

#[inline]
pub(crate) fn contains_inclusive(rect: Rect, pt: Point) -> bool {
    pt.x >= rect.x0 && pt.x <= rect.x1 && pt.y >= rect.y0 && pt.y <= rect.y1
}
