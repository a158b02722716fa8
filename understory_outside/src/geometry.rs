// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle overlap test.

use kurbo::Rect;

use crate::tree::ElementTree;

/// Returns `true` if two axis-aligned rectangles overlap.
///
/// Edges are inclusive: rectangles that only share an edge or a corner
/// intersect. They are disjoint only if one lies entirely to the left, right,
/// above, or below the other.
///
/// ```
/// use kurbo::Rect;
/// use understory_outside::rects_intersect;
///
/// let a = Rect::new(0.0, 0.0, 10.0, 10.0);
/// assert!(rects_intersect(a, Rect::new(10.0, 10.0, 20.0, 20.0)));
/// assert!(!rects_intersect(a, Rect::new(10.5, 0.0, 20.0, 10.0)));
/// ```
pub fn rects_intersect(reference: Rect, target: Rect) -> bool {
    !(target.x1 < reference.x0
        || target.y1 < reference.y0
        || reference.y1 < target.y0
        || reference.x1 < target.x0)
}

/// Returns `true` if the bounding rectangles of two elements overlap.
///
/// An element that is not laid out has no rectangle and overlaps nothing.
/// This deliberately differs from treating a missing rectangle as an empty
/// box that compares as overlapping everything: a hidden descendant of the
/// reference never claims a click.
pub fn elements_intersect<T: ElementTree + ?Sized>(tree: &T, reference: T::Id, target: T::Id) -> bool {
    match (tree.bounding_rect(reference), tree.bounding_rect(target)) {
        (Some(r), Some(t)) => rects_intersect(r, t),
        _ => false,
    }
}
