// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host seam: what the detector needs to know about elements.

use kurbo::Rect;

/// Read-only view of a retained element tree.
///
/// Implement this for your scene or DOM model to run [`classify`](crate::classify)
/// and [`is_outside`](crate::is_outside) against it. Ids may be stale (removed from
/// the tree); implementations report stale ids as not live, with no parent, no
/// children, no rectangle, and no style.
pub trait ElementTree {
    /// Element handle.
    type Id: Copy + Eq + core::fmt::Debug;

    /// Returns `true` if `id` refers to an element currently in the tree.
    fn is_live(&self, id: Self::Id) -> bool;

    /// Parent of `id`, or `None` for roots and stale ids.
    fn parent_of(&self, id: Self::Id) -> Option<Self::Id>;

    /// Direct children of `id` in tree order.
    fn children_of(&self, id: Self::Id) -> &[Self::Id];

    /// Bounding client rectangle (`x0` = left, `y0` = top, `x1` = right,
    /// `y1` = bottom), or `None` if the element is not laid out.
    fn bounding_rect(&self, id: Self::Id) -> Option<Rect>;

    /// Computed style property value, as reported by the host.
    fn style_property(&self, id: Self::Id, name: &str) -> Option<&str>;

    /// Returns `true` if `node` is `ancestor` or one of its descendants.
    ///
    /// The default walks parents from `node`; override it if the host has a
    /// cheaper containment test.
    fn contains(&self, ancestor: Self::Id, node: Self::Id) -> bool {
        if !self.is_live(ancestor) || !self.is_live(node) {
            return false;
        }
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }
}

impl<T: ElementTree + ?Sized> ElementTree for &T {
    type Id = T::Id;

    fn is_live(&self, id: Self::Id) -> bool {
        (**self).is_live(id)
    }

    fn parent_of(&self, id: Self::Id) -> Option<Self::Id> {
        (**self).parent_of(id)
    }

    fn children_of(&self, id: Self::Id) -> &[Self::Id] {
        (**self).children_of(id)
    }

    fn bounding_rect(&self, id: Self::Id) -> Option<Rect> {
        (**self).bounding_rect(id)
    }

    fn style_property(&self, id: Self::Id, name: &str) -> Option<&str> {
        (**self).style_property(id, name)
    }

    fn contains(&self, ancestor: Self::Id, node: Self::Id) -> bool {
        (**self).contains(ancestor, node)
    }
}
