// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inside/outside decision.
//!
//! ## Rules
//!
//! For a reference element `R` and a click target `T`:
//!
//! 1. No target, or a target no longer in the tree: outside.
//! 2. `T` is `R`: inside.
//! 3. `T` is a descendant of `R`: inside.
//! 4. `T` is an *overlay* of `R` (see [`is_indirect_child`]): inside.
//! 5. Otherwise every descendant of `R` gets the overlay test of rule 4 in
//!    turn; `T` is outside only if none of them claims it.
//!
//! Rule 5 lets a descendant with its own stacking order claim overlays that
//! stack above it even when they stack below `R` itself. With deeply nested
//! overlapping subtrees this can claim more than a visual hit test would.

use alloc::vec;

use crate::geometry::elements_intersect;
use crate::stacking::resolve_z_index;
use crate::tree::ElementTree;

/// Why a target counts as inside.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Reason<K> {
    /// The target is the reference element.
    Reference,
    /// The target is a descendant of the reference element.
    Descendant,
    /// The target overlaps `via` (the reference or one of its descendants)
    /// and stacks at or above it, without a tree relationship.
    Overlay {
        /// The element the target overlays.
        via: K,
    },
}

/// Result of [`classify`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict<K> {
    /// The click happened outside the reference element.
    Outside,
    /// The click happened inside, for the given reason.
    Inside(Reason<K>),
}

impl<K> Verdict<K> {
    /// Returns `true` for [`Verdict::Outside`].
    pub const fn is_outside(&self) -> bool {
        matches!(self, Self::Outside)
    }
}

/// Returns `true` if `target` is treated as logically inside `container`
/// without being its descendant.
///
/// All of the following must hold:
/// - `container` does not contain `target`;
/// - `target` does not contain `container` (ancestors are never overlays);
/// - their bounding rectangles intersect;
/// - `target` resolves to a stacking order at or above `container`'s.
///
/// This is what makes portaled menus, popovers, and tooltips count as part of
/// the element that opened them.
pub fn is_indirect_child<T: ElementTree + ?Sized>(tree: &T, container: T::Id, target: T::Id) -> bool {
    !tree.contains(container, target)
        && !tree.contains(target, container)
        && elements_intersect(tree, container, target)
        && resolve_z_index(tree, target) >= resolve_z_index(tree, container)
}

/// Decide whether a click on `target` is outside `reference`, and why not.
///
/// A stale `reference` has nothing inside it, so every target is outside.
///
/// ```
/// use kurbo::Rect;
/// use understory_dom::{ElementData, Tree};
/// use understory_outside::{Reason, Verdict, classify};
///
/// let mut tree = Tree::new();
/// let body = tree.insert(None, ElementData::new("body"));
/// let app = tree.insert(Some(body), ElementData::new("div"));
/// let menu = tree.insert(
///     Some(app),
///     ElementData::new("div").with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)),
/// );
/// // Rendered elsewhere in the tree, but drawn over the menu.
/// let tooltip = tree.insert(
///     Some(body),
///     ElementData::new("div")
///         .with_bounds(Rect::new(50.0, 50.0, 150.0, 80.0))
///         .with_style("z-index", "5"),
/// );
///
/// assert_eq!(
///     classify(&tree, menu, Some(tooltip)),
///     Verdict::Inside(Reason::Overlay { via: menu })
/// );
/// assert!(classify(&tree, menu, Some(app)).is_outside());
/// ```
pub fn classify<T: ElementTree + ?Sized>(
    tree: &T,
    reference: T::Id,
    target: Option<T::Id>,
) -> Verdict<T::Id> {
    let Some(target) = target.filter(|t| tree.is_live(*t)) else {
        return Verdict::Outside;
    };
    if !tree.is_live(reference) {
        return Verdict::Outside;
    }
    if reference == target {
        return Verdict::Inside(Reason::Reference);
    }
    if tree.contains(reference, target) {
        return Verdict::Inside(Reason::Descendant);
    }

    // Depth-first over the reference subtree; any element the target overlays
    // claims the click.
    let mut stack = vec![reference];
    while let Some(node) = stack.pop() {
        if is_indirect_child(tree, node, target) {
            log::trace!("{target:?} overlays {node:?} inside {reference:?}");
            return Verdict::Inside(Reason::Overlay { via: node });
        }
        stack.extend(tree.children_of(node).iter().rev().copied());
    }
    Verdict::Outside
}

/// Returns `true` if a click on `target` is outside `reference`.
///
/// Shorthand for `classify(tree, reference, target).is_outside()`.
pub fn is_outside<T: ElementTree + ?Sized>(tree: &T, reference: T::Id, target: Option<T::Id>) -> bool {
    classify(tree, reference, target).is_outside()
}
