// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Outside: click-outside detection over a retained element tree.
//!
//! ## Overview
//!
//! Dropdowns, popovers, and dialogs close when the user clicks "outside" them.
//! Tree containment alone gets this wrong as soon as part of the UI is rendered
//! elsewhere in the tree (a portal) but drawn on top of the element that owns it:
//! clicking a menu item would close the menu.
//!
//! This crate decides inside/outside from three inputs the host already has:
//! tree ancestry, bounding rectangles, and a resolved stacking order.
//! See [`detect`] for the exact rules and [`stacking`] for how `z-index` is
//! resolved.
//!
//! ## Inputs
//!
//! Implement [`ElementTree`] for your element model, or enable the
//! `dom_adapter` feature (on by default) to use [`understory_dom::Tree`]
//! directly. The detector only reads the tree; it never mutates it.
//!
//! ## Usage
//!
//! ```
//! use kurbo::Rect;
//! use understory_dom::{ElementData, Tree};
//! use understory_outside::is_outside;
//!
//! let mut tree = Tree::new();
//! let body = tree.insert(None, ElementData::new("body"));
//! let dropdown = tree.insert(
//!     Some(body),
//!     ElementData::new("div")
//!         .with_bounds(Rect::new(0.0, 0.0, 200.0, 200.0))
//!         .with_style("z-index", "10"),
//! );
//! let item = tree.insert(Some(dropdown), ElementData::new("button"));
//! let elsewhere = tree.insert(
//!     Some(body),
//!     ElementData::new("button").with_bounds(Rect::new(400.0, 400.0, 480.0, 430.0)),
//! );
//!
//! assert!(!is_outside(&tree, dropdown, Some(item)));
//! assert!(is_outside(&tree, dropdown, Some(elsewhere)));
//! assert!(is_outside(&tree, dropdown, None));
//! ```
//!
//! Listener wiring (attach/detach around a document click listener) lives in
//! `understory_directives`.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `dom_adapter` (default): the [`adapters::dom`] module.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod detect;
pub mod geometry;
pub mod stacking;
mod tree;

#[cfg(test)]
mod fixture;

pub use detect::{Reason, Verdict, classify, is_indirect_child, is_outside};
pub use geometry::{elements_intersect, rects_intersect};
pub use stacking::{Z_INDEX_PROPERTY, parse_z_index, resolve_z_index};
pub use tree::ElementTree;
