// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Directives: small behaviors bound to an element's lifetime.
//!
//! A directive is attached to one element of an [`understory_dom::Document`]
//! and driven through four hooks (`before_mount`, `mounted`, `updated`,
//! `unmounted`). The host passes a [`DirectiveBinding`] to every hook: the
//! bound value (usually a callback), an optional argument, and the owning
//! component for diagnostics.
//!
//! | Directive | Name | Does |
//! |-----------|------|------|
//! | [`ClickOutside`] | `click-outside` | Calls back on clicks outside the element, treating overlays drawn above it as inside. |
//! | [`FitsBelow`] | `fits-below` | Reports whether the element fits vertically in the viewport. |
//! | [`Focus`] | `focus` | Focuses the element on the next tick. |
//! | [`Highlight`] | `hljs` | Syntax-highlights the first `code` descendant. |
//! | [`LongClick`] | `long-click:<ms>` | Calls back after the element is held for `<ms>`. |
//! | [`Resize`] | `resize[:<min>]` | Sizes an input to its content. |
//! | [`SelectOnFocus`] | `select-on-focus` | Selects the input's contents when it gains focus. |
//!
//! ## Misconfiguration
//!
//! Directives never panic or return errors to the host. A binding they cannot
//! use (a value that is not callable, a malformed argument, a missing `code`
//! element) is reported once through the [`log`] facade as a warning of the
//! form `[v-<name>:] <message>.` and the directive does nothing. Install a
//! logger (for example `env_logger`) to see these.
//!
//! ## Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use kurbo::Rect;
//! use understory_directives::binding::event_callback;
//! use understory_directives::{ClickOutside, DirectiveBinding, Mounted};
//! use understory_dom::{Document, ElementData};
//!
//! let mut doc = Document::new();
//! let body = doc.tree_mut().insert(None, ElementData::new("body"));
//! let app = doc.tree_mut().insert(Some(body), ElementData::new("div"));
//! let trigger = doc.tree_mut().insert(
//!     Some(app),
//!     ElementData::new("button").with_bounds(Rect::new(0.0, 0.0, 100.0, 30.0)),
//! );
//! // Rendered under `body`, positioned over the trigger.
//! let menu = doc.tree_mut().insert(
//!     Some(body),
//!     ElementData::new("ul")
//!         .with_bounds(Rect::new(0.0, 20.0, 200.0, 220.0))
//!         .with_style("z-index", "10"),
//! );
//!
//! let open = Rc::new(Cell::new(true));
//! let o = Rc::clone(&open);
//! let binding = DirectiveBinding::from_callback(event_callback(move |_| o.set(false)));
//! let bound = Mounted::mount(&mut doc, trigger, ClickOutside::default(), binding);
//!
//! doc.click(Some(menu));
//! assert!(open.get(), "the menu is drawn over the trigger");
//! doc.click(Some(body));
//! assert!(!open.get());
//!
//! bound.unmount(&mut doc);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for dependencies such as `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `regex_highlighter` (default): [`RegexHighlighter`], backed by `regex`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod binding;
pub mod click_outside;
mod directive;
mod error;
pub mod fits_below;
pub mod focus;
pub mod highlight;
pub mod long_click;
#[cfg(feature = "regex_highlighter")]
mod regex_highlighter;
pub mod resize;
pub mod select_on_focus;

#[cfg(test)]
mod test_log;

pub use binding::{BindingValue, ComponentInstance, DirectiveBinding, Literal};
pub use click_outside::{BindingHandle, ClickOutside, OutsideClickConfig, attach, detach};
pub use directive::{Directive, Mounted};
pub use error::{DirectiveError, report_misconfiguration};
pub use fits_below::FitsBelow;
pub use focus::Focus;
pub use highlight::{Highlight, HighlightSpan, Highlighter};
pub use long_click::{LongClick, LongClickConfig};
#[cfg(feature = "regex_highlighter")]
pub use regex_highlighter::RegexHighlighter;
pub use resize::{Resize, ResizeConfig};
pub use select_on_focus::SelectOnFocus;
