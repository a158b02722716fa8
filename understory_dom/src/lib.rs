// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory DOM: a small retained element tree with listeners and timers.
//!
//! This crate is the host environment that lifecycle directives run against.
//! It models just enough of a document to make directive behavior testable and
//! embeddable without a browser:
//!
//! - [`Tree`]: elements with tag, bounding client rectangle, computed [`Style`],
//!   text, inner markup, classes, content width, and [`ElementFlags`].
//!   Parent/child navigation and inclusive [`Tree::contains`].
//! - [`Document`]: owns the tree plus a listener registry, a host-driven timer
//!   queue, a next-tick queue, focus and selection state, and the viewport size.
//! - [`Event`] / [`EventKind`] / [`EventKinds`]: what listeners receive and
//!   subscribe to.
//!
//! ## Not a layout engine
//!
//! Geometry is reported by the host. Upstream code computes positions and
//! sizes with whatever layout system it uses and writes them with
//! [`Tree::set_bounds`] and [`Tree::set_scroll_width`]. Style values are stored
//! as strings; interpreting them (for example resolving `z-index`) is left to
//! consumers.
//!
//! ## Events and time
//!
//! [`Document::dispatch`] runs matching listeners synchronously: target first,
//! then ancestors, then document listeners for bubbling events. Handlers get
//! `&mut Document`, so they can read the tree, schedule work, and add or remove
//! listeners. Time only moves when the host calls [`Document::advance_to`];
//! [`Document::flush_ticks`] drains work queued with [`Document::next_tick`].
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_dom::{Document, ElementData};
//!
//! let mut doc = Document::new();
//! let body = doc.tree_mut().insert(None, ElementData::new("body"));
//! let input = doc.tree_mut().insert(Some(body), ElementData::new("input"));
//!
//! let fired = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&fired);
//! doc.set_timeout(500, move |doc| {
//!     flag.set(true);
//!     doc.focus(input);
//! });
//!
//! doc.advance_to(499);
//! assert!(!fired.get());
//! doc.advance_to(500);
//! assert!(fired.get());
//! assert_eq!(doc.focused(), Some(input));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod document;
mod event;
mod listeners;
mod style;
mod timers;
mod tree;
mod types;

pub use document::{DEFAULT_VIEWPORT, Document};
pub use event::{Button, Event, EventKind, EventKinds, PRIMARY_BUTTON};
pub use listeners::{Handler, ListenerId, ListenerTarget, Listeners};
pub use style::Style;
pub use timers::{Task, TimerId};
pub use tree::Tree;
pub use types::{ElementData, ElementFlags, NodeId};
