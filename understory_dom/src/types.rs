// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the element tree: node identifiers, flags, and per-element data.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::style::Style;

/// Identifier for an element in the tree (generational).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Element capability flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element can receive focus.
        const FOCUSABLE  = 0b0000_0001;
        /// Element has selectable text content (text inputs and text areas).
        const SELECTABLE = 0b0000_0010;
    }
}

impl ElementFlags {
    /// Flags an element with the given tag name has by default.
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "input" | "textarea" => Self::FOCUSABLE | Self::SELECTABLE,
            "button" | "select" | "a" => Self::FOCUSABLE,
            _ => Self::empty(),
        }
    }
}

/// Per-element data supplied by the host.
///
/// `bounds` is the element's bounding client rectangle as reported by the host
/// layout; the tree does not compute layout.
#[derive(Clone, Debug, Default)]
pub struct ElementData {
    /// Lowercase tag name, e.g. `"div"` or `"code"`.
    pub tag: String,
    /// Bounding client rectangle (`x0` = left, `y0` = top, `x1` = right, `y1` = bottom).
    /// `None` when the element is not laid out.
    pub bounds: Option<Rect>,
    /// Computed style properties.
    pub style: Style,
    /// Text content.
    pub text: String,
    /// Rendered inner markup, if something replaced the plain text.
    pub inner_html: Option<String>,
    /// Class list in insertion order.
    pub classes: Vec<String>,
    /// Width of the element's content, including overflow.
    pub scroll_width: f64,
    /// Capability flags.
    pub flags: ElementFlags,
}

impl ElementData {
    /// Create element data for `tag` with the tag's default flags.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let flags = ElementFlags::for_tag(&tag);
        Self {
            tag,
            flags,
            ..Self::default()
        }
    }

    /// Set the bounding client rectangle.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set a computed style property.
    #[must_use]
    pub fn with_style(mut self, name: &str, value: &str) -> Self {
        self.style.set(name, value);
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Add a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the content width.
    #[must_use]
    pub fn with_scroll_width(mut self, width: f64) -> Self {
        self.scroll_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_defaults() {
        assert_eq!(
            ElementData::new("input").flags,
            ElementFlags::FOCUSABLE | ElementFlags::SELECTABLE
        );
        assert_eq!(ElementData::new("button").flags, ElementFlags::FOCUSABLE);
        assert!(ElementData::new("div").flags.is_empty());
    }
}
