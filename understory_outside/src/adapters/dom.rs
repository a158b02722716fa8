// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for Understory DOM.
//!
//! ## Feature
//!
//! Enable with `dom_adapter` (on by default).
//!
//! The tree's own generational liveness, inclusive containment, and string
//! style storage map one-to-one onto [`ElementTree`].

use kurbo::Rect;
use understory_dom::{NodeId, Tree};

use crate::tree::ElementTree;

impl ElementTree for Tree {
    type Id = NodeId;

    fn is_live(&self, id: NodeId) -> bool {
        self.is_alive(id)
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        Self::parent_of(self, id)
    }

    fn children_of(&self, id: NodeId) -> &[NodeId] {
        Self::children_of(self, id)
    }

    fn bounding_rect(&self, id: NodeId) -> Option<Rect> {
        self.bounds(id)
    }

    fn style_property(&self, id: NodeId, name: &str) -> Option<&str> {
        Self::style_property(self, id, name)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        Self::contains(self, ancestor, node)
    }
}
