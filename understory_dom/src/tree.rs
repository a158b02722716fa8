// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, per-element data, and queries.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::style::Style;
use crate::types::{ElementData, ElementFlags, NodeId};

/// Retained element tree.
///
/// Elements are addressed by generational [`NodeId`]s. Removing an element
/// removes its subtree and makes every id in it stale; all accessors treat
/// stale ids as absent (`None`, `false`, or an empty slice).
///
/// Unlike a layout tree, geometry is not derived here: the host writes each
/// element's bounding client rectangle with [`Tree::set_bounds`] after its own
/// layout pass.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use understory_dom::{ElementData, Tree};
///
/// let mut tree = Tree::new();
/// let body = tree.insert(None, ElementData::new("body"));
/// let panel = tree.insert(
///     Some(body),
///     ElementData::new("div")
///         .with_bounds(Rect::new(0.0, 0.0, 100.0, 40.0))
///         .with_style("z-index", "10"),
/// );
///
/// assert!(tree.contains(body, panel));
/// assert_eq!(tree.style_property(panel, "z-index"), Some("10"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: ElementData,
}

impl Node {
    fn new(generation: u32, data: ElementData) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new element as the last child of `parent` (or as a root if `None`).
    ///
    /// A stale `parent` inserts the element as a root.
    pub fn insert(&mut self, parent: Option<NodeId>, data: ElementData) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        if let Some(p) = parent
            && self.is_alive(p)
        {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove an element (and its subtree) from the tree.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let children = self.node(id).children.clone();
        for child in children {
            self.remove(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Move `id` under `new_parent` (or make it a root).
    ///
    /// Ignored when `new_parent` lies inside `id`'s own subtree, which would
    /// create a cycle.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent
            && (!self.is_alive(p) || self.contains(id, p))
        {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Returns true if `id` refers to a live element.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Returns the parent of an element if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|node| node.parent)
    }

    /// Get the children of an element, or empty slice if the element is stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    ///
    /// Like DOM `Node.contains`, an element contains itself. Stale ids are never
    /// contained and never contain anything.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.is_alive(ancestor) || !self.is_alive(node) {
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

    /// Return the data of a live element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.node_opt(id).map(|node| &node.data)
    }

    /// Return the tag name of a live element.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|data| data.tag.as_str())
    }

    /// Return the bounding client rectangle of a live, laid-out element.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.element(id).and_then(|data| data.bounds)
    }

    /// Update the bounding client rectangle.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Option<Rect>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.bounds = bounds;
        }
    }

    /// Return the computed style of a live element.
    pub fn style(&self, id: NodeId) -> Option<&Style> {
        self.element(id).map(|data| &data.style)
    }

    /// Look up one computed style property.
    pub fn style_property(&self, id: NodeId, name: &str) -> Option<&str> {
        self.style(id).and_then(|style| style.get(name))
    }

    /// Set one computed style property.
    pub fn set_style_property(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.style.set(name, value);
        }
    }

    /// Remove one computed style property.
    pub fn remove_style_property(&mut self, id: NodeId, name: &str) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.style.remove(name);
        }
    }

    /// Return the text content of a live element.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|data| data.text.as_str())
    }

    /// Replace the text content. Clears any inner markup.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.text = text.into();
            n.data.inner_html = None;
        }
    }

    /// Return the inner markup of a live element, if any was set.
    pub fn inner_html(&self, id: NodeId) -> Option<&str> {
        self.element(id).and_then(|data| data.inner_html.as_deref())
    }

    /// Replace the inner markup, keeping the text content.
    pub fn set_inner_html(&mut self, id: NodeId, html: impl Into<String>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.inner_html = Some(html.into());
        }
    }

    /// Returns true if a live element has `class` in its class list.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .is_some_and(|data| data.classes.iter().any(|c| c == class))
    }

    /// Return the class list of a live element, or an empty slice.
    pub fn classes(&self, id: NodeId) -> &[String] {
        match self.element(id) {
            Some(data) => &data.classes,
            None => &[],
        }
    }

    /// Add `class` unless already present.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if self.has_class(id, class) {
            return;
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.data.classes.push(class.into());
        }
    }

    /// Return the content width of a live element.
    pub fn scroll_width(&self, id: NodeId) -> Option<f64> {
        self.element(id).map(|data| data.scroll_width)
    }

    /// Update the content width, as measured by the host.
    pub fn set_scroll_width(&mut self, id: NodeId, width: f64) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.scroll_width = width;
        }
    }

    /// Return the flags of a live element.
    pub fn flags(&self, id: NodeId) -> Option<ElementFlags> {
        self.element(id).map(|data| data.flags)
    }

    /// Update the flags of a live element.
    pub fn set_flags(&mut self, id: NodeId, flags: ElementFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.data.flags = flags;
        }
    }

    /// Get the next element in depth-first (document) order.
    ///
    /// Returns `None` if no next element exists or if the current element is stale.
    pub fn next_depth_first(&self, current: NodeId) -> Option<NodeId> {
        if !self.is_alive(current) {
            return None;
        }
        if let Some(&first_child) = self.node(current).children.first() {
            return Some(first_child);
        }

        let mut node = current;
        while let Some(parent) = self.parent_of(node) {
            if let Some(next_sibling) = self.next_sibling(node) {
                return Some(next_sibling);
            }
            node = parent;
        }
        None
    }

    /// Find the first descendant of `root` (excluding `root`) with the given tag,
    /// in document order.
    pub fn query_selector(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = self.next_depth_first(root)?;
        while self.contains(root, current) {
            if self.tag(current) == Some(tag) {
                return Some(current);
            }
            current = self.next_depth_first(current)?;
        }
        None
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent_of(node)?;
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&id| id == node)?;
        siblings.get(pos + 1).copied()
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }
}
