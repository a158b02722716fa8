// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal in-memory tree for unit tests.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::tree::ElementTree;

#[derive(Debug, Default)]
struct Entry {
    parent: Option<usize>,
    children: Vec<usize>,
    rect: Option<Rect>,
    z_index: Option<String>,
    live: bool,
}

#[derive(Debug, Default)]
pub(crate) struct Fixture {
    entries: Vec<Entry>,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, parent: Option<usize>, rect: Option<Rect>, z_index: Option<&str>) -> usize {
        let id = self.entries.len();
        self.entries.push(Entry {
            parent,
            children: Vec::new(),
            rect,
            z_index: z_index.map(String::from),
            live: true,
        });
        if let Some(p) = parent {
            self.entries[p].children.push(id);
        }
        id
    }

    /// Detach `id` from its parent and mark it stale.
    pub(crate) fn kill(&mut self, id: usize) {
        if let Some(p) = self.entries[id].parent.take() {
            self.entries[p].children.retain(|c| *c != id);
        }
        self.entries[id].live = false;
    }
}

impl ElementTree for Fixture {
    type Id = usize;

    fn is_live(&self, id: usize) -> bool {
        self.entries.get(id).is_some_and(|e| e.live)
    }

    fn parent_of(&self, id: usize) -> Option<usize> {
        self.entries.get(id).filter(|e| e.live).and_then(|e| e.parent)
    }

    fn children_of(&self, id: usize) -> &[usize] {
        match self.entries.get(id).filter(|e| e.live) {
            Some(e) => &e.children,
            None => &[],
        }
    }

    fn bounding_rect(&self, id: usize) -> Option<Rect> {
        self.entries.get(id).filter(|e| e.live).and_then(|e| e.rect)
    }

    fn style_property(&self, id: usize, name: &str) -> Option<&str> {
        if name != "z-index" {
            return None;
        }
        self.entries
            .get(id)
            .filter(|e| e.live)
            .and_then(|e| e.z_index.as_deref())
    }
}
