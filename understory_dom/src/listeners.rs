// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry.
//!
//! Listeners are kept in registration order. Ids are never reused, so a removed
//! [`ListenerId`] can never alias a newer registration.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::document::Document;
use crate::event::{Event, EventKinds};
use crate::types::NodeId;

/// A registered event handler.
///
/// Handlers get mutable access to the document so they can read the tree,
/// schedule timers, and add or remove listeners (including themselves).
pub type Handler = Rc<RefCell<dyn FnMut(&Event, &mut Document)>>;

/// Identifier of a registered listener.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Where a listener is attached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The document. Receives every bubbling event after the element path.
    Document,
    /// A single element. Receives events targeted at it or, for bubbling
    /// events, at any of its descendants.
    Element(NodeId),
}

struct Listener {
    id: ListenerId,
    target: ListenerTarget,
    kinds: EventKinds,
    handler: Handler,
}

/// Ordered set of listeners.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<Listener>,
    next_id: u64,
}

impl core::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Listeners")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl Listeners {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kinds` events on `target`.
    pub fn add(&mut self, target: ListenerTarget, kinds: EventKinds, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Listener {
            id,
            target,
            kinds,
            handler,
        });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.position(id) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: ListenerId) -> bool {
        self.position(id).is_some()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of listeners attached to `target`.
    pub fn count_for(&self, target: ListenerTarget) -> usize {
        self.entries.iter().filter(|l| l.target == target).count()
    }

    /// Listeners on `target` subscribed to any of `kinds`, in registration order.
    pub(crate) fn matching(
        &self,
        target: ListenerTarget,
        kinds: EventKinds,
    ) -> impl Iterator<Item = (ListenerId, Handler)> + '_ {
        self.entries
            .iter()
            .filter(move |l| l.target == target && l.kinds.intersects(kinds))
            .map(|l| (l.id, Rc::clone(&l.handler)))
    }

    fn position(&self, id: ListenerId) -> Option<usize> {
        // Entries are appended with increasing ids.
        self.entries.binary_search_by_key(&id, |l| l.id).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Handler {
        Rc::new(RefCell::new(|_: &Event, _: &mut Document| {}))
    }

    #[test]
    fn ids_are_not_reused() {
        let mut listeners = Listeners::new();
        let a = listeners.add(ListenerTarget::Document, EventKinds::CLICK, noop());
        assert!(listeners.remove(a));
        let b = listeners.add(ListenerTarget::Document, EventKinds::CLICK, noop());
        assert_ne!(a, b);
        assert!(!listeners.contains(a));
        assert!(!listeners.remove(a), "second removal is a no-op");
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn matching_filters_target_and_kind() {
        let mut listeners = Listeners::new();
        let click = listeners.add(ListenerTarget::Document, EventKinds::CLICK, noop());
        let _focus = listeners.add(ListenerTarget::Document, EventKinds::FOCUS, noop());
        let both = listeners.add(
            ListenerTarget::Document,
            EventKinds::CLICK | EventKinds::MOUSE_OUT,
            noop(),
        );
        let ids: Vec<_> = listeners
            .matching(ListenerTarget::Document, EventKinds::CLICK)
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, [click, both]);
        assert_eq!(listeners.count_for(ListenerTarget::Document), 3);
    }
}
