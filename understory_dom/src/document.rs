// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The document: element tree plus listeners, timers, focus, and viewport.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use kurbo::Size;
use smallvec::SmallVec;

use crate::event::{Event, EventKind, EventKinds};
use crate::listeners::{Handler, ListenerId, ListenerTarget, Listeners};
use crate::timers::{TimerId, Timers};
use crate::tree::Tree;
use crate::types::{ElementFlags, NodeId};

/// Viewport size used by [`Document::new`].
pub const DEFAULT_VIEWPORT: Size = Size::new(1024.0, 768.0);

/// A document: the host environment directives run against.
///
/// Everything is single-threaded and synchronous. Events are delivered by
/// [`Document::dispatch`]; time only advances when the host calls
/// [`Document::advance_to`].
///
/// ## Dispatch order
///
/// For a bubbling event with a live target, element listeners run from the
/// target up to its root, then document listeners run. Non-bubbling events
/// (focus) only reach listeners on the target itself. Within one element,
/// listeners run in registration order.
///
/// The set of listeners is snapshotted before the first handler runs. A
/// listener added during dispatch does not see the current event; a listener
/// removed during dispatch is skipped if it has not run yet.
///
/// ## Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use understory_dom::{Document, ElementData, EventKinds, ListenerTarget};
///
/// let mut doc = Document::new();
/// let body = doc.tree_mut().insert(None, ElementData::new("body"));
/// let button = doc.tree_mut().insert(Some(body), ElementData::new("button"));
///
/// let clicks = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&clicks);
/// let id = doc.add_event_listener(ListenerTarget::Document, EventKinds::CLICK, move |_, _| {
///     seen.set(seen.get() + 1);
/// });
///
/// doc.click(Some(button));
/// assert_eq!(clicks.get(), 1);
///
/// assert!(doc.remove_event_listener(id));
/// doc.click(Some(button));
/// assert_eq!(clicks.get(), 1);
/// ```
#[derive(Debug)]
pub struct Document {
    tree: Tree,
    listeners: Listeners,
    timers: Timers,
    now: u64,
    focused: Option<NodeId>,
    selected: Option<NodeId>,
    viewport: Size,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with [`DEFAULT_VIEWPORT`].
    pub fn new() -> Self {
        Self::with_viewport(DEFAULT_VIEWPORT)
    }

    /// Create an empty document with the given viewport size.
    pub fn with_viewport(viewport: Size) -> Self {
        Self {
            tree: Tree::new(),
            listeners: Listeners::new(),
            timers: Timers::default(),
            now: 0,
            focused: None,
            selected: None,
            viewport,
        }
    }

    /// The element tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The element tree, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// The viewport size.
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the viewport size.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    /// Current host time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    // --- listeners ---

    /// Register `handler` for any of `kinds` on `target`.
    pub fn add_event_listener<F>(
        &mut self,
        target: ListenerTarget,
        kinds: EventKinds,
        handler: F,
    ) -> ListenerId
    where
        F: FnMut(&Event, &mut Self) + 'static,
    {
        let handler: Handler = Rc::new(RefCell::new(handler));
        let id = self.listeners.add(target, kinds, handler);
        log::trace!("listener {id:?} added on {target:?} for {kinds:?}");
        id
    }

    /// Remove a listener. Returns `false` if it was already removed.
    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(id);
        if removed {
            log::trace!("listener {id:?} removed");
        }
        removed
    }

    /// Returns `true` if `id` is still registered.
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains(id)
    }

    /// Read-only view of the registered listeners.
    pub fn listeners(&self) -> &Listeners {
        &self.listeners
    }

    /// Deliver an event and return how many handlers ran.
    ///
    /// A stale target is treated like a missing one: only document listeners
    /// receive the event (if it bubbles).
    pub fn dispatch(&mut self, event: &Event) -> usize {
        let kinds = EventKinds::from(event.kind);
        let bubbles = event.kind.bubbles();

        let mut path: SmallVec<[ListenerTarget; 8]> = SmallVec::new();
        if let Some(target) = event.target.filter(|t| self.tree.is_alive(*t)) {
            if bubbles {
                let mut current = Some(target);
                while let Some(id) = current {
                    path.push(ListenerTarget::Element(id));
                    current = self.tree.parent_of(id);
                }
            } else {
                path.push(ListenerTarget::Element(target));
            }
        }
        if bubbles {
            path.push(ListenerTarget::Document);
        }

        let listeners = &self.listeners;
        let snapshot: SmallVec<[(ListenerId, Handler); 8]> = path
            .iter()
            .flat_map(move |target| listeners.matching(*target, kinds))
            .collect();

        let mut invoked = 0;
        for (id, handler) in snapshot {
            if !self.listeners.contains(id) {
                continue;
            }
            let Ok(mut run) = handler.try_borrow_mut() else {
                log::debug!("listener {id:?} is already running; skipping re-entrant {event:?}");
                continue;
            };
            (*run)(event, self);
            invoked += 1;
        }
        invoked
    }

    /// Dispatch an event of `kind` at `target`, stamped with the current time.
    pub fn fire(&mut self, kind: EventKind, target: Option<NodeId>) -> usize {
        let event = Event::new(kind, target).at(self.now);
        self.dispatch(&event)
    }

    /// Dispatch a primary-button click at `target`.
    pub fn click(&mut self, target: Option<NodeId>) -> usize {
        let event = Event::new(EventKind::Click, target)
            .with_button(crate::event::PRIMARY_BUTTON)
            .at(self.now);
        self.dispatch(&event)
    }

    // --- focus and selection ---

    /// Move focus to `id` and dispatch a focus event to it.
    ///
    /// Returns `false` (and does nothing) if `id` is stale or not focusable.
    /// Focusing the already-focused element dispatches nothing.
    pub fn focus(&mut self, id: NodeId) -> bool {
        let focusable = self
            .tree
            .flags(id)
            .is_some_and(|flags| flags.contains(ElementFlags::FOCUSABLE));
        if !focusable {
            return false;
        }
        if self.focused() == Some(id) {
            return true;
        }
        self.focused = Some(id);
        self.fire(EventKind::Focus, Some(id));
        true
    }

    /// Clear focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The focused element, if it is still live.
    pub fn focused(&self) -> Option<NodeId> {
        self.focused.filter(|id| self.tree.is_alive(*id))
    }

    /// Select the whole content of a selectable element.
    ///
    /// Returns `false` if `id` is stale or has no selectable content.
    pub fn select(&mut self, id: NodeId) -> bool {
        let selectable = self
            .tree
            .flags(id)
            .is_some_and(|flags| flags.contains(ElementFlags::SELECTABLE));
        if selectable {
            self.selected = Some(id);
        }
        selectable
    }

    /// The element whose content is selected, if it is still live.
    pub fn selected(&self) -> Option<NodeId> {
        self.selected.filter(|id| self.tree.is_alive(*id))
    }

    /// Replace the text of `id` as if typed by the user and dispatch an input event.
    pub fn input(&mut self, id: NodeId, text: impl Into<String>) -> usize {
        if !self.tree.is_alive(id) {
            return 0;
        }
        self.tree.set_text(id, text);
        self.fire(EventKind::Input, Some(id))
    }

    // --- timers ---

    /// Run `task` once, `delay` milliseconds from now.
    pub fn set_timeout<F>(&mut self, delay: u64, task: F) -> TimerId
    where
        F: FnOnce(&mut Self) + 'static,
    {
        let due = self.now.saturating_add(delay);
        self.timers.schedule(due, Box::new(task))
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was canceled.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.cancel(id)
    }

    /// Returns `true` if the timer has neither fired nor been canceled.
    pub fn timer_pending(&self, id: TimerId) -> bool {
        self.timers.is_pending(id)
    }

    /// Number of pending timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Queue `task` to run on the next [`Document::flush_ticks`].
    pub fn next_tick<F>(&mut self, task: F)
    where
        F: FnOnce(&mut Self) + 'static,
    {
        self.timers.push_tick(Box::new(task));
    }

    /// Run queued next-tick tasks, including ones queued while flushing.
    /// Returns how many ran.
    pub fn flush_ticks(&mut self) -> usize {
        let mut ran = 0;
        while let Some(task) = self.timers.pop_tick() {
            task(self);
            ran += 1;
        }
        ran
    }

    /// Advance the clock to `now` and run every timer due by then.
    ///
    /// Timers fire in deadline order. Timers scheduled by a firing timer run in
    /// the same call if they are already due. Time never moves backwards.
    /// Returns how many timers fired.
    pub fn advance_to(&mut self, now: u64) -> usize {
        self.now = self.now.max(now);
        let mut fired = 0;
        while let Some(task) = self.timers.pop_due(self.now) {
            task(self);
            fired += 1;
        }
        fired
    }

    /// Advance the clock by `delta` milliseconds. See [`Document::advance_to`].
    pub fn advance_by(&mut self, delta: u64) -> usize {
        self.advance_to(self.now.saturating_add(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ElementData;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn record(log: &Log, label: &'static str) -> impl FnMut(&Event, &mut Document) + 'static {
        let log = Rc::clone(log);
        move |_, _| log.borrow_mut().push(label)
    }

    fn page() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.tree_mut().insert(None, ElementData::new("body"));
        let form = doc.tree_mut().insert(Some(body), ElementData::new("form"));
        let input = doc.tree_mut().insert(Some(form), ElementData::new("input"));
        (doc, body, form, input)
    }

    #[test]
    fn bubbling_runs_target_then_ancestors_then_document() {
        let (mut doc, body, form, input) = page();
        let log: Log = Rc::default();
        doc.add_event_listener(ListenerTarget::Document, EventKinds::CLICK, record(&log, "doc"));
        doc.add_event_listener(ListenerTarget::Element(body), EventKinds::CLICK, record(&log, "body"));
        doc.add_event_listener(ListenerTarget::Element(input), EventKinds::CLICK, record(&log, "input"));
        doc.add_event_listener(ListenerTarget::Element(form), EventKinds::CLICK, record(&log, "form"));

        assert_eq!(doc.click(Some(input)), 4);
        assert_eq!(*log.borrow(), vec!["input", "form", "body", "doc"]);
    }

    #[test]
    fn focus_reaches_only_the_target() {
        let (mut doc, _body, form, input) = page();
        let log: Log = Rc::default();
        doc.add_event_listener(ListenerTarget::Document, EventKinds::FOCUS, record(&log, "doc"));
        doc.add_event_listener(ListenerTarget::Element(form), EventKinds::FOCUS, record(&log, "form"));
        doc.add_event_listener(ListenerTarget::Element(input), EventKinds::FOCUS, record(&log, "input"));

        assert!(doc.focus(input));
        assert!(doc.focus(input), "refocus is a no-op that still reports focus");
        assert_eq!(*log.borrow(), vec!["input"]);
        assert!(!doc.focus(form), "a form is not focusable");
        assert_eq!(doc.focused(), Some(input));
    }

    #[test]
    fn missing_or_stale_target_reaches_document_only() {
        let (mut doc, _body, form, input) = page();
        let log: Log = Rc::default();
        doc.add_event_listener(ListenerTarget::Document, EventKinds::CLICK, record(&log, "doc"));
        doc.add_event_listener(ListenerTarget::Element(form), EventKinds::CLICK, record(&log, "form"));

        doc.click(None);
        doc.tree_mut().remove(input);
        doc.click(Some(input));
        assert_eq!(*log.borrow(), vec!["doc", "doc"]);
    }

    #[test]
    fn listener_removed_mid_dispatch_does_not_run() {
        let (mut doc, _body, _form, input) = page();
        let hits = Rc::new(Cell::new(0));
        let victim: Rc<Cell<Option<ListenerId>>> = Rc::default();

        let to_remove = Rc::clone(&victim);
        doc.add_event_listener(ListenerTarget::Document, EventKinds::CLICK, move |_, doc| {
            if let Some(id) = to_remove.get() {
                doc.remove_event_listener(id);
            }
        });
        let counter = Rc::clone(&hits);
        let id = doc.add_event_listener(ListenerTarget::Document, EventKinds::CLICK, move |_, _| {
            counter.set(counter.get() + 1);
        });
        victim.set(Some(id));

        assert_eq!(doc.click(Some(input)), 1);
        assert_eq!(hits.get(), 0);
        assert!(!doc.has_listener(id));
    }

    #[test]
    fn listener_added_mid_dispatch_waits_for_next_event() {
        let (mut doc, _body, _form, input) = page();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut armed = false;
        doc.add_event_listener(ListenerTarget::Document, EventKinds::CLICK, move |_, doc| {
            if armed {
                return;
            }
            armed = true;
            let counter = Rc::clone(&counter);
            doc.add_event_listener(ListenerTarget::Document, EventKinds::CLICK, move |_, _| {
                counter.set(counter.get() + 1);
            });
        });

        doc.click(Some(input));
        assert_eq!(hits.get(), 0);
        doc.click(Some(input));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn reentrant_dispatch_skips_running_handler() {
        let (mut doc, _body, _form, input) = page();
        let depth = Rc::new(Cell::new(0));
        let seen = Rc::clone(&depth);
        doc.add_event_listener(ListenerTarget::Document, EventKinds::CLICK, move |event, doc| {
            seen.set(seen.get() + 1);
            let nested = doc.dispatch(event);
            assert_eq!(nested, 0, "the running handler must not be re-entered");
        });
        doc.click(Some(input));
        assert_eq!(depth.get(), 1);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut doc = Document::new();
        let log: Rc<RefCell<Vec<u32>>> = Rc::default();
        for (delay, label) in [(30, 3), (10, 1), (20, 2), (10, 4)] {
            let log = Rc::clone(&log);
            doc.set_timeout(delay, move |_| log.borrow_mut().push(label));
        }
        assert_eq!(doc.advance_to(15), 2);
        assert_eq!(*log.borrow(), vec![1, 4]);
        assert_eq!(doc.advance_by(100), 2);
        assert_eq!(*log.borrow(), vec![1, 4, 2, 3]);
        assert_eq!(doc.pending_timers(), 0);
    }

    #[test]
    fn cleared_timer_never_fires_and_chained_timers_run() {
        let mut doc = Document::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let id = doc.set_timeout(5, move |_| counter.set(counter.get() + 100));
        assert!(doc.clear_timeout(id));
        assert!(!doc.clear_timeout(id));

        let counter = Rc::clone(&hits);
        doc.set_timeout(5, move |doc| {
            let counter = Rc::clone(&counter);
            doc.set_timeout(0, move |_| counter.set(counter.get() + 1));
        });
        assert_eq!(doc.advance_to(5), 2);
        assert_eq!(hits.get(), 1);
        assert!(!doc.timer_pending(id));
    }

    #[test]
    fn next_tick_runs_on_flush() {
        let mut doc = Document::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        doc.next_tick(move |doc| {
            counter.set(counter.get() + 1);
            let counter = Rc::clone(&counter);
            doc.next_tick(move |_| counter.set(counter.get() + 1));
        });
        assert_eq!(hits.get(), 0);
        assert_eq!(doc.flush_ticks(), 2);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn input_updates_text_and_bubbles() {
        let (mut doc, _body, form, input) = page();
        let log: Log = Rc::default();
        doc.add_event_listener(ListenerTarget::Element(form), EventKinds::INPUT, record(&log, "form"));
        assert_eq!(doc.input(input, "hello"), 1);
        assert_eq!(doc.tree().text(input), Some("hello"));
        assert!(doc.select(input));
        assert_eq!(doc.selected(), Some(input));
        assert!(!doc.select(form));
    }
}
