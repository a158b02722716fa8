// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-outside: call back when a click lands outside the bound element.
//!
//! Each binding owns one document-level click listener. On every click the
//! listener asks [`understory_outside::classify`] whether the target is
//! outside the reference element (overlays drawn above it count as inside)
//! and calls the callback only when it is.
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use understory_directives::binding::event_callback;
//! use understory_directives::click_outside::{attach, detach};
//! use understory_directives::DirectiveBinding;
//! use understory_dom::{Document, ElementData};
//!
//! let mut doc = Document::new();
//! let body = doc.tree_mut().insert(None, ElementData::new("body"));
//! let menu = doc.tree_mut().insert(Some(body), ElementData::new("div"));
//! let other = doc.tree_mut().insert(Some(body), ElementData::new("div"));
//!
//! let closed = Rc::new(Cell::new(0));
//! let c = Rc::clone(&closed);
//! let binding = DirectiveBinding::from_callback(event_callback(move |_| c.set(c.get() + 1)));
//! let mut handle = attach(&mut doc, menu, &binding);
//!
//! doc.click(Some(menu));
//! doc.click(Some(other));
//! assert_eq!(closed.get(), 1);
//!
//! detach(&mut doc, &mut handle);
//! doc.click(Some(other));
//! assert_eq!(closed.get(), 1);
//! ```

use alloc::rc::Rc;
use alloc::string::String;

use understory_dom::{Document, EventKinds, ListenerId, ListenerTarget, NodeId};
use understory_outside::classify;

use crate::binding::{DirectiveBinding, EventCallback};
use crate::directive::Directive;
use crate::error::{DirectiveError, report_misconfiguration};

/// Validated click-outside configuration.
#[derive(Clone)]
pub struct OutsideClickConfig {
    /// Called with the click event when the click is outside.
    pub callback: EventCallback,
    /// Owning component, for diagnostics.
    pub owner_name: Option<String>,
}

impl OutsideClickConfig {
    /// Check that `binding` holds a callback.
    pub fn from_binding(binding: &DirectiveBinding<EventCallback>) -> Result<Self, DirectiveError> {
        match binding.value.callback() {
            Some(callback) => Ok(Self {
                callback: Rc::clone(callback),
                owner_name: binding.owner_name().map(String::from),
            }),
            None => Err(DirectiveError::NotCallable {
                directive: ClickOutside::NAME,
                expression: binding.expression.clone(),
                found: binding.value.kind_name(),
            }),
        }
    }
}

impl core::fmt::Debug for OutsideClickConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OutsideClickConfig")
            .field("callback", &"..")
            .field("owner_name", &self.owner_name)
            .finish()
    }
}

/// Subscription returned by [`attach`].
///
/// Inert when the binding was rejected or after [`detach`].
#[derive(Debug, Default)]
pub struct BindingHandle {
    listener: Option<ListenerId>,
}

impl BindingHandle {
    /// Whether this handle still owns a listener.
    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// The owned document listener.
    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }
}

/// Register a document click listener for `reference`.
///
/// A binding without a callback is reported as a warning and yields an
/// inert handle.
pub fn attach(
    doc: &mut Document,
    reference: NodeId,
    binding: &DirectiveBinding<EventCallback>,
) -> BindingHandle {
    match OutsideClickConfig::from_binding(binding) {
        Ok(config) => attach_config(doc, reference, config),
        Err(err) => {
            report_misconfiguration(&err, binding.instance.as_ref());
            BindingHandle::default()
        }
    }
}

/// Register a document click listener for `reference` with a validated config.
pub fn attach_config(doc: &mut Document, reference: NodeId, config: OutsideClickConfig) -> BindingHandle {
    let OutsideClickConfig {
        callback,
        owner_name,
    } = config;
    let listener = doc.add_event_listener(
        ListenerTarget::Document,
        EventKinds::CLICK,
        move |event, doc| {
            if !doc.tree().is_alive(reference) {
                log::debug!("click-outside reference {reference:?} is gone; skipping");
                return;
            }
            let verdict = classify(doc.tree(), reference, event.target);
            log::trace!(
                "click on {:?} against {reference:?}: {verdict:?}",
                event.target
            );
            if verdict.is_outside() {
                log::debug!(
                    "outside click for {reference:?} (component {})",
                    owner_name.as_deref().unwrap_or("<anonymous>")
                );
                callback(event);
            }
        },
    );
    BindingHandle {
        listener: Some(listener),
    }
}

/// Remove the listener owned by `handle`. Calling it again does nothing.
pub fn detach(doc: &mut Document, handle: &mut BindingHandle) {
    if let Some(id) = handle.listener.take() {
        doc.remove_event_listener(id);
    }
}

/// `v-click-outside`.
#[derive(Debug, Default)]
pub struct ClickOutside {
    handle: BindingHandle,
}

impl ClickOutside {
    /// The current subscription.
    pub fn handle(&self) -> &BindingHandle {
        &self.handle
    }
}

impl Directive for ClickOutside {
    const NAME: &'static str = "click-outside";
    type Callback = EventCallback;

    fn before_mount(
        &mut self,
        doc: &mut Document,
        element: NodeId,
        binding: &DirectiveBinding<EventCallback>,
    ) {
        detach(doc, &mut self.handle);
        self.handle = attach(doc, element, binding);
    }

    fn unmounted(&mut self, doc: &mut Document, _: NodeId, _: &DirectiveBinding<EventCallback>) {
        detach(doc, &mut self.handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{ComponentInstance, Literal, event_callback};
    use crate::directive::Mounted;
    use crate::test_log;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Rect;
    use understory_dom::{ElementData, Event, EventKind};

    fn counter() -> (Rc<Cell<u32>>, DirectiveBinding<EventCallback>) {
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let binding = DirectiveBinding::from_callback(event_callback(move |_| h.set(h.get() + 1)));
        (hits, binding)
    }

    /// `body > (#app > trigger, dropdown[z=10] > item)`, dropdown drawn over the trigger.
    fn portal_scene(doc: &mut Document) -> [NodeId; 5] {
        let t = doc.tree_mut();
        let body = t.insert(None, ElementData::new("body").with_bounds(Rect::new(0.0, 0.0, 1024.0, 768.0)));
        let app = t.insert(Some(body), ElementData::new("div").with_bounds(Rect::new(0.0, 0.0, 1024.0, 768.0)));
        let trigger = t.insert(Some(app), ElementData::new("button").with_bounds(Rect::new(10.0, 10.0, 110.0, 40.0)));
        let dropdown = t.insert(
            Some(body),
            ElementData::new("div")
                .with_bounds(Rect::new(10.0, 30.0, 210.0, 240.0))
                .with_style("z-index", "10"),
        );
        let item = t.insert(Some(dropdown), ElementData::new("a").with_bounds(Rect::new(10.0, 30.0, 210.0, 70.0)));
        [body, app, trigger, dropdown, item]
    }

    #[test]
    fn callback_runs_only_for_outside_clicks() {
        let mut doc = Document::new();
        let [body, app, trigger, dropdown, item] = portal_scene(&mut doc);
        let (hits, binding) = counter();
        let handle = attach(&mut doc, dropdown, &binding);
        assert!(handle.is_active());

        doc.click(Some(dropdown));
        doc.click(Some(item));
        assert_eq!(hits.get(), 0, "clicks on the dropdown itself are inside");

        doc.click(Some(trigger));
        doc.click(Some(app));
        doc.click(Some(body));
        doc.click(None);
        assert_eq!(hits.get(), 4);
    }

    #[test]
    fn callback_receives_the_click_event() {
        let mut doc = Document::new();
        let [_, _, trigger, dropdown, _] = portal_scene(&mut doc);
        let seen: Rc<RefCell<Vec<Option<NodeId>>>> = Rc::default();
        let s = Rc::clone(&seen);
        let binding = DirectiveBinding::from_callback(event_callback(move |e: &Event| {
            assert_eq!(e.kind, EventKind::Click, "only clicks reach the callback");
            s.borrow_mut().push(e.target);
        }));
        attach(&mut doc, dropdown, &binding);
        doc.fire(EventKind::MouseDown, Some(trigger));
        doc.click(Some(trigger));
        assert_eq!(*seen.borrow(), [Some(trigger)]);
    }

    #[test]
    fn overlay_over_reference_is_inside() {
        let mut doc = Document::new();
        let [_, _, trigger, _, item] = portal_scene(&mut doc);
        let (hits, binding) = counter();
        attach(&mut doc, trigger, &binding);
        doc.click(Some(item));
        assert_eq!(hits.get(), 0, "the portaled menu is drawn over the trigger");
    }

    #[test]
    fn detach_is_idempotent() {
        let mut doc = Document::new();
        let [body, _, _, dropdown, _] = portal_scene(&mut doc);
        let (hits, binding) = counter();
        let mut handle = attach(&mut doc, dropdown, &binding);
        assert_eq!(doc.listeners().len(), 1);

        detach(&mut doc, &mut handle);
        assert!(!handle.is_active());
        assert!(doc.listeners().is_empty());
        detach(&mut doc, &mut handle);
        assert!(doc.listeners().is_empty());

        doc.click(Some(body));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn each_binding_owns_one_listener() {
        let mut doc = Document::new();
        let [body, _, trigger, dropdown, _] = portal_scene(&mut doc);
        let (a_hits, a) = counter();
        let (b_hits, b) = counter();
        let mut ha = attach(&mut doc, dropdown, &a);
        let _hb = attach(&mut doc, trigger, &b);
        assert_eq!(doc.listeners().count_for(ListenerTarget::Document), 2);

        doc.click(Some(body));
        assert_eq!((a_hits.get(), b_hits.get()), (1, 1));

        detach(&mut doc, &mut ha);
        doc.click(Some(body));
        assert_eq!((a_hits.get(), b_hits.get()), (1, 2));
    }

    #[test]
    fn non_callable_value_warns_once_and_stays_inert() {
        test_log::capture();
        let mut doc = Document::new();
        let [body, _, _, dropdown, _] = portal_scene(&mut doc);
        let binding = DirectiveBinding::<EventCallback>::from_literal(Literal::Text("close".into()))
            .with_instance(ComponentInstance::named("UserMenu"));
        let handle = attach(&mut doc, dropdown, &binding);
        assert!(!handle.is_active());
        assert!(doc.listeners().is_empty());
        doc.click(Some(body));

        let warnings = test_log::warnings();
        assert_eq!(warnings.len(), 1, "exactly one diagnostic: {warnings:?}");
        assert!(warnings[0].starts_with("[v-click-outside:] "));
        assert!(warnings[0].ends_with(" Found in component 'UserMenu'."));
    }

    #[test]
    fn removed_reference_never_calls_back() {
        let mut doc = Document::new();
        let [body, _, _, dropdown, _] = portal_scene(&mut doc);
        let (hits, binding) = counter();
        let _handle = attach(&mut doc, dropdown, &binding);
        doc.tree_mut().remove(dropdown);
        doc.click(Some(body));
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn detach_during_dispatch_suppresses_later_listener() {
        let mut doc = Document::new();
        let [body, _, _, dropdown, _] = portal_scene(&mut doc);
        let (hits, binding) = counter();
        let handle = Rc::new(RefCell::new(BindingHandle::default()));

        // Registered first, so it runs before the click-outside listener.
        let h = Rc::clone(&handle);
        doc.add_event_listener(ListenerTarget::Document, EventKinds::CLICK, move |_, doc| {
            detach(doc, &mut h.borrow_mut());
        });
        *handle.borrow_mut() = attach(&mut doc, dropdown, &binding);

        doc.click(Some(body));
        assert_eq!(hits.get(), 0, "detached before its turn in the same dispatch");
    }

    #[test]
    fn directive_lifecycle_attaches_and_detaches() {
        let mut doc = Document::new();
        let [body, _, _, dropdown, _] = portal_scene(&mut doc);
        let (hits, binding) = counter();
        let bound = Mounted::mount(&mut doc, dropdown, ClickOutside::default(), binding);
        assert!(bound.directive().handle().is_active());

        doc.click(Some(body));
        assert_eq!(hits.get(), 1);

        let directive = bound.unmount(&mut doc);
        assert!(!directive.handle().is_active());
        assert!(doc.listeners().is_empty());
        doc.click(Some(body));
        assert_eq!(hits.get(), 1);
    }
}
