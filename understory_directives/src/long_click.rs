// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long-click: call back when the element is held down for a while.
//!
//! Pressing (mouse-down with the primary button, or touch-start) arms a timer
//! for the configured duration. Releasing, leaving the element, or a
//! cancelled touch disarms it. If the timer fires first, the callback runs.
//!
//! A fired timer stays armed until the next end event, so holding the element
//! longer never triggers the callback twice.

use alloc::rc::Rc;
use alloc::string::ToString;
use core::cell::Cell;

use understory_dom::{Document, EventKinds, ListenerId, ListenerTarget, NodeId, TimerId};

use crate::binding::{ActionCallback, DirectiveBinding, parse_canonical_int};
use crate::directive::Directive;
use crate::error::{DirectiveError, report_misconfiguration};

/// Events that arm the timer.
pub const START_EVENTS: EventKinds = EventKinds::MOUSE_DOWN.union(EventKinds::TOUCH_START);

/// Events that disarm the timer.
pub const END_EVENTS: EventKinds = EventKinds::CLICK
    .union(EventKinds::MOUSE_OUT)
    .union(EventKinds::TOUCH_END)
    .union(EventKinds::TOUCH_CANCEL);

/// Validated long-click configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongClickConfig {
    /// How long the element must be held, in ms.
    pub duration: u64,
}

impl LongClickConfig {
    /// Build from the directive argument, which must be a canonical integer.
    ///
    /// Negative durations are clamped to zero.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, DirectiveError> {
        let arg = arg.ok_or(DirectiveError::MissingArgument {
            directive: LongClick::NAME,
        })?;
        let n = parse_canonical_int(arg).ok_or_else(|| DirectiveError::InvalidArgument {
            directive: LongClick::NAME,
            arg: arg.to_string(),
        })?;
        Ok(Self {
            duration: u64::try_from(n).unwrap_or(0),
        })
    }
}

/// `v-long-click:<ms>`.
#[derive(Debug, Default)]
pub struct LongClick {
    start: Option<ListenerId>,
    end: Option<ListenerId>,
    timer: Rc<Cell<Option<TimerId>>>,
}

impl LongClick {
    /// Whether a timer is currently armed.
    pub fn is_armed(&self) -> bool {
        self.timer.get().is_some()
    }

    fn remove_listeners(&mut self, doc: &mut Document) {
        for id in [self.start.take(), self.end.take()].into_iter().flatten() {
            doc.remove_event_listener(id);
        }
    }
}

impl Directive for LongClick {
    const NAME: &'static str = "long-click";
    type Callback = ActionCallback;

    fn before_mount(
        &mut self,
        doc: &mut Document,
        element: NodeId,
        binding: &DirectiveBinding<ActionCallback>,
    ) {
        let validated = binding
            .value
            .callback()
            .ok_or_else(|| DirectiveError::NotCallable {
                directive: Self::NAME,
                expression: binding.expression.clone(),
                found: binding.value.kind_name(),
            })
            .and_then(|cb| Ok((Rc::clone(cb), LongClickConfig::from_arg(binding.arg.as_deref())?)));
        let (callback, config) = match validated {
            Ok(v) => v,
            Err(err) => {
                report_misconfiguration(&err, binding.instance.as_ref());
                return;
            }
        };
        self.remove_listeners(doc);

        let timer = Rc::clone(&self.timer);
        let start = doc.add_event_listener(
            ListenerTarget::Element(element),
            START_EVENTS,
            move |event, doc| {
                if event.is_secondary_button() || timer.get().is_some() {
                    return;
                }
                let cb = Rc::clone(&callback);
                let id = doc.set_timeout(config.duration, move |_| {
                    log::debug!("long click on {element:?}");
                    cb();
                });
                timer.set(Some(id));
            },
        );
        let timer = Rc::clone(&self.timer);
        let end = doc.add_event_listener(
            ListenerTarget::Element(element),
            END_EVENTS,
            move |_, doc| {
                if let Some(id) = timer.take() {
                    doc.clear_timeout(id);
                }
            },
        );
        self.start = Some(start);
        self.end = Some(end);
    }

    fn unmounted(&mut self, doc: &mut Document, _: NodeId, _: &DirectiveBinding<ActionCallback>) {
        self.remove_listeners(doc);
        if let Some(id) = self.timer.take() {
            doc.clear_timeout(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{ComponentInstance, action_callback};
    use crate::directive::Mounted;
    use crate::test_log;
    use understory_dom::{ElementData, Event, EventKind};

    fn setup(arg: &str) -> (Document, NodeId, Rc<Cell<u32>>, Mounted<LongClick>) {
        let mut doc = Document::new();
        let body = doc.tree_mut().insert(None, ElementData::new("body"));
        let button = doc.tree_mut().insert(Some(body), ElementData::new("button"));
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let binding = DirectiveBinding::from_callback(action_callback(move || h.set(h.get() + 1))).with_arg(arg);
        let bound = Mounted::mount(&mut doc, button, LongClick::default(), binding);
        (doc, button, hits, bound)
    }

    #[test]
    fn fires_after_duration_not_before() {
        let (mut doc, button, hits, bound) = setup("500");
        doc.fire(EventKind::MouseDown, Some(button));
        assert!(bound.directive().is_armed());
        doc.advance_to(499);
        assert_eq!(hits.get(), 0);
        doc.advance_to(500);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn release_disarms() {
        let (mut doc, button, hits, bound) = setup("500");
        doc.fire(EventKind::TouchStart, Some(button));
        doc.advance_by(200);
        doc.fire(EventKind::TouchEnd, Some(button));
        assert!(!bound.directive().is_armed());
        doc.advance_by(1000);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn secondary_button_is_ignored() {
        let (mut doc, button, hits, bound) = setup("100");
        doc.dispatch(&Event::new(EventKind::MouseDown, Some(button)).with_button(2));
        assert!(!bound.directive().is_armed());
        doc.advance_by(1000);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn holding_longer_fires_once_and_rearms_after_release() {
        let (mut doc, button, hits, _bound) = setup("100");
        doc.fire(EventKind::MouseDown, Some(button));
        doc.advance_by(100);
        doc.fire(EventKind::MouseDown, Some(button));
        doc.advance_by(500);
        assert_eq!(hits.get(), 1, "still armed from the first press");

        doc.click(Some(button));
        doc.fire(EventKind::MouseDown, Some(button));
        doc.advance_by(100);
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn unmount_removes_listeners_and_pending_timer() {
        let (mut doc, button, hits, bound) = setup("300");
        doc.fire(EventKind::MouseDown, Some(button));
        assert_eq!(doc.pending_timers(), 1);
        bound.unmount(&mut doc);
        assert_eq!(doc.pending_timers(), 0);
        assert!(doc.listeners().is_empty());
        doc.fire(EventKind::MouseDown, Some(button));
        doc.advance_by(1000);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn argument_must_be_canonical() {
        assert_eq!(LongClickConfig::from_arg(Some("250")), Ok(LongClickConfig { duration: 250 }));
        assert_eq!(LongClickConfig::from_arg(Some("-5")), Ok(LongClickConfig { duration: 0 }));
        assert!(matches!(
            LongClickConfig::from_arg(Some("0250")),
            Err(DirectiveError::InvalidArgument { .. })
        ));
        assert!(matches!(
            LongClickConfig::from_arg(None),
            Err(DirectiveError::MissingArgument { .. })
        ));
    }

    #[test]
    fn misconfiguration_warns_once_and_registers_nothing() {
        test_log::capture();
        let mut doc = Document::new();
        let button = doc.tree_mut().insert(None, ElementData::new("button"));
        let binding = DirectiveBinding::<ActionCallback>::empty()
            .with_arg("500")
            .with_expression("onHold")
            .with_instance(ComponentInstance::named("Toolbar"));
        let _bound = Mounted::mount(&mut doc, button, LongClick::default(), binding);
        assert!(doc.listeners().is_empty());

        let cb = action_callback(|| {});
        let binding = DirectiveBinding::from_callback(cb).with_arg("half a second");
        let _bound = Mounted::mount(&mut doc, button, LongClick::default(), binding);
        assert!(doc.listeners().is_empty());

        assert_eq!(
            test_log::warnings(),
            [
                "[v-long-click:] provided expression 'onHold' must be a function, found undefined. Found in component 'Toolbar'.",
                "[v-long-click:] provided argument 'half a second' must be a number.",
            ]
        );
    }
}
