// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Select-on-focus: select an input's contents whenever it gains focus.

use understory_dom::{Document, EventKinds, ListenerId, ListenerTarget, NodeId};

use crate::binding::DirectiveBinding;
use crate::directive::Directive;

/// `v-select-on-focus`.
#[derive(Debug, Default)]
pub struct SelectOnFocus {
    listener: Option<ListenerId>,
}

impl Directive for SelectOnFocus {
    const NAME: &'static str = "select-on-focus";
    type Callback = ();

    fn mounted(&mut self, doc: &mut Document, element: NodeId, _: &DirectiveBinding<()>) {
        let id = doc.add_event_listener(
            ListenerTarget::Element(element),
            EventKinds::FOCUS,
            move |_, doc| {
                doc.select(element);
            },
        );
        if let Some(old) = self.listener.replace(id) {
            doc.remove_event_listener(old);
        }
    }

    fn unmounted(&mut self, doc: &mut Document, _: NodeId, _: &DirectiveBinding<()>) {
        if let Some(id) = self.listener.take() {
            doc.remove_event_listener(id);
        }
    }
}
