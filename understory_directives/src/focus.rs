// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus: give the element focus once it is mounted.

use understory_dom::{Document, NodeId};

use crate::binding::DirectiveBinding;
use crate::directive::Directive;

/// `v-focus`.
///
/// Focus is deferred to the next tick so the element is attached and laid out
/// first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Focus;

impl Directive for Focus {
    const NAME: &'static str = "focus";
    type Callback = ();

    fn mounted(&mut self, doc: &mut Document, element: NodeId, _: &DirectiveBinding<()>) {
        doc.next_tick(move |doc| {
            if !doc.focus(element) {
                log::debug!("v-focus: {element:?} cannot take focus");
            }
        });
    }
}
