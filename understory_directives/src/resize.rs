// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize: grow an input's width to fit its content.

use alloc::format;
use alloc::string::ToString;

use understory_dom::{Document, EventKinds, ListenerId, ListenerTarget, NodeId, Tree};

use crate::binding::{DirectiveBinding, parse_canonical_int};
use crate::directive::Directive;
use crate::error::{DirectiveError, report_misconfiguration};

/// Sizing parameters for [`Resize`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeConfig {
    /// Width used when the content is narrower than this, in px.
    pub min_width: f64,
    /// Added to the content width, in px.
    pub padding: f64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            min_width: 10.0,
            padding: 4.0,
        }
    }
}

impl ResizeConfig {
    /// Build from the directive argument, if any.
    ///
    /// The argument, when present, is the minimum width and must be a
    /// canonical integer.
    pub fn from_arg(arg: Option<&str>) -> Result<Self, DirectiveError> {
        let Some(arg) = arg else {
            return Ok(Self::default());
        };
        let min_width = parse_canonical_int(arg).ok_or_else(|| DirectiveError::InvalidArgument {
            directive: Resize::NAME,
            arg: arg.to_string(),
        })?;
        Ok(Self {
            min_width: min_width as f64,
            ..Self::default()
        })
    }

    /// Width for content `scroll_width` px wide.
    pub fn width_for(&self, scroll_width: f64) -> f64 {
        if scroll_width > self.min_width {
            scroll_width + self.padding
        } else {
            self.min_width
        }
    }
}

/// Collapse `element`, measure its content, and set its width in px.
pub fn resize_to_content(tree: &mut Tree, element: NodeId, config: &ResizeConfig) {
    tree.set_style_property(element, "width", "0");
    let scroll_width = tree.scroll_width(element).unwrap_or(0.0);
    let width = config.width_for(scroll_width);
    tree.set_style_property(element, "width", &format!("{width}px"));
}

/// `v-resize`.
#[derive(Debug, Default)]
pub struct Resize {
    listener: Option<ListenerId>,
}

impl Directive for Resize {
    const NAME: &'static str = "resize";
    type Callback = ();

    fn mounted(&mut self, doc: &mut Document, element: NodeId, binding: &DirectiveBinding<()>) {
        let config = match ResizeConfig::from_arg(binding.arg.as_deref()) {
            Ok(config) => config,
            Err(err) => {
                report_misconfiguration(&err, binding.instance.as_ref());
                return;
            }
        };
        resize_to_content(doc.tree_mut(), element, &config);
        let id = doc.add_event_listener(
            ListenerTarget::Element(element),
            EventKinds::INPUT,
            move |_, doc| resize_to_content(doc.tree_mut(), element, &config),
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
