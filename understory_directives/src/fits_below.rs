// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fits-below: report whether an element lies fully inside the viewport.

use kurbo::Rect;
use understory_dom::{Document, NodeId};

use crate::binding::{DirectiveBinding, VisibilityCallback};
use crate::directive::Directive;
use crate::error::{DirectiveError, report_misconfiguration};

/// Whether `element` lies vertically inside the viewport.
///
/// An element without a rectangle is treated as an empty box at the origin,
/// which fits.
pub fn fits_in_viewport(doc: &Document, element: NodeId) -> bool {
    let rect = doc.tree().bounds(element).unwrap_or(Rect::ZERO);
    rect.y0 >= 0.0 && rect.y1 <= doc.viewport().height
}

/// `v-fits-below`.
///
/// On mount the callback learns whether the element fits. On unmount it is
/// told `true` so callers can reset whatever they flipped.
#[derive(Clone, Copy, Debug, Default)]
pub struct FitsBelow;

impl Directive for FitsBelow {
    const NAME: &'static str = "fits-below";
    type Callback = VisibilityCallback;

    fn mounted(
        &mut self,
        doc: &mut Document,
        element: NodeId,
        binding: &DirectiveBinding<VisibilityCallback>,
    ) {
        let Some(callback) = binding.value.callback() else {
            let err = DirectiveError::NotCallable {
                directive: Self::NAME,
                expression: binding.expression.clone(),
                found: binding.value.kind_name(),
            };
            report_misconfiguration(&err, binding.instance.as_ref());
            return;
        };
        let visible = fits_in_viewport(doc, element);
        log::debug!("{element:?} fits below: {visible}");
        callback(visible);
    }

    fn unmounted(
        &mut self,
        _: &mut Document,
        _: NodeId,
        binding: &DirectiveBinding<VisibilityCallback>,
    ) {
        if let Some(callback) = binding.value.callback() {
            callback(true);
        }
    }
}
