// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The directive hook contract and a lifecycle driver for it.

use core::fmt;

use understory_dom::{Document, NodeId};

use crate::binding::DirectiveBinding;

/// Behavior attached to one element for the element's lifetime.
///
/// The host calls `before_mount` and `mounted` once when the element is
/// inserted, `updated` after each re-render, and `unmounted` once when the
/// element is removed. Every hook defaults to doing nothing.
///
/// A value implementing this trait holds the per-binding state (listener ids,
/// timers); create one per bound element.
pub trait Directive {
    /// Name used in diagnostics, without the `v-` prefix.
    const NAME: &'static str;

    /// Callback type expected in the binding value.
    type Callback;

    /// Called before the element is inserted.
    fn before_mount(
        &mut self,
        _doc: &mut Document,
        _element: NodeId,
        _binding: &DirectiveBinding<Self::Callback>,
    ) {
    }

    /// Called after the element is inserted.
    fn mounted(
        &mut self,
        _doc: &mut Document,
        _element: NodeId,
        _binding: &DirectiveBinding<Self::Callback>,
    ) {
    }

    /// Called after the element's content changed.
    fn updated(
        &mut self,
        _doc: &mut Document,
        _element: NodeId,
        _binding: &DirectiveBinding<Self::Callback>,
    ) {
    }

    /// Called once when the element is removed.
    fn unmounted(
        &mut self,
        _doc: &mut Document,
        _element: NodeId,
        _binding: &DirectiveBinding<Self::Callback>,
    ) {
    }
}

/// A directive bound to an element, driven through its lifecycle.
///
/// ```
/// use understory_directives::{DirectiveBinding, Focus, Mounted};
/// use understory_dom::{Document, ElementData};
///
/// let mut doc = Document::new();
/// let body = doc.tree_mut().insert(None, ElementData::new("body"));
/// let input = doc.tree_mut().insert(Some(body), ElementData::new("input"));
///
/// let bound = Mounted::mount(&mut doc, input, Focus, DirectiveBinding::empty());
/// doc.flush_ticks();
/// assert_eq!(doc.focused(), Some(input));
/// bound.unmount(&mut doc);
/// ```
pub struct Mounted<D: Directive> {
    directive: D,
    element: NodeId,
    binding: DirectiveBinding<D::Callback>,
}

impl<D: Directive> Mounted<D> {
    /// Run `before_mount` then `mounted`.
    pub fn mount(
        doc: &mut Document,
        element: NodeId,
        mut directive: D,
        binding: DirectiveBinding<D::Callback>,
    ) -> Self {
        log::debug!("mounting v-{} on {element:?}", D::NAME);
        directive.before_mount(doc, element, &binding);
        directive.mounted(doc, element, &binding);
        Self {
            directive,
            element,
            binding,
        }
    }

    /// Run `updated` with the current binding.
    pub fn update(&mut self, doc: &mut Document) {
        self.directive.updated(doc, self.element, &self.binding);
    }

    /// Replace the binding, then run `updated`.
    pub fn rebind(&mut self, doc: &mut Document, binding: DirectiveBinding<D::Callback>) {
        self.binding = binding;
        self.update(doc);
    }

    /// Run `unmounted` and hand back the directive.
    pub fn unmount(mut self, doc: &mut Document) -> D {
        log::debug!("unmounting v-{} from {:?}", D::NAME, self.element);
        self.directive.unmounted(doc, self.element, &self.binding);
        self.directive
    }

    /// The bound element.
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// The directive state.
    pub fn directive(&self) -> &D {
        &self.directive
    }

    /// The current binding.
    pub fn binding(&self) -> &DirectiveBinding<D::Callback> {
        &self.binding
    }
}

impl<D: Directive + fmt::Debug> fmt::Debug for Mounted<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mounted")
            .field("directive", &self.directive)
            .field("element", &self.element)
            .field("binding", &self.binding)
            .finish()
    }
}
