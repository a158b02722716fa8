// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads delivered to listeners.

use crate::types::NodeId;

/// Mouse button identifier, using DOM numbering (`0` is the primary button).
pub type Button = u8;

/// The primary (usually left) mouse button.
pub const PRIMARY_BUTTON: Button = 0;

/// Kind of a dispatched event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A completed click.
    Click,
    /// A mouse button went down.
    MouseDown,
    /// The pointer left an element.
    MouseOut,
    /// A touch began.
    TouchStart,
    /// A touch ended.
    TouchEnd,
    /// A touch was canceled by the platform.
    TouchCancel,
    /// An element received focus.
    Focus,
    /// An editable element's value changed.
    Input,
}

impl EventKind {
    /// Returns `true` if events of this kind propagate from the target to its
    /// ancestors and then to document listeners.
    pub const fn bubbles(self) -> bool {
        !matches!(self, Self::Focus)
    }

    /// Returns `true` for mouse events, which carry a [`Button`].
    pub const fn is_mouse(self) -> bool {
        matches!(self, Self::Click | Self::MouseDown | Self::MouseOut)
    }
}

bitflags::bitflags! {
    /// A set of [`EventKind`]s a listener subscribes to.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventKinds: u16 {
        /// [`EventKind::Click`].
        const CLICK        = 1 << 0;
        /// [`EventKind::MouseDown`].
        const MOUSE_DOWN   = 1 << 1;
        /// [`EventKind::MouseOut`].
        const MOUSE_OUT    = 1 << 2;
        /// [`EventKind::TouchStart`].
        const TOUCH_START  = 1 << 3;
        /// [`EventKind::TouchEnd`].
        const TOUCH_END    = 1 << 4;
        /// [`EventKind::TouchCancel`].
        const TOUCH_CANCEL = 1 << 5;
        /// [`EventKind::Focus`].
        const FOCUS        = 1 << 6;
        /// [`EventKind::Input`].
        const INPUT        = 1 << 7;
    }
}

impl From<EventKind> for EventKinds {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Click => Self::CLICK,
            EventKind::MouseDown => Self::MOUSE_DOWN,
            EventKind::MouseOut => Self::MOUSE_OUT,
            EventKind::TouchStart => Self::TOUCH_START,
            EventKind::TouchEnd => Self::TOUCH_END,
            EventKind::TouchCancel => Self::TOUCH_CANCEL,
            EventKind::Focus => Self::FOCUS,
            EventKind::Input => Self::INPUT,
        }
    }
}

/// An event dispatched through a [`Document`](crate::Document).
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Element the event originated on. `None` for events without a target
    /// element (for example a click on the document itself).
    pub target: Option<NodeId>,
    /// Button for mouse events.
    pub button: Option<Button>,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

impl Event {
    /// Create an event with no button and a zero timestamp.
    pub fn new(kind: EventKind, target: Option<NodeId>) -> Self {
        Self {
            kind,
            target,
            button: None,
            timestamp: 0,
        }
    }

    /// Set the button.
    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = Some(button);
        self
    }

    /// Set the timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns `true` for mouse events pressed with something other than the
    /// primary button. Events without a button report `false`.
    pub fn is_secondary_button(&self) -> bool {
        self.kind.is_mouse() && self.button.is_some_and(|b| b != PRIMARY_BUTTON)
    }
}
