// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed binding values handed to directives by the host.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::fmt;

use understory_dom::Event;

/// Callback receiving the event that triggered it.
pub type EventCallback = Rc<dyn Fn(&Event)>;

/// Callback receiving a visibility flag.
pub type VisibilityCallback = Rc<dyn Fn(bool)>;

/// Callback taking no arguments.
pub type ActionCallback = Rc<dyn Fn()>;

/// Wrap a closure as an [`EventCallback`].
pub fn event_callback(f: impl Fn(&Event) + 'static) -> EventCallback {
    Rc::new(f)
}

/// Wrap a closure as a [`VisibilityCallback`].
pub fn visibility_callback(f: impl Fn(bool) + 'static) -> VisibilityCallback {
    Rc::new(f)
}

/// Wrap a closure as an [`ActionCallback`].
pub fn action_callback(f: impl Fn() + 'static) -> ActionCallback {
    Rc::new(f)
}

/// A non-callable value a template may bind instead of a callback.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    /// `true` / `false`.
    Bool(bool),
    /// Any number.
    Number(f64),
    /// Any string.
    Text(String),
}

/// The value bound to a directive.
#[derive(Clone)]
pub enum BindingValue<F> {
    /// A callable value.
    Callback(F),
    /// Something that is not callable.
    Literal(Literal),
    /// Nothing was bound.
    Absent,
}

impl<F> BindingValue<F> {
    /// The callback, if this value is callable.
    pub fn callback(&self) -> Option<&F> {
        match self {
            Self::Callback(f) => Some(f),
            _ => None,
        }
    }

    /// Short name of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Callback(_) => "function",
            Self::Literal(Literal::Bool(_)) => "boolean",
            Self::Literal(Literal::Number(_)) => "number",
            Self::Literal(Literal::Text(_)) => "string",
            Self::Absent => "undefined",
        }
    }
}

impl<F> fmt::Debug for BindingValue<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("Callback(..)"),
            Self::Literal(l) => f.debug_tuple("Literal").field(l).finish(),
            Self::Absent => f.write_str("Absent"),
        }
    }
}

/// The component a binding belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentInstance {
    /// Component name, when the host knows it.
    pub name: Option<String>,
}

impl ComponentInstance {
    /// An instance with a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// Everything the host passes to a directive hook.
///
/// `F` is the callback type the directive expects; directives that ignore the
/// value use `()`.
#[derive(Clone)]
pub struct DirectiveBinding<F> {
    /// Bound value.
    pub value: BindingValue<F>,
    /// Argument after the colon, e.g. `500` in `v-long-click:500`.
    pub arg: Option<String>,
    /// Source text of the bound expression.
    pub expression: Option<String>,
    /// Owning component.
    pub instance: Option<ComponentInstance>,
}

impl<F> DirectiveBinding<F> {
    /// A binding holding `value` and nothing else.
    pub fn new(value: BindingValue<F>) -> Self {
        Self {
            value,
            arg: None,
            expression: None,
            instance: None,
        }
    }

    /// A binding with a callable value.
    pub fn from_callback(callback: F) -> Self {
        Self::new(BindingValue::Callback(callback))
    }

    /// A binding with a non-callable value.
    pub fn from_literal(literal: Literal) -> Self {
        Self::new(BindingValue::Literal(literal))
    }

    /// A binding with no value.
    pub fn empty() -> Self {
        Self::new(BindingValue::Absent)
    }

    /// Set the argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    /// Set the source expression.
    #[must_use]
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }

    /// Set the owning component.
    #[must_use]
    pub fn with_instance(mut self, instance: ComponentInstance) -> Self {
        self.instance = Some(instance);
        self
    }

    /// Name of the owning component, if known.
    pub fn owner_name(&self) -> Option<&str> {
        self.instance.as_ref().and_then(|i| i.name.as_deref())
    }
}

impl<F> fmt::Debug for DirectiveBinding<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectiveBinding")
            .field("value", &self.value)
            .field("arg", &self.arg)
            .field("expression", &self.expression)
            .field("instance", &self.instance)
            .finish()
    }
}

/// Parse `s` as an integer only if it is written in canonical form.
///
/// Canonical means the integer prints back to exactly `s`: no sign on
/// positive values, no leading zeros, no whitespace, no fraction.
///
/// ```
/// use understory_directives::binding::parse_canonical_int;
///
/// assert_eq!(parse_canonical_int("500"), Some(500));
/// assert_eq!(parse_canonical_int("-3"), Some(-3));
/// assert_eq!(parse_canonical_int("0500"), None);
/// assert_eq!(parse_canonical_int("5.0"), None);
/// ```
pub fn parse_canonical_int(s: &str) -> Option<i64> {
    let n: i64 = s.parse().ok()?;
    (n.to_string() == s).then_some(n)
}
