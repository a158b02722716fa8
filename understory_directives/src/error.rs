// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misconfiguration errors and how they are reported.

use alloc::string::String;

use crate::binding::ComponentInstance;

/// A binding a directive cannot work with.
///
/// Directives never surface these to the caller: they are reported with
/// [`report_misconfiguration`] and the directive stays inert.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// The bound value is not a callback.
    #[error("provided expression{} must be a function, found {found}", quoted(.expression))]
    NotCallable {
        /// Directive name without the `v-` prefix.
        directive: &'static str,
        /// Source text of the bound expression, if known.
        expression: Option<String>,
        /// Kind of the value that was bound instead.
        found: &'static str,
    },
    /// The directive needs an argument and none was given.
    #[error("an argument is required")]
    MissingArgument {
        /// Directive name without the `v-` prefix.
        directive: &'static str,
    },
    /// The argument is not a canonical integer.
    #[error("provided argument '{arg}' must be a number")]
    InvalidArgument {
        /// Directive name without the `v-` prefix.
        directive: &'static str,
        /// The argument as written.
        arg: String,
    },
    /// A required element is not inside the bound element.
    #[error("no `{selector}` element inside the bound element")]
    MissingElement {
        /// Directive name without the `v-` prefix.
        directive: &'static str,
        /// Tag that was looked for.
        selector: &'static str,
    },
}

impl DirectiveError {
    /// Name of the directive that rejected its binding.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::NotCallable { directive, .. }
            | Self::MissingArgument { directive }
            | Self::InvalidArgument { directive, .. }
            | Self::MissingElement { directive, .. } => directive,
        }
    }
}

fn quoted(expression: &Option<String>) -> String {
    match expression {
        Some(e) => alloc::format!(" '{e}'"),
        None => String::new(),
    }
}

/// Emit a single warning describing `err`.
///
/// The line reads `[v-<directive>:] <message>`, followed by
/// ` Found in component '<name>'.` when the owning component has a name.
pub fn report_misconfiguration(err: &DirectiveError, instance: Option<&ComponentInstance>) {
    match instance.and_then(|i| i.name.as_deref()) {
        Some(name) => log::warn!(
            "[v-{}:] {err}. Found in component '{name}'.",
            err.directive()
        ),
        None => log::warn!("[v-{}:] {err}.", err.directive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_log;
    use alloc::string::ToString;

    #[test]
    fn messages() {
        let err = DirectiveError::NotCallable {
            directive: "long-click",
            expression: Some("onHold".into()),
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "provided expression 'onHold' must be a function, found string"
        );
        let err = DirectiveError::NotCallable {
            directive: "click-outside",
            expression: None,
            found: "undefined",
        };
        assert_eq!(
            err.to_string(),
            "provided expression must be a function, found undefined"
        );
        let err = DirectiveError::InvalidArgument {
            directive: "resize",
            arg: "wide".into(),
        };
        assert_eq!(err.to_string(), "provided argument 'wide' must be a number");
        assert_eq!(err.directive(), "resize");
    }

    #[test]
    fn report_names_the_component() {
        test_log::capture();
        let err = DirectiveError::MissingArgument {
            directive: "long-click",
        };
        report_misconfiguration(&err, Some(&ComponentInstance::named("Toolbar")));
        report_misconfiguration(&err, Some(&ComponentInstance::default()));
        assert_eq!(
            test_log::warnings(),
            [
                "[v-long-click:] an argument is required. Found in component 'Toolbar'.",
                "[v-long-click:] an argument is required.",
            ]
        );
    }
}
