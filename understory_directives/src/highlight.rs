// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Highlight: syntax-highlight the code block inside the bound element.
//!
//! The directive finds the first `code` descendant, runs a [`Highlighter`]
//! over its text, and writes the result back as inner markup made of escaped
//! text and `<span class="hljs-…">` wrappers. The code element gains the
//! `hljs` class.

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use understory_dom::{Document, NodeId};

use crate::binding::DirectiveBinding;
use crate::directive::Directive;
use crate::error::{DirectiveError, report_misconfiguration};

/// Tag the directive looks for.
pub const CODE_SELECTOR: &str = "code";

/// Class added to a highlighted code element.
pub const HIGHLIGHTED_CLASS: &str = "hljs";

/// A classified byte range of source text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HighlightSpan {
    /// Byte range in the source. Must lie on `char` boundaries.
    pub range: Range<usize>,
    /// Token class, rendered as `hljs-<class>`.
    pub class: &'static str,
}

/// Something that can classify source text.
pub trait Highlighter {
    /// Classify `code`, written in `language` if known.
    ///
    /// Spans should be sorted and non-overlapping; [`render_markup`] skips
    /// any span that starts before the end of the previous one.
    fn highlight(&self, code: &str, language: Option<&str>) -> Vec<HighlightSpan>;
}

/// Language named by a `language-*` or `lang-*` class.
pub fn language_from_classes(classes: &[String]) -> Option<&str> {
    classes.iter().find_map(|c| {
        c.strip_prefix("language-")
            .or_else(|| c.strip_prefix("lang-"))
            .filter(|lang| !lang.is_empty())
    })
}

/// Escape `text` for use as markup content.
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
}

/// Render `code` as escaped markup with a span per highlight.
///
/// ```
/// use understory_directives::highlight::{HighlightSpan, render_markup};
///
/// let spans = [HighlightSpan { range: 0..2, class: "keyword" }];
/// assert_eq!(
///     render_markup("fn a<T>()", &spans),
///     r#"<span class="hljs-keyword">fn</span> a&lt;T&gt;()"#,
/// );
/// ```
pub fn render_markup(code: &str, spans: &[HighlightSpan]) -> String {
    let mut out = String::with_capacity(code.len());
    let mut cursor = 0;
    for span in spans {
        let Range { start, end } = span.range;
        if start < cursor || end > code.len() || start >= end {
            continue;
        }
        let (Some(before), Some(token)) = (code.get(cursor..start), code.get(start..end)) else {
            continue;
        };
        escape_into(&mut out, before);
        out.push_str("<span class=\"hljs-");
        out.push_str(span.class);
        out.push_str("\">");
        escape_into(&mut out, token);
        out.push_str("</span>");
        cursor = end;
    }
    escape_into(&mut out, code.get(cursor..).unwrap_or_default());
    out
}

/// `v-hljs`.
///
/// Runs on `before_mount` and again on every `updated`.
#[derive(Debug, Default)]
pub struct Highlight<H> {
    highlighter: H,
}

impl<H: Highlighter> Highlight<H> {
    /// Use `highlighter` for every block.
    pub fn new(highlighter: H) -> Self {
        Self { highlighter }
    }

    /// Highlight the first `code` element inside `element`.
    pub fn apply(&self, doc: &mut Document, element: NodeId) -> Result<NodeId, DirectiveError> {
        let tree = doc.tree_mut();
        let code = tree
            .query_selector(element, CODE_SELECTOR)
            .ok_or(DirectiveError::MissingElement {
                directive: Self::NAME,
                selector: CODE_SELECTOR,
            })?;
        let language = language_from_classes(tree.classes(code))
            .or_else(|| language_from_classes(tree.classes(element)))
            .map(String::from);
        let text = tree.text(code).unwrap_or_default();
        let spans = self.highlighter.highlight(text, language.as_deref());
        let markup = render_markup(text, &spans);
        log::trace!(
            "highlighted {code:?} ({} spans, language {language:?})",
            spans.len()
        );
        tree.set_inner_html(code, markup);
        tree.add_class(code, HIGHLIGHTED_CLASS);
        Ok(code)
    }

    fn apply_or_warn(&self, doc: &mut Document, element: NodeId, binding: &DirectiveBinding<()>) {
        if let Err(err) = self.apply(doc, element) {
            report_misconfiguration(&err, binding.instance.as_ref());
        }
    }
}

impl<H: Highlighter> Directive for Highlight<H> {
    const NAME: &'static str = "hljs";
    type Callback = ();

    fn before_mount(&mut self, doc: &mut Document, element: NodeId, binding: &DirectiveBinding<()>) {
        self.apply_or_warn(doc, element, binding);
    }

    fn updated(&mut self, doc: &mut Document, element: NodeId, binding: &DirectiveBinding<()>) {
        self.apply_or_warn(doc, element, binding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::Mounted;
    use crate::test_log;
    use alloc::vec;
    use understory_dom::ElementData;

    /// Marks every occurrence of `let`.
    struct LetOnly;

    impl Highlighter for LetOnly {
        fn highlight(&self, code: &str, language: Option<&str>) -> Vec<HighlightSpan> {
            if language != Some("rust") {
                return Vec::new();
            }
            code.match_indices("let")
                .map(|(i, m)| HighlightSpan {
                    range: i..i + m.len(),
                    class: "keyword",
                })
                .collect()
        }
    }

    #[test]
    fn language_classes() {
        let classes = vec!["block".into(), "language-rust".into()];
        assert_eq!(language_from_classes(&classes), Some("rust"));
        assert_eq!(language_from_classes(&["lang-js".into()]), Some("js"));
        assert_eq!(language_from_classes(&["language-".into()]), None);
        assert_eq!(language_from_classes(&[]), None);
    }

    #[test]
    fn markup_escapes_and_skips_bad_spans() {
        let spans = [
            HighlightSpan { range: 0..1, class: "a" },
            HighlightSpan { range: 0..3, class: "overlapping" },
            HighlightSpan { range: 2..40, class: "out-of-range" },
            HighlightSpan { range: 4..5, class: "b" },
        ];
        assert_eq!(
            render_markup("<a> & \"q\"", &spans),
            "<span class=\"hljs-a\">&lt;</span>a&gt; <span class=\"hljs-b\">&amp;</span> &quot;q&quot;"
        );
    }

    #[test]
    fn highlights_first_code_block_on_mount_and_update() {
        let mut doc = Document::new();
        let t = doc.tree_mut();
        let pre = t.insert(None, ElementData::new("pre").with_class("language-rust"));
        let code = t.insert(Some(pre), ElementData::new("code").with_text("let x = 1 < 2;"));
        let second = t.insert(Some(pre), ElementData::new("code").with_text("let y;"));

        let mut bound = Mounted::mount(&mut doc, pre, Highlight::new(LetOnly), DirectiveBinding::empty());
        assert_eq!(
            doc.tree().inner_html(code),
            Some("<span class=\"hljs-keyword\">let</span> x = 1 &lt; 2;")
        );
        assert!(doc.tree().has_class(code, HIGHLIGHTED_CLASS));
        assert_eq!(doc.tree().inner_html(second), None);

        doc.tree_mut().set_text(code, "let z");
        bound.update(&mut doc);
        assert_eq!(
            doc.tree().inner_html(code),
            Some("<span class=\"hljs-keyword\">let</span> z")
        );
        assert_eq!(doc.tree().classes(code).len(), 1, "class added once");
    }

    #[test]
    fn missing_code_element_warns() {
        test_log::capture();
        let mut doc = Document::new();
        let pre = doc.tree_mut().insert(None, ElementData::new("pre"));
        let _bound = Mounted::mount(&mut doc, pre, Highlight::new(LetOnly), DirectiveBinding::empty());
        assert_eq!(
            test_log::warnings(),
            ["[v-hljs:] no `code` element inside the bound element."]
        );
    }
}
