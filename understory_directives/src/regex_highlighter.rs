// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Highlighter`] driven by ordered regular-expression rules.
//!
//! Rules are tried in order: language rules first, then the shared ones. At
//! each position the earliest match wins; on a tie, the rule registered first
//! wins. Text covered by a token is never re-tokenized, so keywords inside
//! strings and comments stay plain.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use regex::Regex;

use crate::highlight::{HighlightSpan, Highlighter};

#[derive(Clone, Debug)]
struct Rule {
    class: &'static str,
    pattern: Regex,
}

/// Regex-backed highlighter with per-language rules.
///
/// ```
/// use understory_directives::highlight::render_markup;
/// use understory_directives::{Highlighter, RegexHighlighter};
///
/// let h = RegexHighlighter::default();
/// let code = "let s = \"let\";";
/// assert_eq!(
///     render_markup(code, &h.highlight(code, Some("rust"))),
///     "<span class=\"hljs-keyword\">let</span> s = \
///      <span class=\"hljs-string\">&quot;let&quot;</span>;",
/// );
/// ```
#[derive(Clone, Debug)]
pub struct RegexHighlighter {
    shared: Vec<Rule>,
    languages: HashMap<String, Vec<Rule>>,
}

const COMMENT: &str = r"//[^\n]*|/\*(?s:.*?)\*/";
const STRING: &str = r#""(?:[^"\\]|\\.)*"|'(?:[^'\\\n]|\\.)*'"#;
const NUMBER: &str = r"\b\d+(?:\.\d+)?\b";

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "fn", "for", "if", "impl", "in", "let",
    "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "self", "Self", "static",
    "struct", "trait", "type", "use", "where", "while",
];
const JS_KEYWORDS: &[&str] = &[
    "async", "await", "break", "case", "class", "const", "continue", "default", "else", "export",
    "extends", "for", "function", "if", "import", "let", "new", "return", "switch", "this",
    "throw", "try", "catch", "typeof", "var", "while",
];
const PYTHON_KEYWORDS: &[&str] = &[
    "and", "as", "class", "def", "elif", "else", "for", "from", "if", "import", "in", "is",
    "lambda", "not", "or", "pass", "return", "while", "with", "yield",
];

fn keyword_pattern(words: &[&str]) -> String {
    format!(r"\b(?:{})\b", words.join("|"))
}

impl RegexHighlighter {
    /// A highlighter with no rules.
    pub fn empty() -> Self {
        Self {
            shared: Vec::new(),
            languages: HashMap::new(),
        }
    }

    /// Add a rule for `language`, or for every language when `None`.
    pub fn add_rule(
        &mut self,
        language: Option<&str>,
        class: &'static str,
        pattern: &str,
    ) -> Result<(), regex::Error> {
        let rule = Rule {
            class,
            pattern: Regex::new(pattern)?,
        };
        match language {
            Some(lang) => self.languages.entry(lang.into()).or_default().push(rule),
            None => self.shared.push(rule),
        }
        Ok(())
    }

    /// Builder form of [`RegexHighlighter::add_rule`].
    pub fn with_rule(
        mut self,
        language: Option<&str>,
        class: &'static str,
        pattern: &str,
    ) -> Result<Self, regex::Error> {
        self.add_rule(language, class, pattern)?;
        Ok(self)
    }

    /// Languages with their own rules.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    fn builtin() -> Result<Self, regex::Error> {
        let mut h = Self::empty()
            .with_rule(None, "comment", COMMENT)?
            .with_rule(None, "string", STRING)?;
        let keyword_sets: [(&[&str], &[&str]); 3] = [
            (&["rust", "rs"], RUST_KEYWORDS),
            (&["javascript", "js", "typescript", "ts"], JS_KEYWORDS),
            (&["python", "py"], PYTHON_KEYWORDS),
        ];
        for (names, words) in keyword_sets {
            let pattern = keyword_pattern(words);
            for name in names {
                h.add_rule(Some(*name), "keyword", &pattern)?;
            }
        }
        h.add_rule(Some("python"), "comment", r"#[^\n]*")?;
        h.add_rule(Some("py"), "comment", r"#[^\n]*")?;
        h.add_rule(None, "number", NUMBER)?;
        Ok(h)
    }
}

impl Default for RegexHighlighter {
    /// Comments, strings, and numbers for every language, plus keywords for
    /// Rust, JavaScript/TypeScript, and Python.
    fn default() -> Self {
        Self::builtin().expect("built-in patterns are valid")
    }
}

/// First non-empty match of `rule` starting at or after `from`.
fn next_match(rule: &Rule, code: &str, from: usize) -> Option<(usize, usize)> {
    let mut pos = from;
    while pos <= code.len() {
        let m = rule.pattern.find_at(code, pos)?;
        if !m.is_empty() {
            return Some((m.start(), m.end()));
        }
        let step = code[m.start()..].chars().next().map_or(1, char::len_utf8);
        pos = m.start() + step;
    }
    None
}

impl Highlighter for RegexHighlighter {
    fn highlight(&self, code: &str, language: Option<&str>) -> Vec<HighlightSpan> {
        let language_rules = language
            .and_then(|l| self.languages.get(l))
            .map(Vec::as_slice)
            .unwrap_or_default();
        let rules: Vec<&Rule> = language_rules.iter().chain(&self.shared).collect();

        // Next non-empty match per rule, refreshed only once the cursor has
        // moved past its start. `None` means the rule has no more matches.
        let mut next: Vec<Option<(usize, usize)>> =
            rules.iter().map(|rule| next_match(rule, code, 0)).collect();

        let mut spans = Vec::new();
        let mut cursor = 0;
        while cursor < code.len() {
            let mut best: Option<(usize, usize, &'static str)> = None;
            for (rule, slot) in rules.iter().zip(next.iter_mut()) {
                if slot.is_some_and(|(start, _)| start < cursor) {
                    *slot = next_match(rule, code, cursor);
                }
                if let Some((start, end)) = *slot
                    && best.is_none_or(|(best_start, _, _)| start < best_start)
                {
                    best = Some((start, end, rule.class));
                }
            }
            let Some((start, end, class)) = best else {
                break;
            };
            spans.push(HighlightSpan {
                range: start..end,
                class,
            });
            cursor = end;
        }
        spans
    }
}
