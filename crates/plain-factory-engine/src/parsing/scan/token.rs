use std::fmt;

use crate::{ir::AdmonitionStyle, parsing::rope::Span};

/// The syntax that opened a scope and must close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Explicit `///` block; the count of slashes must match on close.
    Fence(usize),
    /// Indented content; the width is relative to the enclosing scope.
    Indent(usize),
    /// `>` prefixed lines.
    Quote,
}

impl Marker {
    /// Implicit scopes are closed by the scanner when their prefix ends.
    pub fn is_implicit(self) -> bool {
        !matches!(self, Marker::Fence(_))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Marker::Fence(count) => f.write_str(&"/".repeat(*count)),
            Marker::Indent(width) => write!(f, "indent({width})"),
            Marker::Quote => f.write_str(">"),
        }
    }
}

/// What an opener token opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    Admonition {
        tone: String,
        title: Option<String>,
        style: AdmonitionStyle,
    },
    Tab {
        label: String,
        new_group: bool,
    },
    Quote,
}

impl ScopeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ScopeKind::Admonition { .. } => "admonition",
            ScopeKind::Tab { .. } => "tab panel",
            ScopeKind::Quote => "block quote",
        }
    }

    /// Applies a `key: value` option line of an explicit block.
    pub(crate) fn apply_option(&mut self, key: &str, value: &str) {
        match (self, key) {
            (ScopeKind::Admonition { tone, .. }, "type") if !value.is_empty() => {
                *tone = value.to_string();
            }
            (
                ScopeKind::Admonition {
                    style: AdmonitionStyle::Collapsible { open },
                    ..
                },
                "open",
            ) => *open = value == "true",
            (ScopeKind::Tab { new_group, .. }, "new") => *new_group = value == "true",
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Blank,
    /// Consecutive paragraph lines, scope prefixes removed.
    Paragraph { lines: Vec<String> },
    Heading { level: u8, text: String },
    Fence {
        fence: String,
        info: String,
        body: String,
    },
    ScopeOpen { scope: ScopeKind, marker: Marker },
    ScopeClose { marker: Marker },
    FootnoteDef { id: String, text: String },
    RefDef {
        id: String,
        url: String,
        title: Option<String>,
    },
    AbbrDef { term: String, text: String },
    Raw { text: String },
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Source bytes covered. Synthetic closes and quote openers are empty.
    pub span: Span,
    /// 1-based line where the token starts.
    pub line: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_fence_markers_are_explicit() {
        assert!(!Marker::Fence(3).is_implicit());
        assert!(Marker::Indent(4).is_implicit());
        assert!(Marker::Quote.is_implicit());
    }

    #[test]
    fn details_options_open_the_admonition() {
        let mut scope = ScopeKind::Admonition {
            tone: "note".into(),
            title: None,
            style: AdmonitionStyle::Collapsible { open: false },
        };
        scope.apply_option("type", "warning");
        scope.apply_option("open", "true");
        assert_eq!(
            scope,
            ScopeKind::Admonition {
                tone: "warning".into(),
                title: None,
                style: AdmonitionStyle::Collapsible { open: true },
            }
        );
    }

    #[test]
    fn unknown_options_are_ignored() {
        let mut scope = ScopeKind::Tab {
            label: "A".into(),
            new_group: false,
        };
        scope.apply_option("attrs", "{class: x}");
        scope.apply_option("new", "true");
        assert_eq!(
            scope,
            ScopeKind::Tab {
                label: "A".into(),
                new_group: true
            }
        );
    }
}
