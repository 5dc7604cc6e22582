//! # Block Scanner
//!
//! Line-oriented tokenizer for the license dialect. Each physical line first
//! has the prefixes of the open implicit scopes removed (indentation for `!!!`
//! and `===` content, `>` for quotes), then the remainder is classified by the
//! types in [`kinds`].
//!
//! The scanner never fails. It reports what it sees, including close markers
//! that do not match anything; deciding whether the nesting is valid is the
//! structural parser's job.
//!
//! Every source byte belongs to exactly one token span. Synthetic tokens
//! (scope closes produced by a dedent, quote openers) have empty spans.

pub mod kinds;
mod token;

pub use token::{Marker, ScopeKind, Token, TokenKind};

use xi_rope::Rope;

use crate::{ir::AdmonitionStyle, parsing::rope::{LineRef, Span, lines_with_spans}};

use kinds::{
    AdmonitionLine, BlockFence, BlockFenceLine, BlockQuote, CodeFence, Definition,
    DefinitionLine, FenceSig, Heading, HtmlBlock, TabLine, ThematicBreak, leading_spaces,
};

/// Tokenizes one fragment.
pub fn scan(source: &str) -> Vec<Token> {
    let rope = Rope::from(source);
    let mut scanner = Scanner::new();
    for line in lines_with_spans(&rope) {
        scanner.push(&line);
    }
    let tokens = scanner.finish(rope.len());
    log::trace!("scanned {} tokens from {} bytes", tokens.len(), source.len());
    tokens
}

/// Leaf construct being accumulated across lines.
#[derive(Debug, Default)]
enum Leaf {
    #[default]
    None,
    Paragraph {
        lines: Vec<String>,
        span: Span,
        line: usize,
    },
    Html {
        lines: Vec<String>,
        span: Span,
        line: usize,
    },
    Footnote {
        id: String,
        lines: Vec<String>,
        span: Span,
        line: usize,
    },
    Fence {
        sig: FenceSig,
        info: String,
        body: Vec<String>,
        span: Span,
        line: usize,
    },
}

pub struct Scanner {
    open: Vec<Marker>,
    leaf: Leaf,
    /// Index of an explicit opener that still accepts option lines.
    options_for: Option<usize>,
    last_line: usize,
    out: Vec<Token>,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            open: Vec::new(),
            leaf: Leaf::None,
            options_for: None,
            last_line: 0,
            out: Vec::new(),
        }
    }

    pub fn push(&mut self, line: &LineRef) {
        self.last_line = line.number;
        let content = line.content();

        let (matched, rest) = self.match_open_scopes(content);
        if matched < self.open.len() {
            self.flush();
            self.options_for = None;
            while self.open.len() > matched {
                if let Some(marker) = self.open.pop()
                    && marker.is_implicit()
                {
                    self.emit(
                        TokenKind::ScopeClose { marker },
                        Span::empty(line.span.start),
                        line.number,
                    );
                }
            }
        }

        if let Some(idx) = self.options_for {
            if let Some((key, value)) = BlockFence::option(rest)
                && let Some(opener) = self.out.get_mut(idx)
            {
                if let TokenKind::ScopeOpen { scope, .. } = &mut opener.kind {
                    scope.apply_option(key, value);
                }
                opener.span = opener.span.cover(line.span);
                return;
            }
            self.options_for = None;
        }

        if let Leaf::Fence { sig, body, span, .. } = &mut self.leaf {
            *span = span.cover(line.span);
            if CodeFence::closes(*sig, rest) {
                self.flush();
            } else {
                body.push(rest.to_string());
            }
            return;
        }

        let blank = rest.trim().is_empty();
        match &mut self.leaf {
            Leaf::Html { lines, span, .. } if !blank => {
                lines.push(rest.to_string());
                *span = span.cover(line.span);
                return;
            }
            Leaf::Footnote { lines, span, .. }
                if !blank && leading_spaces(rest) >= Definition::CONTINUATION_INDENT =>
            {
                lines.push(rest.trim().to_string());
                *span = span.cover(line.span);
                return;
            }
            _ => {}
        }

        if blank {
            self.flush();
            self.emit(TokenKind::Blank, line.span, line.number);
            return;
        }

        self.classify(rest, line);
    }

    pub fn finish(mut self, len: usize) -> Vec<Token> {
        self.flush();
        while let Some(marker) = self.open.pop() {
            if marker.is_implicit() {
                self.emit(
                    TokenKind::ScopeClose { marker },
                    Span::empty(len),
                    self.last_line,
                );
            }
        }
        self.out
    }

    /// Strips the prefixes of open scopes, outermost first. Returns how many
    /// scopes the line still belongs to and the remaining text.
    fn match_open_scopes<'a>(&self, content: &'a str) -> (usize, &'a str) {
        let mut rest = content;
        let mut matched = 0;
        for marker in &self.open {
            match marker {
                Marker::Fence(_) => {}
                Marker::Indent(width) => {
                    if rest.trim().is_empty() {
                        rest = "";
                    } else if leading_spaces(rest) >= *width {
                        rest = &rest[*width..];
                    } else {
                        break;
                    }
                }
                Marker::Quote => match BlockQuote::strip_one(rest) {
                    Some(offset) => rest = &rest[offset..],
                    None => break,
                },
            }
            matched += 1;
        }
        (matched, rest)
    }

    fn classify(&mut self, rest: &str, line: &LineRef) {
        let indent = leading_spaces(rest);
        if indent > 3 {
            self.extend_paragraph(rest, line);
            return;
        }
        let body = &rest[indent..];

        if let Some(offset) = BlockQuote::strip_one(rest) {
            self.flush();
            self.open_scope(ScopeKind::Quote, Marker::Quote, Span::empty(line.span.start), line.number);
            let inner = &rest[offset..];
            if inner.trim().is_empty() {
                self.emit(TokenKind::Blank, line.span, line.number);
            } else {
                self.classify(inner, line);
            }
            return;
        }

        if let Some((sig, info)) = CodeFence::sig(body) {
            self.flush();
            self.leaf = Leaf::Fence {
                sig,
                info: info.to_string(),
                body: Vec::new(),
                span: line.span,
                line: line.number,
            };
            return;
        }

        if let Some(fence) = BlockFence::parse(body) {
            self.flush();
            match fence {
                BlockFenceLine::Open { count, kind, title } => {
                    let scope = explicit_scope(kind, title);
                    self.open_scope(scope, Marker::Fence(count), line.span, line.number);
                    self.options_for = Some(self.out.len() - 1);
                }
                BlockFenceLine::Close { count } => {
                    let marker = Marker::Fence(count);
                    self.emit(TokenKind::ScopeClose { marker }, line.span, line.number);
                    if self.open.last() == Some(&marker) {
                        self.open.pop();
                    }
                }
            }
            return;
        }

        if let Some(header) = AdmonitionLine::header(body) {
            self.flush();
            let scope = ScopeKind::Admonition {
                tone: header.tone.to_string(),
                title: header.title.map(str::to_string),
                style: header.style,
            };
            self.open_scope(scope, Marker::Indent(indent + 4), line.span, line.number);
            return;
        }

        if let Some(header) = TabLine::header(body) {
            self.flush();
            let scope = ScopeKind::Tab {
                label: header.label.to_string(),
                new_group: header.new_group,
            };
            self.open_scope(scope, Marker::Indent(indent + 4), line.span, line.number);
            return;
        }

        if let Some((level, text)) = Heading::parse(body) {
            self.flush();
            self.emit(
                TokenKind::Heading {
                    level,
                    text: text.to_string(),
                },
                line.span,
                line.number,
            );
            return;
        }

        if let Some(def) = Definition::parse(body) {
            self.flush();
            match def {
                DefinitionLine::Footnote { id, text } => {
                    self.leaf = Leaf::Footnote {
                        id: id.to_string(),
                        lines: vec![text.to_string()],
                        span: line.span,
                        line: line.number,
                    };
                }
                DefinitionLine::Link { id, url, title } => self.emit(
                    TokenKind::RefDef {
                        id: id.to_string(),
                        url: url.to_string(),
                        title: title.map(str::to_string),
                    },
                    line.span,
                    line.number,
                ),
                DefinitionLine::Abbreviation { term, text } => self.emit(
                    TokenKind::AbbrDef {
                        term: term.to_string(),
                        text: text.to_string(),
                    },
                    line.span,
                    line.number,
                ),
            }
            return;
        }

        if ThematicBreak::is_rule(body) {
            self.flush();
            self.emit(TokenKind::Rule, line.span, line.number);
            return;
        }

        if HtmlBlock::starts(body) && !matches!(self.leaf, Leaf::Paragraph { .. }) {
            self.flush();
            self.leaf = Leaf::Html {
                lines: vec![rest.to_string()],
                span: line.span,
                line: line.number,
            };
            return;
        }

        self.extend_paragraph(rest, line);
    }

    fn extend_paragraph(&mut self, rest: &str, line: &LineRef) {
        if let Leaf::Paragraph { lines, span, .. } = &mut self.leaf {
            lines.push(rest.to_string());
            *span = span.cover(line.span);
            return;
        }
        self.flush();
        self.leaf = Leaf::Paragraph {
            lines: vec![rest.to_string()],
            span: line.span,
            line: line.number,
        };
    }

    fn open_scope(&mut self, scope: ScopeKind, marker: Marker, span: Span, line: usize) {
        self.emit(TokenKind::ScopeOpen { scope, marker }, span, line);
        self.open.push(marker);
    }

    fn emit(&mut self, kind: TokenKind, span: Span, line: usize) {
        self.out.push(Token { kind, span, line });
    }

    fn flush(&mut self) {
        let token = match std::mem::take(&mut self.leaf) {
            Leaf::None => return,
            Leaf::Paragraph { lines, span, line } => Token {
                kind: TokenKind::Paragraph { lines },
                span,
                line,
            },
            Leaf::Html { lines, span, line } => Token {
                kind: TokenKind::Raw {
                    text: lines.join("\n"),
                },
                span,
                line,
            },
            Leaf::Footnote {
                id,
                lines,
                span,
                line,
            } => Token {
                kind: TokenKind::FootnoteDef {
                    id,
                    text: lines.join("\n"),
                },
                span,
                line,
            },
            Leaf::Fence {
                sig,
                info,
                body,
                span,
                line,
            } => Token {
                kind: TokenKind::Fence {
                    fence: sig.delimiter(),
                    info,
                    body: body.join("\n"),
                },
                span,
                line,
            },
        };
        self.out.push(token);
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps an explicit block's kind to the scope it opens.
fn explicit_scope(kind: &str, title: Option<&str>) -> ScopeKind {
    let title = title.map(str::to_string);
    match kind {
        "tab" => ScopeKind::Tab {
            label: title.unwrap_or_default(),
            new_group: false,
        },
        "details" => ScopeKind::Admonition {
            tone: "note".to_string(),
            title,
            style: AdmonitionStyle::Collapsible { open: false },
        },
        "admonition" => ScopeKind::Admonition {
            tone: "note".to_string(),
            title,
            style: AdmonitionStyle::Static,
        },
        tone => ScopeKind::Admonition {
            tone: tone.to_string(),
            title,
            style: AdmonitionStyle::Static,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::snapshot::invariants;
    use pretty_assertions::assert_eq;

    fn kinds(src: &str) -> Vec<TokenKind> {
        scan(src).into_iter().map(|t| t.kind).collect()
    }

    fn para(lines: &[&str]) -> TokenKind {
        TokenKind::Paragraph {
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    #[test]
    fn paragraphs_merge_and_blank_lines_separate() {
        assert_eq!(
            kinds("one\ntwo\n\nthree\n"),
            vec![para(&["one", "two"]), TokenKind::Blank, para(&["three"])]
        );
    }

    #[test]
    fn indented_admonition_closes_on_dedent() {
        let src = "!!! note \"Hi\"\n\n    inside\n\noutside\n";
        let tokens = scan(src);
        invariants::check(src, &tokens);

        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::ScopeOpen {
                    scope: ScopeKind::Admonition {
                        tone: "note".into(),
                        title: Some("Hi".into()),
                        style: AdmonitionStyle::Static,
                    },
                    marker: Marker::Indent(4),
                },
                TokenKind::Blank,
                para(&["inside"]),
                TokenKind::Blank,
                TokenKind::ScopeClose {
                    marker: Marker::Indent(4)
                },
                para(&["outside"]),
            ]
        );
        assert_eq!(tokens[4].line, 5);
        assert!(tokens[4].span.is_empty());
    }

    #[test]
    fn implicit_scopes_close_at_end_of_fragment() {
        let kinds = kinds("=== \"A\"\n\n    text");
        assert_eq!(
            kinds.last(),
            Some(&TokenKind::ScopeClose {
                marker: Marker::Indent(4)
            })
        );
    }

    #[test]
    fn explicit_block_with_options() {
        let src = "/// details | More\n    type: tip\n    open: true\n\nbody\n///\n";
        let tokens = scan(src);
        invariants::check(src, &tokens);

        assert_eq!(
            tokens[0].kind,
            TokenKind::ScopeOpen {
                scope: ScopeKind::Admonition {
                    tone: "tip".into(),
                    title: Some("More".into()),
                    style: AdmonitionStyle::Collapsible { open: true },
                },
                marker: Marker::Fence(3),
            }
        );
        assert_eq!(tokens[0].span, Span::new(0, 48));
        assert_eq!(
            tokens.last().map(|t| &t.kind),
            Some(&TokenKind::ScopeClose {
                marker: Marker::Fence(3)
            })
        );
    }

    #[test]
    fn markers_inside_code_fences_are_not_structural() {
        let src = "```\n!!! note\n///\n```\n";
        assert_eq!(
            kinds(src),
            vec![TokenKind::Fence {
                fence: "```".into(),
                info: String::new(),
                body: "!!! note\n///".into(),
            }]
        );
    }

    #[test]
    fn unterminated_code_fence_is_still_a_fence() {
        assert_eq!(
            kinds("~~~text\nbody"),
            vec![TokenKind::Fence {
                fence: "~~~".into(),
                info: "text".into(),
                body: "body".into(),
            }]
        );
    }

    #[test]
    fn quote_lines_open_and_close_a_quote_scope() {
        let src = "> quoted\n> more\n\nafter\n";
        let tokens = scan(src);
        invariants::check(src, &tokens);
        assert_eq!(
            tokens.into_iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::ScopeOpen {
                    scope: ScopeKind::Quote,
                    marker: Marker::Quote
                },
                para(&["quoted", "more"]),
                TokenKind::ScopeClose {
                    marker: Marker::Quote
                },
                TokenKind::Blank,
                para(&["after"]),
            ]
        );
    }

    #[test]
    fn footnote_definition_with_continuation() {
        assert_eq!(
            kinds("[^1]: first\n    second\nnext\n"),
            vec![
                TokenKind::FootnoteDef {
                    id: "1".into(),
                    text: "first\nsecond".into(),
                },
                para(&["next"]),
            ]
        );
    }

    #[test]
    fn html_block_runs_until_blank_line() {
        assert_eq!(
            kinds("<div>\ntext\n</div>\n\nafter"),
            vec![
                TokenKind::Raw {
                    text: "<div>\ntext\n</div>".into()
                },
                TokenKind::Blank,
                para(&["after"]),
            ]
        );
    }

    #[test]
    fn stray_explicit_close_is_reported_not_dropped() {
        assert_eq!(
            kinds("text\n////\n"),
            vec![
                para(&["text"]),
                TokenKind::ScopeClose {
                    marker: Marker::Fence(4)
                },
            ]
        );
    }

    #[test]
    fn nested_indented_scopes() {
        let src = "=== \"A\"\n\n    !!! tip\n\n        deep\n\n    shallow\n";
        let tokens = scan(src);
        invariants::check(src, &tokens);
        let markers: Vec<_> = tokens
            .iter()
            .filter_map(|t| match &t.kind {
                TokenKind::ScopeOpen { marker, .. } => Some(format!("open {marker}")),
                TokenKind::ScopeClose { marker } => Some(format!("close {marker}")),
                _ => None,
            })
            .collect();
        assert_eq!(
            markers,
            vec![
                "open indent(4)",
                "open indent(4)",
                "close indent(4)",
                "close indent(4)"
            ]
        );
    }
}
