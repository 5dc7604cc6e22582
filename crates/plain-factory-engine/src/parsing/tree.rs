//! Structural parser: turns the flat token stream into a tree.
//!
//! An explicit stack of open frames replaces any implicit "current section"
//! state. A close token must match the innermost frame; anything else is a
//! structural error carrying the location of both the close and the opener.

use crate::{
    error::{Error, Location, Result},
    fragment::Provenance,
    ir::{Admonition, Inline, Node, TabGroup, TabPanel},
    references::{Definition, ReferenceTable},
};

use super::{
    annotations,
    inline::parse_inline,
    scan::{Marker, ScopeKind, Token, TokenKind},
};

struct Frame {
    scope: ScopeKind,
    marker: Marker,
    line: usize,
    children: Vec<Node>,
}

/// Builds the tree token by token.
///
/// Malformed nesting is always recovered from: a stray close is ignored, a
/// close matching an outer frame closes everything inside it, and frames left
/// open are closed by [`finish_lenient`]. The first problem recovered from is
/// kept so that [`push`] and [`finish`] can report it.
///
/// [`push`]: TreeBuilder::push
/// [`finish`]: TreeBuilder::finish
/// [`finish_lenient`]: TreeBuilder::finish_lenient
pub struct TreeBuilder {
    origin: Provenance,
    stack: Vec<Frame>,
    root: Vec<Node>,
    references: ReferenceTable,
    problem: Option<Error>,
}

impl TreeBuilder {
    pub fn new(origin: Provenance) -> Self {
        Self {
            origin,
            stack: Vec::new(),
            root: Vec::new(),
            references: ReferenceTable::new(),
            problem: None,
        }
    }

    /// Feeds one token, failing on the first structural problem.
    pub fn push(&mut self, token: Token) -> Result<()> {
        self.recover(token);
        match self.problem.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Feeds one token, recovering from any structural problem.
    pub fn recover(&mut self, token: Token) {
        let at = self.at(token.line);
        match token.kind {
            TokenKind::Blank => {}
            TokenKind::Paragraph { lines } => {
                let content = parse_inline(&lines.join("\n"));
                if !self.annotate_previous(&content) {
                    self.attach(Node::Paragraph {
                        line: token.line,
                        content,
                    });
                }
            }
            TokenKind::Heading { level, text } => {
                let content = parse_inline(&text);
                self.attach(Node::Heading {
                    line: token.line,
                    level,
                    content,
                });
            }
            TokenKind::Fence { fence, info, body } => {
                self.attach(Node::CodeBlock { fence, info, body });
            }
            TokenKind::Raw { text } => self.attach(Node::RawHtml(text)),
            TokenKind::Rule => self.attach(Node::Rule),
            TokenKind::FootnoteDef { id, text } => {
                self.define(Definition::footnote(id, parse_inline(&text), at));
            }
            TokenKind::RefDef { id, url, title } => {
                self.define(Definition::link(id, url, title, at));
            }
            TokenKind::AbbrDef { term, text } => {
                self.define(Definition::abbreviation(term, text, at));
            }
            TokenKind::ScopeOpen { scope, marker } => self.stack.push(Frame {
                scope,
                marker,
                line: token.line,
                children: Vec::new(),
            }),
            TokenKind::ScopeClose { marker } => self.close(marker, at),
        }
    }

    /// Ends the fragment. The terminal state must be outside every scope.
    pub fn finish(self) -> Result<(Vec<Node>, ReferenceTable)> {
        if let Some(err) = self.problem {
            return Err(err);
        }
        if let Some(frame) = self.stack.last() {
            return Err(Error::UnterminatedScope {
                scope: frame.scope.name(),
                at: self.at(frame.line),
            });
        }
        Ok((self.root, self.references))
    }

    /// Ends the fragment, closing whatever is still open.
    pub fn finish_lenient(mut self) -> (Vec<Node>, ReferenceTable) {
        while let Some(frame) = self.stack.pop() {
            self.finish_frame(frame);
        }
        (self.root, self.references)
    }

    fn close(&mut self, marker: Marker, at: Location) {
        let Some((top_marker, top_line, top_name)) = self
            .stack
            .last()
            .map(|f| (f.marker, f.line, f.scope.name()))
        else {
            self.report(Error::UnexpectedClose { at });
            return;
        };

        if top_marker == marker {
            if let Some(frame) = self.stack.pop() {
                self.finish_frame(frame);
            }
            return;
        }

        let opened_at = self.at(top_line);
        if marker.is_implicit() {
            // An indented or quoted scope ended while an explicit block
            // inside it was still open.
            self.report(Error::UnterminatedScope {
                scope: top_name,
                at: opened_at,
            });
        } else {
            self.report(Error::MismatchedClose {
                expected: top_name,
                opened_at,
                at,
            });
        }

        // Close inner frames up to the one the marker belongs to, if any.
        if self.stack.iter().any(|f| f.marker == marker) {
            while let Some(frame) = self.stack.pop() {
                let done = frame.marker == marker;
                self.finish_frame(frame);
                if done {
                    break;
                }
            }
        }
    }

    fn finish_frame(&mut self, frame: Frame) {
        let Frame {
            scope, children, ..
        } = frame;
        match scope {
            ScopeKind::Admonition { tone, title, style } => {
                self.attach(Node::Admonition(Admonition {
                    tone,
                    title,
                    style,
                    children,
                }));
            }
            ScopeKind::Quote => self.attach(Node::Quote(children)),
            ScopeKind::Tab { label, new_group } => {
                let panel = TabPanel { label, children };
                let siblings = self.children_mut();
                match siblings.last_mut() {
                    Some(Node::TabGroup(group)) if !new_group => group.panels.push(panel),
                    _ => siblings.push(Node::TabGroup(TabGroup {
                        panels: vec![panel],
                    })),
                }
            }
        }
    }

    /// Folds an ordered list into the annotated paragraph right before it.
    fn annotate_previous(&mut self, list: &[Inline]) -> bool {
        let Some(items) = annotations::list_items(list) else {
            return false;
        };
        let origin = self.origin;
        match self.children_mut().last_mut() {
            Some(Node::Paragraph { line, content }) if annotations::is_annotated(content.as_slice()) => {
                annotations::cite(content, items, &format!("{origin}:{line}"))
            }
            _ => false,
        }
    }

    fn attach(&mut self, node: Node) {
        self.children_mut().push(node);
    }

    fn children_mut(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root,
        }
    }

    /// The first definition of an id wins.
    fn define(&mut self, definition: Definition) {
        if let Err(err) = self.references.define(definition) {
            self.report(err);
        }
    }

    fn report(&mut self, err: Error) {
        self.problem.get_or_insert(err);
    }

    fn at(&self, line: usize) -> Location {
        Location::new(self.origin, line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ir::AdmonitionStyle, parsing::scan::scan};
    use pretty_assertions::assert_eq;

    fn build(src: &str) -> Result<(Vec<Node>, ReferenceTable)> {
        let mut builder = TreeBuilder::new(Provenance::Body);
        for token in scan(src) {
            builder.push(token)?;
        }
        builder.finish()
    }

    fn para(line: usize, text: &str) -> Node {
        Node::Paragraph {
            line,
            content: vec![Inline::Text(text.into())],
        }
    }

    #[test]
    fn nested_admonition_inside_tab() {
        let src = "=== \"Plain\"\n\n    !!! note \"Why\"\n\n        because\n";
        let (nodes, _) = build(src).unwrap();
        assert_eq!(
            nodes,
            vec![Node::TabGroup(TabGroup {
                panels: vec![TabPanel {
                    label: "Plain".into(),
                    children: vec![Node::Admonition(Admonition {
                        tone: "note".into(),
                        title: Some("Why".into()),
                        style: AdmonitionStyle::Static,
                        children: vec![para(5, "because")],
                    })],
                }],
            })]
        );
    }

    #[test]
    fn adjacent_tabs_form_one_group() {
        let src = "=== \"A\"\n    a\n\n=== \"B\"\n    b\n\n===! \"C\"\n    c\n";
        let (nodes, _) = build(src).unwrap();
        let groups: Vec<Vec<&str>> = nodes
            .iter()
            .filter_map(|n| match n {
                Node::TabGroup(g) => Some(g.labels().collect()),
                _ => None,
            })
            .collect();
        assert_eq!(groups, vec![vec!["A", "B"], vec!["C"]]);
    }

    #[test]
    fn explicit_tab_blocks_group_too() {
        let src = "/// tab | One\nfirst\n///\n\n/// tab | Two\nsecond\n///\n";
        let (nodes, _) = build(src).unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(matches!(&nodes[0], Node::TabGroup(g) if g.panels.len() == 2));
    }

    #[test]
    fn unclosed_explicit_block_reports_opener_line() {
        let src = "intro\n\n/// warning | Careful\ntext\n";
        let err = build(src).unwrap_err();
        assert_eq!(
            err,
            Error::UnterminatedScope {
                scope: "admonition",
                at: Location::new(Provenance::Body, 3),
            }
        );
    }

    #[test]
    fn mismatched_explicit_close() {
        let src = "//// note\n/// tip\ninner\n////\n///\n";
        let err = build(src).unwrap_err();
        assert_eq!(
            err,
            Error::MismatchedClose {
                expected: "admonition",
                opened_at: Location::new(Provenance::Body, 2),
                at: Location::new(Provenance::Body, 4),
            }
        );
    }

    #[test]
    fn explicit_block_left_open_inside_indented_scope() {
        let src = "!!! note\n\n    /// tip\n    text\n\nafter\n";
        let err = build(src).unwrap_err();
        assert_eq!(
            err,
            Error::UnterminatedScope {
                scope: "admonition",
                at: Location::new(Provenance::Body, 3),
            }
        );
    }

    #[test]
    fn stray_close_is_an_error() {
        let err = build("text\n///\n").unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedClose {
                at: Location::new(Provenance::Body, 2)
            }
        );
    }

    #[test]
    fn definitions_leave_the_tree() {
        let src = "Use[^1].\n\n[^1]: A note.\n[site]: https://plainlicense.org\n";
        let (nodes, refs) = build(src).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(refs.len(), 2);
        assert!(refs.footnote("1").is_some());
        assert!(refs.link("site").is_some());
    }

    #[test]
    fn abbreviations_are_definitions() {
        let src = "Check the SPDX id.\n*[SPDX]: Software Package Data Exchange\n";
        let (nodes, refs) = build(src).unwrap();
        assert_eq!(nodes, vec![para(1, "Check the SPDX id.")]);
        assert_eq!(
            refs.abbreviations().map(|d| d.id.as_str()).collect::<Vec<_>>(),
            vec!["SPDX"]
        );
    }

    #[test]
    fn duplicate_definition_in_one_fragment() {
        let err = build("[^a]: one\n[^a]: two\n").unwrap_err();
        assert!(matches!(err, Error::DuplicateReferenceId { ref id, .. } if id == "a"));
    }

    #[test]
    fn quotes_nest() {
        let (nodes, _) = build("> outer\n>\n> > inner\n").unwrap();
        assert_eq!(
            nodes,
            vec![Node::Quote(vec![
                para(1, "outer"),
                Node::Quote(vec![para(3, "inner")]),
            ])]
        );
    }

    #[test]
    fn annotation_list_folds_into_the_cited_paragraph() {
        let src = "You may share it (1).\n{ .annotate }\n\n1. Sharing includes selling.\n\nAfter.\n";
        let (nodes, _) = build(src).unwrap();
        assert_eq!(nodes.len(), 2);
        let Node::Paragraph { content, .. } = &nodes[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(
            content[1],
            Inline::Annotation {
                marker: "(1)".into(),
                id: "body:1:1".into(),
                content: vec![Inline::Text("Sharing includes selling.".into())],
            }
        );
        assert_eq!(nodes[1], para(6, "After."));
    }

    #[test]
    fn list_after_a_plain_paragraph_stays_a_list() {
        let (nodes, _) = build("You may share it (1).\n\n1. Not an annotation.\n").unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn lenient_mode_closes_everything() {
        let mut builder = TreeBuilder::new(Provenance::Original);
        for token in scan("///\n/// note\nopen forever\n") {
            builder.recover(token);
        }
        let (nodes, _) = builder.finish_lenient();
        assert!(matches!(&nodes[0], Node::Admonition(a) if a.children.len() == 1));
    }
}
