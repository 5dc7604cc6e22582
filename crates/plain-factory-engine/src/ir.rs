//! The intermediate representation shared by every renderer.
//!
//! Blocks form a genuine tree: admonitions, tab panels and quotes own their
//! children. Inline content keeps reference and footnote uses as bare
//! identifiers; they are resolved against a [`ReferenceTable`] only after a
//! document has been assembled.
//!
//! [`ReferenceTable`]: crate::references::ReferenceTable

/// A block-level node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Consecutive text lines. `line` is the 1-based line of the first one.
    Paragraph { line: usize, content: Vec<Inline> },
    Heading {
        line: usize,
        level: u8,
        content: Vec<Inline>,
    },
    Admonition(Admonition),
    TabGroup(TabGroup),
    Quote(Vec<Node>),
    /// A fenced code block. `fence` is the opening delimiter run (e.g. "```").
    CodeBlock {
        fence: String,
        info: String,
        body: String,
    },
    RawHtml(String),
    Rule,
    /// A heading the assembler generates to introduce a section. It names the
    /// section rather than belonging to the license's words.
    Label { level: u8, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admonition {
    /// `note`, `warning`, `tip`, ...
    pub tone: String,
    /// `None` when no title was written; `Some("")` for an explicitly empty one.
    pub title: Option<String>,
    pub style: AdmonitionStyle,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdmonitionStyle {
    #[default]
    Static,
    Collapsible { open: bool },
}

/// Adjacent tab panels rendered as one switchable group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabGroup {
    pub panels: Vec<TabPanel>,
}

impl TabGroup {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.panels.iter().map(|p| p.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPanel {
    pub label: String,
    pub children: Vec<Node>,
}

/// Inline content of paragraphs, headings and footnote definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// A run of natural-language text.
    Text(String),
    /// A line break inside a paragraph.
    SoftBreak,
    Code(String),
    Emphasis {
        style: EmphasisStyle,
        /// Delimiter character as written (`*`, `_` or `=`).
        marker: char,
        children: Vec<Inline>,
    },
    Link {
        text: Vec<Inline>,
        target: LinkTarget,
    },
    /// A footnote use `[^id]`.
    FootnoteRef(String),
    /// An inline HTML element or tag, verbatim.
    Html(String),
    /// An attribute list such as `{ .class #id }`, verbatim.
    Attributes(String),
    /// A list or definition marker at the start of a line (`- `, `1. `, `: `).
    Marker(String),
    /// A numbered citation such as `(1)` in an annotated paragraph, carrying
    /// the text of the matching list item. `id` is unique within a document.
    Annotation {
        marker: String,
        id: String,
        content: Vec<Inline>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisStyle {
    Emphasis,
    Strong,
    Mark,
}

impl EmphasisStyle {
    /// Number of delimiter characters on each side.
    pub fn width(self) -> usize {
        match self {
            EmphasisStyle::Emphasis => 1,
            EmphasisStyle::Strong | EmphasisStyle::Mark => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Inline { url: String, title: Option<String> },
    /// A reference link; the id is resolved after assembly.
    Reference(String),
}

impl Inline {
    /// Whether this is the `: ` marker that opens a definition.
    pub fn is_definition_marker(&self) -> bool {
        matches!(self, Inline::Marker(marker) if marker.trim_start().starts_with(':'))
    }
}

impl Node {
    pub fn paragraph(content: Vec<Inline>) -> Self {
        Node::Paragraph { line: 0, content }
    }

    pub fn label(level: u8, text: impl Into<String>) -> Self {
        Node::Label {
            level,
            text: text.into(),
        }
    }

    /// Source line of the node, when it was parsed from text.
    pub fn line(&self) -> Option<usize> {
        match self {
            Node::Paragraph { line, .. } | Node::Heading { line, .. } if *line > 0 => Some(*line),
            _ => None,
        }
    }

    /// Block children, for container nodes.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Admonition(a) => a.children.iter().collect(),
            Node::TabGroup(g) => g.panels.iter().flat_map(|p| p.children.iter()).collect(),
            Node::Quote(children) => children.iter().collect(),
            _ => Vec::new(),
        }
    }
}

/// Visits every inline in `nodes` depth-first, in document order, together
/// with the line of the block that contains it.
pub fn walk_inlines<'a>(nodes: &'a [Node], visit: &mut dyn FnMut(usize, &'a Inline)) {
    for node in nodes {
        match node {
            Node::Paragraph { line, content } | Node::Heading { line, content, .. } => {
                walk_inline_list(*line, content, visit);
            }
            Node::Admonition(a) => walk_inlines(&a.children, visit),
            Node::TabGroup(g) => {
                for panel in &g.panels {
                    walk_inlines(&panel.children, visit);
                }
            }
            Node::Quote(children) => walk_inlines(children, visit),
            Node::CodeBlock { .. } | Node::RawHtml(_) | Node::Rule | Node::Label { .. } => {}
        }
    }
}

/// Visits `inlines` and their nested children depth-first. `line` is the line
/// of the first inline; it advances past every soft break.
pub fn walk_inline_list<'a>(line: usize, inlines: &'a [Inline], visit: &mut dyn FnMut(usize, &'a Inline)) {
    walk_from(line, inlines, visit);
}

fn walk_from<'a>(mut line: usize, inlines: &'a [Inline], visit: &mut dyn FnMut(usize, &'a Inline)) -> usize {
    for inline in inlines {
        visit(line, inline);
        match inline {
            Inline::SoftBreak if line > 0 => line += 1,
            Inline::Emphasis { children, .. } => line = walk_from(line, children, visit),
            Inline::Link { text, .. } => line = walk_from(line, text, visit),
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn walk_visits_nested_inlines_in_order() {
        let nodes = vec![
            Node::Paragraph {
                line: 1,
                content: vec![
                    text("a"),
                    Inline::Emphasis {
                        style: EmphasisStyle::Strong,
                        marker: '*',
                        children: vec![Inline::FootnoteRef("x".into())],
                    },
                ],
            },
            Node::Admonition(Admonition {
                tone: "note".into(),
                title: None,
                style: AdmonitionStyle::Static,
                children: vec![Node::Paragraph {
                    line: 4,
                    content: vec![Inline::FootnoteRef("y".into())],
                }],
            }),
        ];

        let mut seen = Vec::new();
        walk_inlines(&nodes, &mut |line, inline| {
            if let Inline::FootnoteRef(id) = inline {
                seen.push((line, id.clone()));
            }
        });

        assert_eq!(seen, vec![(1, "x".to_string()), (4, "y".to_string())]);
    }

    #[test]
    fn lines_advance_past_soft_breaks() {
        let nodes = vec![Node::Paragraph {
            line: 3,
            content: vec![
                text("a"),
                Inline::SoftBreak,
                Inline::Emphasis {
                    style: EmphasisStyle::Emphasis,
                    marker: '_',
                    children: vec![text("b"), Inline::SoftBreak, text("c")],
                },
                Inline::FootnoteRef("z".into()),
            ],
        }];

        let mut seen = Vec::new();
        walk_inlines(&nodes, &mut |line, inline| {
            if let Inline::FootnoteRef(id) = inline {
                seen.push((line, id.clone()));
            }
        });

        assert_eq!(seen, vec![(5, "z".to_string())]);
    }

    #[test]
    fn generated_nodes_have_no_line() {
        assert_eq!(Node::label(2, "Official text").line(), None);
        assert_eq!(Node::Rule.line(), None);
    }
}
