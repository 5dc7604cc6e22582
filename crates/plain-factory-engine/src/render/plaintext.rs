//! The degenerate renderer: natural-language text and nothing else.

use crate::{
    assembly::AssembledDocument,
    format::FormatKind,
    ir::{Inline, Node},
};

use super::Renderer;

/// Characters that only ever carry markup in the dialect. None of them
/// survive stripping, even when they appeared inside plain text.
pub const MARKUP_SENTINELS: &[char] = &[
    '*', '`', '[', ']', '^', '<', '>', '{', '}', '|', '~', '#', '=', '\\',
];

pub struct PlaintextRenderer;

impl Renderer for PlaintextRenderer {
    fn format(&self) -> FormatKind {
        FormatKind::Plaintext
    }

    fn render(&self, doc: &AssembledDocument) -> String {
        strip_nodes(doc.nodes())
    }
}

/// Flattens `nodes` to text: one space between blocks, every markup sentinel
/// turned into a space, whitespace collapsed.
pub fn strip_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> String {
    let mut blocks = Vec::new();
    for node in nodes {
        collect_block(node, &mut blocks);
    }
    let joined = blocks.join(" ");
    let cleaned: String = joined
        .chars()
        .map(|c| if MARKUP_SENTINELS.contains(&c) { ' ' } else { c })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_block(node: &Node, out: &mut Vec<String>) {
    match node {
        Node::Paragraph { content, .. } | Node::Heading { content, .. } => {
            let mut text = String::new();
            collect_inlines(content, &mut text);
            out.push(text);
        }
        Node::Admonition(admonition) => {
            for child in &admonition.children {
                collect_block(child, out);
            }
        }
        Node::TabGroup(group) => {
            for child in group.panels.iter().flat_map(|p| &p.children) {
                collect_block(child, out);
            }
        }
        Node::Quote(children) => {
            for child in children {
                collect_block(child, out);
            }
        }
        Node::CodeBlock { body, .. } => out.push(body.clone()),
        Node::RawHtml(_) | Node::Rule | Node::Label { .. } => {}
    }
}

fn collect_inlines(content: &[Inline], out: &mut String) {
    for inline in content {
        match inline {
            Inline::Text(text) | Inline::Code(text) => out.push_str(text),
            Inline::SoftBreak => out.push(' '),
            Inline::Emphasis { children, .. } => collect_inlines(children, out),
            marker if marker.is_definition_marker() => out.push_str(" - "),
            Inline::Link { text, .. } => collect_inlines(text, out),
            Inline::FootnoteRef(_)
            | Inline::Annotation { .. }
            | Inline::Html(_)
            | Inline::Attributes(_)
            | Inline::Marker(_) => {}
        }
    }
}
