//! Portable markdown: no dialect extensions survive.
//!
//! Admonitions become GitHub alerts, tab panels become sequential sections,
//! reference links are inlined and footnotes are renumbered by first use.

use std::fmt::Write;

use crate::{
    assembly::AssembledDocument,
    format::FormatKind,
    ir::{Admonition, EmphasisStyle, Inline, LinkTarget, Node},
    parsing::{inline::kinds::CodeSpan, scan::kinds::ThematicBreak},
    references::DefinitionKind,
};

use super::{Renderer, finish, join_blocks, markdown::destination, quote};

pub struct PlainMarkdownRenderer;

impl Renderer for PlainMarkdownRenderer {
    fn format(&self) -> FormatKind {
        FormatKind::PlainMarkdown
    }

    fn render(&self, doc: &AssembledDocument) -> String {
        let ctx = Context { doc };
        let body = join_blocks(doc.nodes().map(|node| ctx.block(node)));
        finish(join_blocks([body, ctx.footnotes()]))
    }
}

/// The GitHub alert type closest to an admonition tone.
pub fn alert_kind(tone: &str) -> &'static str {
    let tone = tone.split_whitespace().next().unwrap_or_default();
    match tone.to_ascii_lowercase().as_str() {
        "tip" | "hint" | "example" => "TIP",
        "important" => "IMPORTANT",
        "warning" | "bug" | "attention" => "WARNING",
        "caution" | "danger" | "error" | "failure" | "fail" => "CAUTION",
        _ => "NOTE",
    }
}

struct Context<'a> {
    doc: &'a AssembledDocument,
}

impl Context<'_> {
    fn block(&self, node: &Node) -> String {
        match node {
            Node::Paragraph { content, .. } => self.inlines(content).trim_end().to_string(),
            Node::Heading { level, content, .. } => format!(
                "{} {}",
                "#".repeat(usize::from(*level)),
                self.inlines(content)
            )
            .trim_end()
            .to_string(),
            Node::Admonition(admonition) => self.alert(admonition),
            Node::TabGroup(group) => join_blocks(group.panels.iter().map(|panel| {
                join_blocks([
                    format!("**{}**", panel.label),
                    self.blocks(&panel.children),
                ])
            })),
            Node::Quote(children) => quote(&self.blocks(children)),
            Node::CodeBlock { fence, info, body } => {
                if body.is_empty() {
                    format!("{fence}{info}\n{fence}")
                } else {
                    format!("{fence}{info}\n{body}\n{fence}")
                }
            }
            Node::RawHtml(html) => html.clone(),
            Node::Rule => ThematicBreak::CANONICAL.to_string(),
            Node::Label { level, text } => format!("{} {text}", "#".repeat(usize::from(*level))),
        }
    }

    fn blocks(&self, nodes: &[Node]) -> String {
        join_blocks(nodes.iter().map(|node| self.block(node)))
    }

    fn alert(&self, admonition: &Admonition) -> String {
        let mut head = format!("[!{}]", alert_kind(&admonition.tone));
        if let Some(title) = admonition.title.as_deref().filter(|t| !t.trim().is_empty()) {
            let _ = write!(head, "\n**{title}**");
        }
        let body = self.blocks(&admonition.children);
        if body.is_empty() {
            quote(&head)
        } else {
            quote(&format!("{head}\n\n{body}"))
        }
    }

    fn inlines(&self, content: &[Inline]) -> String {
        let mut out = String::new();
        for inline in content {
            match inline {
                Inline::Text(text) => out.push_str(text),
                Inline::SoftBreak => out.push('\n'),
                Inline::Code(code) => out.push_str(&CodeSpan::render(code)),
                Inline::Emphasis {
                    style,
                    marker,
                    children,
                } => {
                    let delimiter = match style {
                        EmphasisStyle::Mark => "**".to_string(),
                        _ => marker.to_string().repeat(style.width()),
                    };
                    let _ = write!(out, "{delimiter}{}{delimiter}", self.inlines(children));
                }
                Inline::Link { text, target } => {
                    let text = self.inlines(text);
                    match self.resolve(target) {
                        Some((url, title)) => {
                            let _ = write!(out, "[{text}]{}", destination(url, title));
                        }
                        None => out.push_str(&text),
                    }
                }
                Inline::FootnoteRef(id) => {
                    if let Some(n) = self.doc.resolution().footnote_number(id) {
                        let _ = write!(out, "[^{n}]");
                    }
                }
                Inline::Annotation { id, .. } => {
                    if let Some(n) = self.doc.resolution().annotation_number(id) {
                        let _ = write!(out, "[^{n}]");
                    }
                }
                // `term:` on its own line, the definition on the next.
                marker if marker.is_definition_marker() => {
                    if out.ends_with('\n') {
                        out.pop();
                        out.push_str(":\n");
                    }
                }
                Inline::Html(html) | Inline::Marker(html) => out.push_str(html),
                Inline::Attributes(_) => {}
            }
        }
        out
    }

    fn resolve<'t>(&'t self, target: &'t LinkTarget) -> Option<(&'t str, Option<&'t str>)> {
        match target {
            LinkTarget::Inline { url, title } => Some((url, title.as_deref())),
            LinkTarget::Reference(id) => match &self.doc.references().link(id)?.kind {
                DefinitionKind::Link { url, title } => Some((url, title.as_deref())),
                _ => None,
            },
        }
    }

    /// Footnote definitions in numbering order; annotations become footnotes.
    fn footnotes(&self) -> String {
        self.doc
            .resolution()
            .notes()
            .filter_map(|(n, note)| {
                let content = note.content(self.doc.references())?;
                let text = self.inlines(content).replace('\n', "\n    ");
                Some(format!("[^{n}]: {text}").trim_end().to_string())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
