//! The self-contained reader page: plain markdown with HTML islands.
//!
//! Containers are written as `<div ... markdown>` islands so any markdown
//! processor with the `md_in_html` convention renders their children. Every
//! piece of text placed inside HTML is escaped.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
    assembly::AssembledDocument,
    format::FormatKind,
    ir::{Admonition, AdmonitionStyle, EmphasisStyle, Inline, LinkTarget, Node, TabGroup},
    parsing::{inline::kinds::CodeSpan, scan::kinds::ThematicBreak},
    references::DefinitionKind,
};

use super::{
    Renderer, finish, join_blocks,
    markdown::{abbreviations, destination},
    quote,
};

pub struct ReaderRenderer;

impl Renderer for ReaderRenderer {
    fn format(&self) -> FormatKind {
        FormatKind::ReaderEmbed
    }

    fn render(&self, doc: &AssembledDocument) -> String {
        let ctx = Context { doc };
        let body = join_blocks(doc.nodes().map(|node| ctx.block(node)));
        let abbreviations = abbreviations(doc.references());
        finish(join_blocks([body, abbreviations, ctx.footnotes()]))
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
            Node::Admonition(admonition) => self.admonition(admonition),
            Node::TabGroup(group) => self.tabs(group),
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
            // Raw HTML, so that the label never reads as license text.
            Node::Label { level, text } => {
                format!("<h{level} class=\"section-label\">{}</h{level}>", encode_text(text))
            }
        }
    }

    fn blocks(&self, nodes: &[Node]) -> String {
        join_blocks(nodes.iter().map(|node| self.block(node)))
    }

    fn admonition(&self, admonition: &Admonition) -> String {
        let class = encode_double_quoted_attribute(&admonition.tone);
        let title = admonition.title.as_deref().map(|t| encode_text(t).into_owned());
        let (open, close) = match admonition.style {
            AdmonitionStyle::Static => {
                let mut open = format!("<div class=\"admonition {class}\" markdown>");
                if let Some(title) = title {
                    let _ = write!(open, "\n<p class=\"admonition-title\">{title}</p>");
                }
                (open, "</div>")
            }
            AdmonitionStyle::Collapsible { open: expanded } => {
                let state = if expanded { " open" } else { "" };
                let summary = title.unwrap_or_else(|| encode_text(&admonition.tone).into_owned());
                (
                    format!("<details class=\"{class}\"{state} markdown>\n<summary>{summary}</summary>"),
                    "</details>",
                )
            }
        };
        join_blocks([open, self.blocks(&admonition.children), close.to_string()])
    }

    fn tabs(&self, group: &TabGroup) -> String {
        let panels = group.panels.iter().map(|panel| {
            join_blocks([
                format!(
                    "<div class=\"tabbed-block\" markdown>\n<p class=\"tabbed-label\">{}</p>",
                    encode_text(&panel.label)
                ),
                self.blocks(&panel.children),
                "</div>".to_string(),
            ])
        });
        join_blocks(
            std::iter::once("<div class=\"tabbed-set\" markdown>".to_string())
                .chain(panels)
                .chain(std::iter::once("</div>".to_string())),
        )
    }

    /// Inline content for markdown context.
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
                    out.push_str(&note_ref(self.doc.resolution().footnote_number(id)))
                }
                Inline::Annotation { id, .. } => {
                    out.push_str(&note_ref(self.doc.resolution().annotation_number(id)))
                }
                Inline::Html(html) | Inline::Marker(html) => out.push_str(html),
                Inline::Attributes(_) => {}
            }
        }
        out
    }

    /// Inline content for HTML context, used inside the footnote list.
    fn html_inlines(&self, content: &[Inline]) -> String {
        let mut out = String::new();
        for inline in content {
            match inline {
                Inline::Text(text) => out.push_str(&encode_text(text)),
                Inline::SoftBreak => out.push(' '),
                Inline::Code(code) => {
                    let _ = write!(out, "<code>{}</code>", encode_text(code));
                }
                Inline::Emphasis {
                    style, children, ..
                } => {
                    let tag = match style {
                        EmphasisStyle::Emphasis => "em",
                        EmphasisStyle::Strong => "strong",
                        EmphasisStyle::Mark => "mark",
                    };
                    let _ = write!(out, "<{tag}>{}</{tag}>", self.html_inlines(children));
                }
                Inline::Link { text, target } => {
                    let text = self.html_inlines(text);
                    match self.resolve(target) {
                        Some((url, _)) => {
                            let _ = write!(
                                out,
                                "<a href=\"{}\">{text}</a>",
                                encode_double_quoted_attribute(url)
                            );
                        }
                        None => out.push_str(&text),
                    }
                }
                Inline::FootnoteRef(id) => {
                    out.push_str(&note_ref(self.doc.resolution().footnote_number(id)))
                }
                Inline::Annotation { id, .. } => {
                    out.push_str(&note_ref(self.doc.resolution().annotation_number(id)))
                }
                Inline::Html(html) => out.push_str(html),
                Inline::Marker(marker) => out.push_str(&encode_text(marker)),
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

    /// The footnote list as one HTML block, in numbering order. Annotations
    /// are listed with the footnotes.
    fn footnotes(&self) -> String {
        let items: Vec<String> = self
            .doc
            .resolution()
            .notes()
            .filter_map(|(n, note)| {
                let content = note.content(self.doc.references())?;
                Some(format!(
                    "<li id=\"fn:{n}\">{} <a href=\"#fnref:{n}\" class=\"footnote-backref\">&#8617;</a></li>",
                    self.html_inlines(content)
                ))
            })
            .collect();
        if items.is_empty() {
            return String::new();
        }
        format!(
            "<section class=\"footnotes\">\n<ol>\n{}\n</ol>\n</section>",
            items.join("\n")
        )
    }
}

fn note_ref(number: Option<usize>) -> String {
    match number {
        Some(n) => format!("<sup id=\"fnref:{n}\"><a href=\"#fn:{n}\">{n}</a></sup>"),
        None => String::new(),
    }
}
