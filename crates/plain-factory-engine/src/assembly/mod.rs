//! # Assembly
//!
//! Builds source fragments from [`LicenseMetadata`], parses each of them once,
//! and places the parsed sections in the order a [`PlacementPolicy`] names.
//! The result, an [`AssembledDocument`], is what every renderer consumes.

mod policy;

pub use policy::{PlacementPolicy, SectionKind};

use std::collections::BTreeMap;

use html_escape::encode_double_quoted_attribute;

use crate::{
    error::Result,
    format::FormatKind,
    fragment::{Provenance, SourceFragment},
    ir::{Admonition, AdmonitionStyle, Inline, LinkTarget, Node, TabGroup, TabPanel},
    metadata::LicenseMetadata,
    parsing::{ParsedFragment, parse_fragment, replace_year},
    references::{ReferenceTable, Resolution},
};

/// Options shared by every format of one license.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Replaces `{{ year }}` in every fragment when set.
    pub year: Option<String>,
    pub policy: PlacementPolicy,
}

/// A top-level node together with the fragment it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placed {
    pub origin: Provenance,
    pub node: Node,
}

/// One license laid out for one format, with its references resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledDocument {
    format: FormatKind,
    placed: Vec<Placed>,
    references: ReferenceTable,
    resolution: Resolution,
}

impl AssembledDocument {
    pub fn format(&self) -> FormatKind {
        self.format
    }

    pub fn placed(&self) -> &[Placed] {
        &self.placed
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.placed.iter().map(|p| &p.node)
    }

    pub fn references(&self) -> &ReferenceTable {
        &self.references
    }

    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Provenances of the placed nodes in document order, without repeats.
    pub fn origins(&self) -> Vec<Provenance> {
        let mut origins: Vec<Provenance> = Vec::new();
        for placed in &self.placed {
            if origins.last() != Some(&placed.origin) {
                origins.push(placed.origin);
            }
        }
        origins
    }

    /// Nodes placed from one fragment.
    pub fn section(&self, origin: Provenance) -> Vec<&Node> {
        self.placed
            .iter()
            .filter(|p| p.origin == origin)
            .map(|p| &p.node)
            .collect()
    }
}

/// Builds the raw fragments of a license. Blank optional fields yield no
/// fragment.
pub fn source_fragments(metadata: &LicenseMetadata, year: Option<&str>) -> Vec<SourceFragment> {
    let header = format!("# {}\n\n{}\n", metadata.plain_name, metadata.version_line());
    let adaptation = if metadata.is_adaptation {
        metadata.adaptation_disclaimer_text.as_str()
    } else {
        ""
    };
    let texts = [
        (Provenance::Prepend, metadata.extra_prepend.as_str()),
        (Provenance::Header, header.as_str()),
        (Provenance::Body, metadata.reader_license_text.as_str()),
        (Provenance::Interpretation, metadata.interpretation_text.as_str()),
        (Provenance::Boilerplate, metadata.boilerplate_text.as_str()),
        (Provenance::Disclaimer, metadata.disclaimer_text.as_str()),
        (Provenance::AdaptationDisclaimer, adaptation),
        (Provenance::Changelog, metadata.changelog_text.as_str()),
        (Provenance::Original, metadata.original_license_text.as_str()),
        (Provenance::Outro, metadata.outro.as_str()),
    ];

    texts
        .into_iter()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(origin, text)| match year {
            Some(year) => SourceFragment::new(origin, replace_year(text, year)),
            None => SourceFragment::new(origin, text),
        })
        .collect()
}

/// Titles and labels the assembler wraps sections in.
#[derive(Debug, Clone)]
struct Labels {
    interpretation: String,
    disclaimer: String,
    adaptation: String,
    changelog: String,
    original: String,
    embed: String,
}

const EMBED_INSTRUCTIONS: &str = "The above code will embed the license in your site. \
It uses an iframe to display the license as it appears on Plain License.";

/// Parses a license's fragments once and lays them out per format.
#[derive(Debug, Clone)]
pub struct Assembler {
    parsed: BTreeMap<Provenance, ParsedFragment>,
    labels: Labels,
    official_link: Option<Node>,
    embed: Option<Vec<Node>>,
    policy: PlacementPolicy,
}

impl Assembler {
    /// Validates `metadata` and parses every fragment it yields. Structural
    /// errors surface here, before any format is assembled.
    pub fn new(metadata: &LicenseMetadata, options: &AssemblyOptions) -> Result<Self> {
        metadata.validate()?;

        let mut parsed = BTreeMap::new();
        for fragment in source_fragments(metadata, options.year.as_deref()) {
            parsed.insert(fragment.provenance(), parse_fragment(&fragment)?);
        }

        Ok(Self {
            parsed,
            labels: Labels {
                interpretation: metadata.interpretation_title.clone(),
                disclaimer: metadata.disclaimer_title.clone(),
                adaptation: metadata.adaptation_disclaimer_title.clone(),
                changelog: metadata.changelog_label.clone(),
                original: metadata.original_label.clone(),
                embed: metadata.embed_label.clone(),
            },
            official_link: official_link(metadata),
            embed: embed_nodes(metadata),
            policy: options.policy.clone(),
        })
    }

    /// Places the sections `format` admits and resolves their references.
    pub fn assemble(&self, format: FormatKind) -> Result<AssembledDocument> {
        let mut layout = Layout::default();
        for &section in self.policy.sections() {
            if !self.policy.admits(section, format) {
                log::debug!("{format}: skipping {section:?}");
                continue;
            }
            let before = layout.placed.len();
            self.place(section, format, &mut layout)?;
            log::debug!(
                "{format}: placed {} nodes for {section:?}",
                layout.placed.len() - before
            );
        }

        let resolution = Resolution::resolve(
            layout.placed.iter().map(|p| (p.origin, &p.node)),
            &layout.references,
        )?;

        Ok(AssembledDocument {
            format,
            placed: layout.placed,
            references: layout.references,
            resolution,
        })
    }

    fn place(&self, section: SectionKind, format: FormatKind, layout: &mut Layout) -> Result<()> {
        match section {
            SectionKind::Prepend => self.place_as_is(Provenance::Prepend, layout),
            SectionKind::Header => self.place_as_is(Provenance::Header, layout),
            SectionKind::Body => {
                self.place_as_is(Provenance::Body, layout)?;
                self.place_admonition(
                    Provenance::Interpretation,
                    "note",
                    &self.labels.interpretation,
                    layout,
                )
            }
            SectionKind::Boilerplate => self.place_as_is(Provenance::Boilerplate, layout),
            SectionKind::Embed => {
                if let Some(nodes) = &self.embed {
                    layout.push_tab(Provenance::Embed, &self.labels.embed, nodes.clone());
                }
                Ok(())
            }
            SectionKind::Changelog => {
                let Some(changelog) = self.parsed.get(&Provenance::Changelog) else {
                    return Ok(());
                };
                layout.push_tab(
                    Provenance::Changelog,
                    &self.labels.changelog,
                    changelog.nodes.clone(),
                );
                layout.merge(changelog)
            }
            SectionKind::Original => {
                let Some(original) = self.parsed.get(&Provenance::Original) else {
                    return Ok(());
                };
                let mut nodes = original.nodes.clone();
                nodes.extend(self.official_link.clone());
                if format.capabilities().tabbed {
                    layout.push_tab(Provenance::Original, &self.labels.original, nodes);
                } else {
                    layout.push(Provenance::Original, Node::label(2, &self.labels.original));
                    for node in nodes {
                        layout.push(Provenance::Original, node);
                    }
                }
                layout.merge(original)
            }
            SectionKind::Disclaimers => {
                self.place_admonition(
                    Provenance::Disclaimer,
                    "warning",
                    &self.labels.disclaimer,
                    layout,
                )?;
                // Only present when the license is an adaptation.
                self.place_admonition(
                    Provenance::AdaptationDisclaimer,
                    "warning",
                    &self.labels.adaptation,
                    layout,
                )
            }
            SectionKind::Outro => self.place_as_is(Provenance::Outro, layout),
        }
    }

    fn place_as_is(&self, origin: Provenance, layout: &mut Layout) -> Result<()> {
        let Some(fragment) = self.parsed.get(&origin) else {
            return Ok(());
        };
        for node in &fragment.nodes {
            layout.push(origin, node.clone());
        }
        layout.merge(fragment)
    }

    fn place_admonition(
        &self,
        origin: Provenance,
        tone: &str,
        title: &str,
        layout: &mut Layout,
    ) -> Result<()> {
        let Some(fragment) = self.parsed.get(&origin) else {
            return Ok(());
        };
        layout.push(
            origin,
            Node::Admonition(Admonition {
                tone: tone.to_string(),
                title: Some(title.to_string()),
                style: AdmonitionStyle::Static,
                children: fragment.nodes.clone(),
            }),
        );
        layout.merge(fragment)
    }
}

#[derive(Default)]
struct Layout {
    placed: Vec<Placed>,
    references: ReferenceTable,
}

impl Layout {
    fn push(&mut self, origin: Provenance, node: Node) {
        self.placed.push(Placed { origin, node });
    }

    fn push_tab(&mut self, origin: Provenance, label: &str, children: Vec<Node>) {
        self.push(
            origin,
            Node::TabGroup(TabGroup {
                panels: vec![TabPanel {
                    label: label.to_string(),
                    children,
                }],
            }),
        );
    }

    fn merge(&mut self, fragment: &ParsedFragment) -> Result<()> {
        self.references.merge(fragment.references.clone())
    }
}

fn official_link(metadata: &LicenseMetadata) -> Option<Node> {
    let url = metadata.original_url.as_deref()?.trim();
    if url.is_empty() || metadata.link_in_original {
        return None;
    }
    let name = metadata
        .original_name
        .clone()
        .unwrap_or_else(|| metadata.original_label.clone());
    Some(Node::paragraph(vec![
        Inline::Text("Read the official ".to_string()),
        Inline::Link {
            text: vec![Inline::Text(name)],
            target: LinkTarget::Inline {
                url: url.to_string(),
                title: None,
            },
        },
        Inline::Text(".".to_string()),
    ]))
}

/// The iframe snippet a site can paste, and how to use it. `None` when the
/// license has no embeddable page.
fn embed_nodes(metadata: &LicenseMetadata) -> Option<Vec<Node>> {
    let url = metadata.embed_url()?;
    let iframe = format!(
        "<iframe src=\"{}\" title=\"{}\" width=\"100%\" height=\"500px\" frameborder=\"0\"></iframe>",
        encode_double_quoted_attribute(&url),
        encode_double_quoted_attribute(&metadata.plain_name),
    );
    let mut nodes = vec![
        Node::CodeBlock {
            fence: "```".to_string(),
            info: "html".to_string(),
            body: iframe,
        },
        Node::paragraph(vec![Inline::Text(EMBED_INSTRUCTIONS.to_string())]),
    ];
    let page_url = metadata.page_url.as_deref().map(str::trim).filter(|u| !u.is_empty());
    if let Some(page_url) = page_url {
        nodes.push(Node::paragraph(vec![
            Inline::Text("For more details, visit the ".to_string()),
            Inline::Link {
                text: vec![Inline::Text("full license page".to_string())],
                target: LinkTarget::Inline {
                    url: page_url.to_string(),
                    title: None,
                },
            },
            Inline::Text(".".to_string()),
        ]));
    }
    Some(nodes)
}

/// Convenience for a single format.
pub fn assemble(
    metadata: &LicenseMetadata,
    format: FormatKind,
    options: &AssemblyOptions,
) -> Result<AssembledDocument> {
    Assembler::new(metadata, options)?.assemble(format)
}
