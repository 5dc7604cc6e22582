//! Footnote and reference-link definitions, and their resolution.
//!
//! Resolution runs in two passes: every definition of every placed fragment is
//! collected first, then uses are checked against the merged table. Forward
//! references therefore work, and uses are never resolved while parsing.

use std::collections::{HashMap, HashSet};

use crate::{
    error::{Error, Location, Result},
    fragment::Provenance,
    ir::{Inline, LinkTarget, Node, walk_inline_list, walk_inlines},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionKind {
    Footnote { content: Vec<Inline> },
    Link { url: String, title: Option<String> },
    Abbreviation { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub id: String,
    pub kind: DefinitionKind,
    pub at: Location,
}

impl Definition {
    pub fn footnote(id: impl Into<String>, content: Vec<Inline>, at: Location) -> Self {
        Self {
            id: id.into(),
            kind: DefinitionKind::Footnote { content },
            at,
        }
    }

    pub fn link(id: impl Into<String>, url: impl Into<String>, title: Option<String>, at: Location) -> Self {
        Self {
            id: id.into(),
            kind: DefinitionKind::Link {
                url: url.into(),
                title,
            },
            at,
        }
    }

    pub fn abbreviation(term: impl Into<String>, text: impl Into<String>, at: Location) -> Self {
        Self {
            id: term.into(),
            kind: DefinitionKind::Abbreviation { text: text.into() },
            at,
        }
    }

    fn key(&self) -> Key {
        match self.kind {
            DefinitionKind::Footnote { .. } => Key::footnote(&self.id),
            DefinitionKind::Link { .. } => Key::link(&self.id),
            DefinitionKind::Abbreviation { .. } => Key::Abbreviation(self.id.clone()),
        }
    }
}

/// Footnotes, links and abbreviations live in separate namespaces; link ids
/// are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Key {
    Footnote(String),
    Link(String),
    Abbreviation(String),
}

impl Key {
    fn footnote(id: &str) -> Self {
        Key::Footnote(id.to_string())
    }

    fn link(id: &str) -> Self {
        Key::Link(id.to_lowercase())
    }
}

/// Definitions in definition order, unique per id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    definitions: Vec<Definition>,
    index: HashMap<Key, usize>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, rejecting a second definition of the same id.
    pub fn define(&mut self, definition: Definition) -> Result<()> {
        let key = definition.key();
        if let Some(&existing) = self.index.get(&key) {
            return Err(Error::DuplicateReferenceId {
                id: definition.id,
                first: self.definitions[existing].at,
                at: definition.at,
            });
        }
        self.index.insert(key, self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    /// Moves every definition of `other` into `self`.
    pub fn merge(&mut self, other: ReferenceTable) -> Result<()> {
        for definition in other.definitions {
            self.define(definition)?;
        }
        Ok(())
    }

    pub fn footnote(&self, id: &str) -> Option<&Definition> {
        self.get(&Key::footnote(id))
    }

    pub fn link(&self, id: &str) -> Option<&Definition> {
        self.get(&Key::link(id))
    }

    fn get(&self, key: &Key) -> Option<&Definition> {
        self.index.get(key).map(|&i| &self.definitions[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Definition> {
        self.definitions.iter()
    }

    pub fn footnotes(&self) -> impl Iterator<Item = &Definition> {
        self.iter()
            .filter(|d| matches!(d.kind, DefinitionKind::Footnote { .. }))
    }

    pub fn links(&self) -> impl Iterator<Item = &Definition> {
        self.iter()
            .filter(|d| matches!(d.kind, DefinitionKind::Link { .. }))
    }

    pub fn abbreviations(&self) -> impl Iterator<Item = &Definition> {
        self.iter()
            .filter(|d| matches!(d.kind, DefinitionKind::Abbreviation { .. }))
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Something a document numbers: a footnote, or an annotation written in
/// the paragraph that cites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Note {
    Footnote(String),
    Annotation { id: String, content: Vec<Inline> },
}

impl Note {
    /// The text the note expands to.
    pub fn content<'a>(&'a self, table: &'a ReferenceTable) -> Option<&'a [Inline]> {
        match self {
            Note::Footnote(id) => match &table.footnote(id)?.kind {
                DefinitionKind::Footnote { content } => Some(content),
                _ => None,
            },
            Note::Annotation { content, .. } => Some(content),
        }
    }
}

/// Note numbering for one assembled document.
///
/// Footnotes and annotations share one sequence, numbered by first use in
/// document order, not by definition order. Footnotes used only inside other
/// notes are numbered after the ones used in the document body, in the order
/// they are reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    notes: Vec<Note>,
}

impl Resolution {
    /// Checks every use in `placed` against `table` and numbers notes.
    pub fn resolve<'a>(
        placed: impl IntoIterator<Item = (Provenance, &'a Node)>,
        table: &ReferenceTable,
    ) -> Result<Self> {
        let mut numbering = Numbering::default();

        for (origin, node) in placed {
            let mut result = Ok(());
            walk_inlines(std::slice::from_ref(node), &mut |line, inline| {
                if result.is_ok() {
                    let at = Location::new(origin, line);
                    result = numbering.check_use(inline, at, table);
                }
            });
            result?;
        }

        // Notes can use footnotes and links themselves.
        let mut next = 0;
        while next < numbering.notes.len() {
            let note = numbering.notes[next].clone();
            let cited_at = numbering.cited_at[next];
            next += 1;
            let at = match &note {
                Note::Footnote(id) => match table.footnote(id) {
                    Some(def) => def.at,
                    None => continue,
                },
                Note::Annotation { .. } => cited_at,
            };
            let Some(content) = note.content(table) else {
                continue;
            };
            let mut result = Ok(());
            walk_inline_list(at.line, content, &mut |line, inline| {
                if result.is_ok() {
                    result = numbering.check_use(inline, Location::new(at.origin, line), table);
                }
            });
            result?;
        }

        log::debug!("resolved {} notes", numbering.notes.len());
        Ok(Self {
            notes: numbering.notes,
        })
    }

    /// 1-based number of a used footnote.
    pub fn footnote_number(&self, id: &str) -> Option<usize> {
        self.position(|note| matches!(note, Note::Footnote(used) if used == id))
    }

    /// 1-based number of an annotation.
    pub fn annotation_number(&self, id: &str) -> Option<usize> {
        self.position(|note| matches!(note, Note::Annotation { id: used, .. } if used == id))
    }

    fn position(&self, found: impl Fn(&Note) -> bool) -> Option<usize> {
        self.notes.iter().position(found).map(|i| i + 1)
    }

    /// Used notes as `(number, note)` in numbering order.
    pub fn notes(&self) -> impl Iterator<Item = (usize, &Note)> {
        self.notes.iter().enumerate().map(|(i, note)| (i + 1, note))
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }
}

#[derive(Default)]
struct Numbering {
    notes: Vec<Note>,
    /// Where each note was first used.
    cited_at: Vec<Location>,
    seen_footnotes: HashSet<String>,
}

impl Numbering {
    fn check_use(
        &mut self,
        inline: &Inline,
        at: Location,
        table: &ReferenceTable,
    ) -> Result<()> {
        match inline {
            Inline::FootnoteRef(id) => {
                if table.footnote(id).is_none() {
                    return Err(Error::UndefinedReference { id: id.clone(), at });
                }
                if self.seen_footnotes.insert(id.clone()) {
                    self.push(Note::Footnote(id.clone()), at);
                }
            }
            Inline::Annotation { id, content, .. } => {
                let note = Note::Annotation {
                    id: id.clone(),
                    content: content.clone(),
                };
                self.push(note, at);
            }
            Inline::Link {
                target: LinkTarget::Reference(id),
                ..
            } if table.link(id).is_none() => {
                return Err(Error::UndefinedReference { id: id.clone(), at });
            }
            _ => {}
        }
        Ok(())
    }

    fn push(&mut self, note: Note, at: Location) {
        self.notes.push(note);
        self.cited_at.push(at);
    }
}
