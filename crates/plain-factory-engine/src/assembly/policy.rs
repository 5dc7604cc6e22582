use crate::format::FormatKind;

/// A section of an assembled license, in the vocabulary of the placement
/// policy. One section may hold nodes from several fragments (the body
/// section carries the interpretation note, for instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Prepend,
    Header,
    Body,
    Boilerplate,
    Embed,
    Changelog,
    Original,
    Disclaimers,
    Outro,
}

impl SectionKind {
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Prepend,
        SectionKind::Header,
        SectionKind::Body,
        SectionKind::Boilerplate,
        SectionKind::Embed,
        SectionKind::Changelog,
        SectionKind::Original,
        SectionKind::Disclaimers,
        SectionKind::Outro,
    ];
}

/// The fixed order in which sections are placed, and which of them a format
/// admits. Placement never depends on the order fragments were supplied in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPolicy {
    sections: Vec<SectionKind>,
}

impl Default for PlacementPolicy {
    /// Prepend, header, body, boilerplate, embed, changelog, original,
    /// disclaimers, outro.
    fn default() -> Self {
        Self {
            sections: SectionKind::ALL.to_vec(),
        }
    }
}

impl PlacementPolicy {
    /// A policy placing only `sections`, in the given order.
    pub fn new(sections: impl IntoIterator<Item = SectionKind>) -> Self {
        let mut seen = Vec::new();
        for section in sections {
            if !seen.contains(&section) {
                seen.push(section);
            }
        }
        Self { sections: seen }
    }

    pub fn sections(&self) -> &[SectionKind] {
        &self.sections
    }

    /// Whether `section` is placed at all when producing `format`.
    pub fn admits(&self, section: SectionKind, format: FormatKind) -> bool {
        if !self.sections.contains(&section) {
            return false;
        }
        let caps = format.capabilities();
        match section {
            SectionKind::Boilerplate => caps.boilerplate,
            SectionKind::Embed | SectionKind::Changelog => caps.tabbed,
            SectionKind::Original => caps.original,
            SectionKind::Disclaimers => caps.disclaimers,
            SectionKind::Prepend | SectionKind::Header | SectionKind::Body | SectionKind::Outro => {
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FormatKind::Markdown, SectionKind::Changelog, true)]
    #[case(FormatKind::PlainMarkdown, SectionKind::Changelog, false)]
    #[case(FormatKind::Markdown, SectionKind::Embed, true)]
    #[case(FormatKind::ReaderEmbed, SectionKind::Embed, false)]
    #[case(FormatKind::ReaderEmbed, SectionKind::Boilerplate, true)]
    #[case(FormatKind::Markdown, SectionKind::Boilerplate, false)]
    #[case(FormatKind::Plaintext, SectionKind::Original, false)]
    #[case(FormatKind::Plaintext, SectionKind::Disclaimers, true)]
    #[case(FormatKind::Plaintext, SectionKind::Body, true)]
    fn default_policy_admission(
        #[case] format: FormatKind,
        #[case] section: SectionKind,
        #[case] expected: bool,
    ) {
        assert_eq!(PlacementPolicy::default().admits(section, format), expected);
    }

    #[test]
    fn custom_policy_drops_unlisted_sections_and_duplicates() {
        let policy = PlacementPolicy::new([
            SectionKind::Body,
            SectionKind::Outro,
            SectionKind::Body,
        ]);
        assert_eq!(policy.sections(), &[SectionKind::Body, SectionKind::Outro]);
        assert!(!policy.admits(SectionKind::Header, FormatKind::Markdown));
    }
}
