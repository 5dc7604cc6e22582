use crate::ir::AdmonitionStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdmonitionHeader<'a> {
    pub style: AdmonitionStyle,
    /// Everything between the marker and the title, e.g. `note` or `tip inline`.
    pub tone: &'a str,
    pub title: Option<&'a str>,
}

/// Indented admonitions: `!!! tone "title"`, `??? tone`, `???+ tone`.
pub struct AdmonitionLine;

impl AdmonitionLine {
    pub const STATIC: &'static str = "!!!";
    pub const COLLAPSED: &'static str = "???";
    pub const EXPANDED: &'static str = "???+";
    pub const QUOTE: char = '"';

    pub fn header(line: &str) -> Option<AdmonitionHeader<'_>> {
        let (style, rest) = if let Some(rest) = line.strip_prefix(Self::EXPANDED) {
            (AdmonitionStyle::Collapsible { open: true }, rest)
        } else if let Some(rest) = line.strip_prefix(Self::COLLAPSED) {
            (AdmonitionStyle::Collapsible { open: false }, rest)
        } else if let Some(rest) = line.strip_prefix(Self::STATIC) {
            (AdmonitionStyle::Static, rest)
        } else {
            return None;
        };
        if !rest.starts_with(' ') {
            return None;
        }
        let rest = rest.trim();
        let (tone, title) = match (rest.find(Self::QUOTE), rest.rfind(Self::QUOTE)) {
            (Some(open), Some(close)) if close > open => {
                (rest[..open].trim(), Some(&rest[open + 1..close]))
            }
            _ => (rest, None),
        };
        if tone.is_empty() {
            return None;
        }
        Some(AdmonitionHeader { style, tone, title })
    }

    /// The marker that opens an admonition of `style`.
    pub fn marker(style: AdmonitionStyle) -> &'static str {
        match style {
            AdmonitionStyle::Static => Self::STATIC,
            AdmonitionStyle::Collapsible { open: false } => Self::COLLAPSED,
            AdmonitionStyle::Collapsible { open: true } => Self::EXPANDED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_with_title() {
        let h = AdmonitionLine::header(r#"!!! note "Read this""#).unwrap();
        assert_eq!(h.style, AdmonitionStyle::Static);
        assert_eq!(h.tone, "note");
        assert_eq!(h.title, Some("Read this"));
    }

    #[test]
    fn collapsible_variants() {
        let closed = AdmonitionLine::header("??? tip").unwrap();
        assert_eq!(closed.style, AdmonitionStyle::Collapsible { open: false });
        assert_eq!(closed.title, None);

        let open = AdmonitionLine::header(r#"???+ warning """#).unwrap();
        assert_eq!(open.style, AdmonitionStyle::Collapsible { open: true });
        assert_eq!(open.title, Some(""));
    }

    #[test]
    fn title_keeps_inner_quotes() {
        let h = AdmonitionLine::header(r#"!!! info "the "plain" way""#).unwrap();
        assert_eq!(h.title, Some(r#"the "plain" way"#));
    }

    #[test]
    fn requires_tone() {
        assert!(AdmonitionLine::header("!!!").is_none());
        assert!(AdmonitionLine::header(r#"!!! "only title""#).is_none());
        assert!(AdmonitionLine::header("!!!note").is_none());
    }
}
