#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionLine<'a> {
    Footnote {
        id: &'a str,
        text: &'a str,
    },
    Link {
        id: &'a str,
        url: &'a str,
        title: Option<&'a str>,
    },
    Abbreviation {
        term: &'a str,
        text: &'a str,
    },
}

/// Footnote (`[^id]: text`), reference-link (`[id]: url "title"`) and
/// abbreviation (`*[term]: text`) definitions.
pub struct Definition;

impl Definition {
    pub const OPEN: char = '[';
    pub const SEPARATOR: &'static str = "]:";
    pub const FOOTNOTE: char = '^';
    pub const ABBREVIATION: char = '*';
    /// Footnote continuation lines are indented at least this far.
    pub const CONTINUATION_INDENT: usize = 4;

    pub fn parse(line: &str) -> Option<DefinitionLine<'_>> {
        if let Some(rest) = line.strip_prefix(Self::ABBREVIATION) {
            return Self::abbreviation(rest);
        }
        let rest = line.strip_prefix(Self::OPEN)?;
        let close = rest.find(Self::SEPARATOR)?;
        let label = &rest[..close];
        if label.is_empty() || label.contains(['[', ']']) {
            return None;
        }
        let after = &rest[close + Self::SEPARATOR.len()..];

        if let Some(id) = label.strip_prefix(Self::FOOTNOTE) {
            if id.is_empty() || id.contains(char::is_whitespace) {
                return None;
            }
            return Some(DefinitionLine::Footnote {
                id,
                text: after.trim(),
            });
        }

        let after = after.trim();
        if after.is_empty() {
            return None;
        }
        let (url, tail) = match after.split_once(char::is_whitespace) {
            Some((url, tail)) => (url, tail.trim()),
            None => (after, ""),
        };
        let url = url
            .strip_prefix('<')
            .and_then(|u| u.strip_suffix('>'))
            .unwrap_or(url);
        let title = if tail.is_empty() {
            None
        } else {
            Some(unquote_title(tail)?)
        };
        Some(DefinitionLine::Link {
            id: label,
            url,
            title,
        })
    }
}

impl Definition {
    fn abbreviation(rest: &str) -> Option<DefinitionLine<'_>> {
        let rest = rest.strip_prefix(Self::OPEN)?;
        let close = rest.find(Self::SEPARATOR)?;
        let term = &rest[..close];
        let text = rest[close + Self::SEPARATOR.len()..].trim();
        if term.trim().is_empty() || term.contains(['[', ']']) || text.is_empty() {
            return None;
        }
        Some(DefinitionLine::Abbreviation { term, text })
    }
}

fn unquote_title(s: &str) -> Option<&str> {
    [('"', '"'), ('\'', '\''), ('(', ')')]
        .iter()
        .find_map(|(open, close)| s.strip_prefix(*open)?.strip_suffix(*close))
}
