/// Link, reference-link and footnote-use delimiters.
pub struct LinkSyntax;

impl LinkSyntax {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const FOOTNOTE_OPEN: &'static [u8; 2] = b"[^";
    pub const DEST_OPEN: u8 = b'(';
    pub const DEST_CLOSE: u8 = b')';

    /// Splits a link destination into url and optional quoted title.
    pub fn split_destination(dest: &str) -> (&str, Option<&str>) {
        let dest = dest.trim();
        match dest.split_once(char::is_whitespace) {
            Some((url, rest)) => {
                let rest = rest.trim();
                let title = rest
                    .strip_prefix('"')
                    .and_then(|t| t.strip_suffix('"'))
                    .or_else(|| rest.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')));
                match title {
                    Some(title) => (url, Some(title)),
                    None => (dest, None),
                }
            }
            None => (dest, None),
        }
    }

    /// Footnote ids and reference ids may not contain whitespace or brackets.
    pub fn is_footnote_id(id: &str) -> bool {
        !id.is_empty() && !id.contains(|c: char| c.is_whitespace() || c == '[' || c == ']')
    }
}
