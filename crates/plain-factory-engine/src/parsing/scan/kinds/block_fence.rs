use super::leading_spaces;

/// A line recognized as an explicit block delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFenceLine<'a> {
    Open {
        count: usize,
        kind: &'a str,
        title: Option<&'a str>,
    },
    Close {
        count: usize,
    },
}

/// Explicit `/// kind | title` ... `///` scopes.
///
/// The closing line must repeat exactly the opener's number of slashes, which
/// is how explicit scopes nest.
pub struct BlockFence;

impl BlockFence {
    pub const SLASH: u8 = b'/';
    pub const MIN_COUNT: usize = 3;
    pub const TITLE_SEPARATOR: char = '|';
    /// Option lines are indented at least this far.
    pub const OPTION_INDENT: usize = 4;

    pub fn parse(line: &str) -> Option<BlockFenceLine<'_>> {
        let t = line.trim_end();
        let count = t.bytes().take_while(|b| *b == Self::SLASH).count();
        if count < Self::MIN_COUNT {
            return None;
        }
        let after = &t[count..];
        if after.is_empty() {
            return Some(BlockFenceLine::Close { count });
        }
        if !after.starts_with(' ') {
            return None;
        }
        let (kind, title) = match after.split_once(Self::TITLE_SEPARATOR) {
            Some((kind, title)) => (kind.trim(), Some(title.trim())),
            None => (after.trim(), None),
        };
        if kind.is_empty()
            || !kind
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some(BlockFenceLine::Open { count, kind, title })
    }

    /// Parses a `key: value` option line following an opener.
    pub fn option(line: &str) -> Option<(&str, &str)> {
        if leading_spaces(line) < Self::OPTION_INDENT {
            return None;
        }
        let (key, value) = line.trim().split_once(':')?;
        let key = key.trim();
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return None;
        }
        Some((key, value.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/// note | Heads up", 3, "note", Some("Heads up"))]
    #[case("//// warning", 4, "warning", None)]
    #[case("/// tab | Plain", 3, "tab", Some("Plain"))]
    #[case("/// details |", 3, "details", Some(""))]
    fn opener(
        #[case] line: &str,
        #[case] count: usize,
        #[case] kind: &str,
        #[case] title: Option<&str>,
    ) {
        assert_eq!(
            BlockFence::parse(line),
            Some(BlockFenceLine::Open { count, kind, title })
        );
    }

    #[test]
    fn closer_counts_slashes() {
        assert_eq!(
            BlockFence::parse("////"),
            Some(BlockFenceLine::Close { count: 4 })
        );
    }

    #[rstest]
    #[case("// note")]
    #[case("///note")]
    #[case("/// two words")]
    #[case("plain text")]
    fn not_a_block_fence(#[case] line: &str) {
        assert_eq!(BlockFence::parse(line), None);
    }

    #[test]
    fn option_lines_need_indentation() {
        assert_eq!(BlockFence::option("    type: warning"), Some(("type", "warning")));
        assert_eq!(BlockFence::option("type: warning"), None);
        assert_eq!(BlockFence::option("    just text"), None);
    }
}
