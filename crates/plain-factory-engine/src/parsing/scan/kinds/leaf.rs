/// ATX headings `#` to `######`.
pub struct Heading;

impl Heading {
    pub const MARK: u8 = b'#';
    pub const MAX_LEVEL: usize = 6;

    pub fn parse(line: &str) -> Option<(u8, &str)> {
        let level = line.bytes().take_while(|b| *b == Self::MARK).count();
        if level == 0 || level > Self::MAX_LEVEL {
            return None;
        }
        let rest = &line[level..];
        if !rest.is_empty() && !rest.starts_with(' ') {
            return None;
        }
        Some((level as u8, rest.trim()))
    }
}

/// `---`, `***`, `___` (spaces allowed between the characters).
pub struct ThematicBreak;

impl ThematicBreak {
    pub const CANONICAL: &'static str = "---";

    pub fn is_rule(line: &str) -> bool {
        let mut chars = line.chars().filter(|c| !c.is_whitespace());
        let Some(first) = chars.next() else {
            return false;
        };
        if !matches!(first, '-' | '*' | '_') {
            return false;
        }
        let mut count = 1;
        for c in chars {
            if c != first {
                return false;
            }
            count += 1;
        }
        count >= 3
    }
}

/// Raw HTML blocks start with a tag, comment or declaration.
pub struct HtmlBlock;

impl HtmlBlock {
    pub fn starts(line: &str) -> bool {
        let mut chars = line.chars();
        chars.next() == Some('<')
            && chars
                .next()
                .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# Title", Some((1, "Title")))]
    #[case("### Deep  ", Some((3, "Deep")))]
    #[case("#", Some((1, "")))]
    #[case("#hashtag", None)]
    #[case("####### seven", None)]
    fn headings(#[case] line: &str, #[case] expected: Option<(u8, &str)>) {
        assert_eq!(Heading::parse(line), expected);
    }

    #[rstest]
    #[case("---", true)]
    #[case("* * *", true)]
    #[case("___", true)]
    #[case("--", false)]
    #[case("-*-", false)]
    #[case("- item", false)]
    fn rules(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(ThematicBreak::is_rule(line), expected);
    }

    #[test]
    fn html_block_starts() {
        assert!(HtmlBlock::starts("<div class=\"x\">"));
        assert!(HtmlBlock::starts("</div>"));
        assert!(HtmlBlock::starts("<!-- note -->"));
        assert!(!HtmlBlock::starts("< 3 apples"));
        assert!(!HtmlBlock::starts("text <b>"));
    }
}
