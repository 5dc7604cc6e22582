#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabHeader<'a> {
    pub label: &'a str,
    pub new_group: bool,
}

/// Indented tab panels: `=== "Label"`, or `===! "Label"` to start a new group.
pub struct TabLine;

impl TabLine {
    pub const MARKER: &'static str = "===";
    pub const NEW_GROUP: char = '!';

    pub fn header(line: &str) -> Option<TabHeader<'_>> {
        let rest = line.strip_prefix(Self::MARKER)?;
        let (new_group, rest) = match rest.strip_prefix(Self::NEW_GROUP) {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        if !rest.starts_with(' ') {
            return None;
        }
        let label = rest
            .trim()
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))?;
        Some(TabHeader { label, new_group })
    }

    pub fn marker(new_group: bool) -> String {
        if new_group {
            format!("{}{}", Self::MARKER, Self::NEW_GROUP)
        } else {
            Self::MARKER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_tab() {
        assert_eq!(
            TabLine::header(r#"=== "Plain License""#),
            Some(TabHeader { label: "Plain License", new_group: false })
        );
    }

    #[test]
    fn new_group_tab() {
        assert_eq!(
            TabLine::header(r#"===! "Official""#),
            Some(TabHeader { label: "Official", new_group: true })
        );
    }

    #[test]
    fn label_must_be_quoted() {
        assert_eq!(TabLine::header("=== Plain"), None);
        assert_eq!(TabLine::header("==="), None);
        assert_eq!(TabLine::header("=====\"x\""), None);
    }
}
