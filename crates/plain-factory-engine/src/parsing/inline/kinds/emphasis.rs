use crate::ir::EmphasisStyle;

/// Emphasis delimiter runs: `*x*`, `_x_`, `**x**`, `__x__` and `==x==`.
pub struct EmphasisRun;

impl EmphasisRun {
    pub const STAR: u8 = b'*';
    pub const UNDERSCORE: u8 = b'_';
    pub const MARK: u8 = b'=';

    /// The style a run of `len` delimiter bytes `ch` opens, if any.
    pub fn style(ch: u8, len: usize) -> Option<EmphasisStyle> {
        match (ch, len) {
            (Self::MARK, 2) => Some(EmphasisStyle::Mark),
            (Self::STAR | Self::UNDERSCORE, 1) => Some(EmphasisStyle::Emphasis),
            (Self::STAR | Self::UNDERSCORE, 2) => Some(EmphasisStyle::Strong),
            _ => None,
        }
    }

    pub fn is_delimiter(b: u8) -> bool {
        matches!(b, Self::STAR | Self::UNDERSCORE | Self::MARK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_by_run_length() {
        assert_eq!(EmphasisRun::style(b'*', 1), Some(EmphasisStyle::Emphasis));
        assert_eq!(EmphasisRun::style(b'_', 2), Some(EmphasisStyle::Strong));
        assert_eq!(EmphasisRun::style(b'=', 2), Some(EmphasisStyle::Mark));
        assert_eq!(EmphasisRun::style(b'=', 1), None);
        assert_eq!(EmphasisRun::style(b'*', 3), None);
    }
}
