//! # Block Kinds
//!
//! Each block-level construct owns its delimiters here; the scanner asks these
//! types whether a line opens, closes or continues something and never
//! hardcodes `///`, `!!!` or `===` itself.
//!
//! - **`CodeFence`**: ```` ``` ```` / `~~~` runs, raw zones for the scanner
//! - **`BlockQuote`**: `>` prefixes
//! - **`BlockFence`**: explicit `/// kind | title` scopes and their option lines
//! - **`AdmonitionLine`**: indented `!!!` / `???` / `???+` admonitions
//! - **`TabLine`**: indented `=== "Label"` tab panels
//! - **`Definition`**: `[^id]:` footnote and `[id]:` link definitions
//! - **`Heading`**, **`ThematicBreak`**, **`HtmlBlock`**: single-line leaves

pub mod admonition;
pub mod block_fence;
pub mod block_quote;
pub mod code_fence;
pub mod definition;
pub mod leaf;
pub mod tab;

pub use admonition::{AdmonitionHeader, AdmonitionLine};
pub use block_fence::{BlockFence, BlockFenceLine};
pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use definition::{Definition, DefinitionLine};
pub use leaf::{Heading, HtmlBlock, ThematicBreak};
pub use tab::{TabHeader, TabLine};

/// Number of leading ASCII spaces.
pub fn leading_spaces(s: &str) -> usize {
    s.bytes().take_while(|b| *b == b' ').count()
}
