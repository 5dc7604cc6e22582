//! # Inline Kinds
//!
//! Inline constructs that own their syntax delimiters. The parser calls these
//! constants; it never hardcodes `[^` or `` ` ``.
//!
//! - **`CodeSpan`**: backtick runs, raw zones that suppress other parsing
//! - **`LinkSyntax`**: `[text](url)`, `[text][id]` and `[^id]`
//! - **`EmphasisRun`**: `*`, `_` and `==` runs
//! - **`InlineHtml`**: void elements and comments
//! - **`AttributeList`**: `{ .class #id }`

pub mod attributes;
pub mod code_span;
pub mod emphasis;
pub mod html;
pub mod link;

pub use attributes::AttributeList;
pub use code_span::CodeSpan;
pub use emphasis::EmphasisRun;
pub use html::InlineHtml;
pub use link::LinkSyntax;
