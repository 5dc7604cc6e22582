//! # Snapshot Testing Support
//!
//! - **`normalize`**: converts a parsed fragment into a line-free, serializable
//!   [`Snap`] so two parses can be compared structurally (round-trip tests)
//!   or asserted with `insta`
//! - **`invariants`**: runtime checks for scanner output (spans in bounds,
//!   source order, every byte covered exactly once)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{Snap, normalize};
