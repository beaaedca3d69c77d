//! # Block Kinds
//!
//! One type per recognisable line-leading construct. Each owns its marker
//! syntax and knows how to build its [`ContainerDescriptor`]; the elevator
//! only decides the order they are tried in.
//!
//! - **`BlockQuote`**: `>` (or `&gt;`), optional space
//! - **`Header`**: a run of `#`, one space
//! - **`HorizontalRule`**: three or more of the same `-`, `=` or `*`
//! - **`OrderedList`**: digits, `.`, one space
//! - **`UnorderedList`**: one of `*`, `+`, `-`, one space
//!
//! "Space" always means an ASCII space or a non-breaking space, since editors
//! commonly insert the latter for a typed trailing space.
//!
//! [`ContainerDescriptor`]: super::ContainerDescriptor

pub mod block_quote;
pub mod header;
pub mod list;
pub mod rule;

pub use block_quote::BlockQuote;
pub use header::Header;
pub use list::{OrderedList, UnorderedList};
pub use rule::HorizontalRule;

/// Character class for a space after a marker.
pub const SPACE: &str = r"[ \x{a0}]";
