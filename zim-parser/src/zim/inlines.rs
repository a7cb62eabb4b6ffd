//! Inline parsing
//!
//!     Inline markup is resolved one line at a time. Two kinds of constructs are recognized:
//!
//!     - Atomic constructs are matched as a whole and never nest: `[[links]]`, `{{images}}`,
//!       `''verbatim''`, tags, anchors and bare links picked up by [LinkHeuristics].
//!     - Spans are opened and closed by paired delimiters and nest freely: `**bold**`,
//!       `//italic//`, `__underline__`, `~~strike~~`, `_{sub}` and `^{sup}`.
//!
//!     A delimiter only opens a span when the next character is not whitespace, and only
//!     closes one when the previous character is not whitespace. Anything left unmatched is
//!     kept as literal text.

pub mod links;
pub mod parser;

pub use links::LinkHeuristics;
pub use parser::{parse_inlines, parse_line};
