//! Lexing
//!
//!     Turns source text into a stream of [LineToken]s, one per logical line or fenced
//!     region. This is the only stage that looks at raw lines: headings, list items, table
//!     rows, horizontal rules and fences are recognized here, everything else is passed on as
//!     text for the inline parser.
//!
//!     Page headers are stripped beforehand by [headers::split_headers] when the source is a
//!     complete page file.

pub mod headers;
pub mod line_classification;
pub mod line_grouping;

pub use headers::{dump_headers, split_headers, PageHeaders};
pub use line_classification::{classify_line, measure_indent, LineKind};
pub use line_grouping::{tokenize, LineToken};
