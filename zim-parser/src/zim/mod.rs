//! Zim wiki markup
//!
//!     The source is read line by line. Lines are classified in isolation (headings, list
//!     items, table rows, fences) and grouped into blocks afterwards, so a line never needs
//!     more than the surrounding block to be understood. Inline markup is resolved per line
//!     and never spans a line break.
//!
//!     Modules, in pipeline order:
//!     - lexing: page headers and line classification
//!     - inlines: spans, links, images, tags and anchors within a line
//!     - building: grouping classified lines into blocks
//!     - ast: the document tree
//!     - parsing: the entry point and its options

pub mod ast;
pub mod building;
pub mod inlines;
pub mod lexing;
pub mod parsing;
