//! Document tree
//!
//!     A [Document] is a flat sequence of [Block]s. Headings are blocks like any other, the
//!     hierarchy is implied by their level. Text-bearing blocks carry [InlineContent], a
//!     sequence of [Inline] nodes. Every node kind is a closed enum variant that carries only
//!     its own attributes, so dumpers match exhaustively.
//!
//!     The tree owns all its text and holds no reference back to the source.

pub mod elements;
pub mod queries;
pub mod traits;

pub use elements::{
    plain_text, Alignment, Block, CheckboxState, Column, Document, Heading, Image, Indented,
    Inline, InlineContent, InlineVerbatim, ItemMarker, Link, LinkStyle, List, ListItem, ListKind,
    NumberStyle, Object, Paragraph, Span, SpanStyle, Table, Verbatim, VerbatimMarker,
};
pub use queries::{heading_to_anchor, LinkKind};
pub use traits::{Visitor, Walk};
