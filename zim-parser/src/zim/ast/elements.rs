//! Node types of the document tree

mod block;
mod document;
mod inline;
mod list;
mod table;

pub use block::{Block, Heading, Indented, Object, Paragraph, Verbatim};
pub use document::Document;
pub use inline::{
    plain_text, Image, Inline, InlineContent, InlineVerbatim, Link, LinkStyle, Span, SpanStyle,
    VerbatimMarker,
};
pub use list::{CheckboxState, ItemMarker, List, ListItem, ListKind, NumberStyle};
pub use table::{Alignment, Column, Table};
