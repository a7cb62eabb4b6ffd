//! Block-level nodes

use super::inline::InlineContent;
use super::list::List;
use super::table::Table;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Block {
    Heading(Heading),
    Paragraph(Paragraph),
    Indented(Indented),
    List(List),
    Verbatim(Verbatim),
    Table(Table),
    Object(Object),
    HorizontalRule,
    /// A run of empty lines between blocks
    BlankLines(usize),
}

/// Heading, level 1 (top) to 5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub content: InlineContent,
}

/// Consecutive unindented text lines. Line breaks stay in the text runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    pub content: InlineContent,
}

/// Consecutive text lines sharing a tab indent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Indented {
    pub indent: usize,
    pub content: InlineContent,
}

/// A `'''` fenced block. `text` is raw, one `\n` terminated line per source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verbatim {
    pub indent: usize,
    pub text: String,
}

/// A `{{{type: key="value"` block carrying an opaque body for some external handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Object {
    pub indent: usize,
    pub object_type: String,
    pub attributes: Vec<(String, String)>,
    pub body: String,
}

impl Object {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
