//! Plain text format implementation
//!
//!     Dumping strips all markup. What remains is the text a reader would see, with the
//!     line structure kept: list items get a `-` bullet (or the checkbox symbol) and are
//!     nested two spaces per level, verbatim blocks are copied as they are, tables are laid
//!     out as padded columns.
//!
//!     Parsing is deliberately shallow. Plain text has no markup, so the parser only splits
//!     paragraphs on blank lines and turns URLs into links.

mod parser;
mod serializer;

use crate::common::collect_resources;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{DumpOptions, Dumped};
use zim_parser::zim::ast::Document;
use zim_parser::zim::parsing::ParseOptions;

pub use parser::parse_plain;
pub use serializer::serialize_plain;

pub struct PlainFormat;

impl Format for PlainFormat {
    fn name(&self) -> &str {
        "plain"
    }

    fn description(&self) -> &str {
        "Plain text without markup"
    }

    fn aliases(&self) -> &[&str] {
        &["text", "txt"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, _options: &ParseOptions) -> Result<Document, FormatError> {
        Ok(parse_plain(source))
    }

    fn serialize(&self, doc: &Document, _options: &DumpOptions) -> Result<Dumped, FormatError> {
        Ok(Dumped::with_resources(
            serialize_plain(doc),
            collect_resources(doc),
        ))
    }
}
