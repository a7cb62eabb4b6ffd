//! Wiki format implementation
//!
//!     The native markup, and the format pages are stored in. It is the only format that
//!     round-trips: dumping a parsed page gives back the source, up to normalized
//!     indentation and table padding. To make that possible the dumper reproduces what
//!     the tree remembers about the source, such as literal list labels, which verbatim
//!     marker was used and the blank lines between blocks.

mod serializer;

use crate::common::collect_resources;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{DumpOptions, Dumped};
use zim_parser::zim::ast::Document;
use zim_parser::zim::parsing::{parse_document, ParseOptions};

pub use serializer::{serialize_inlines, serialize_wiki};

pub struct WikiFormat;

impl Format for WikiFormat {
    fn name(&self) -> &str {
        "wiki"
    }

    fn description(&self) -> &str {
        "Zim wiki markup"
    }

    fn aliases(&self) -> &[&str] {
        &["zim", "zim-wiki"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str, options: &ParseOptions) -> Result<Document, FormatError> {
        Ok(parse_document(source, options))
    }

    fn serialize(&self, doc: &Document, options: &DumpOptions) -> Result<Dumped, FormatError> {
        Ok(Dumped::with_resources(
            serialize_wiki(doc, options),
            collect_resources(doc),
        ))
    }
}
