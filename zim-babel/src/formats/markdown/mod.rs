//! Markdown format implementation
//!
//!     Dump-only, written for CommonMark with the GitHub table and strikethrough extensions.
//!     Markdown is less expressive than zim markup, so a few constructs degrade:
//!
//!     - Indentation is dropped, an indented block in Markdown would be code.
//!     - Checkboxes become bullets carrying the checkbox symbol.
//!     - Lettered lists are numbered with digits from the same start.
//!     - Underline, which Markdown lacks, is written as inline `<u>` HTML.
//!     - Objects are written as fenced code, with the `lang` attribute as info string.
//!
//!     Text is escaped so that a Markdown parser reads it back as the same text: inline
//!     metacharacters always, block markers (`#`, `-`, `1.`) only at the start of a line.

mod serializer;

use crate::common::collect_resources;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{DumpOptions, Dumped};
use zim_parser::zim::ast::Document;

pub use serializer::{escape_markdown, serialize_markdown};

pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark with GitHub tables"
    }

    fn aliases(&self) -> &[&str] {
        &["md"]
    }

    fn extension(&self) -> &str {
        "md"
    }

    fn serialize(&self, doc: &Document, options: &DumpOptions) -> Result<Dumped, FormatError> {
        Ok(Dumped::with_resources(
            serialize_markdown(doc, options),
            collect_resources(doc),
        ))
    }
}
