//! reStructuredText format implementation
//!
//!     Dump-only. reStructuredText is stricter about layout than zim markup, so the dumper
//!     adds what docutils needs to read the output back:
//!
//!     - Headings are underlined with `=`, `-`, `^` and `"` for levels 1 to 4; level 5 shares
//!       the level 4 underline.
//!     - Nested lists are set off by blank lines and indented to the parent item's text.
//!     - Inline markup does not nest. Spans inside bold or italic keep only their text.
//!     - Underline and strike have no markup and keep only their text.
//!     - An image alone in a paragraph becomes an `.. image::` directive. Images inside text
//!       become substitution references, defined at the end of the output.
//!     - Verbatim blocks are literal blocks; `code` objects use `.. code-block::`.

mod serializer;

use crate::common::collect_resources;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{DumpOptions, Dumped};
use zim_parser::zim::ast::Document;

pub use serializer::{escape_rst, serialize_rst};

pub struct RstFormat;

impl Format for RstFormat {
    fn name(&self) -> &str {
        "rst"
    }

    fn description(&self) -> &str {
        "reStructuredText"
    }

    fn aliases(&self) -> &[&str] {
        &["rest", "restructuredtext"]
    }

    fn extension(&self) -> &str {
        "rst"
    }

    fn serialize(&self, doc: &Document, options: &DumpOptions) -> Result<Dumped, FormatError> {
        Ok(Dumped::with_resources(
            serialize_rst(doc, options),
            collect_resources(doc),
        ))
    }
}
