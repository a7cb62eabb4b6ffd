//! LaTeX format implementation
//!
//!     Dump-only. The `document_type` option picks the document class and with it the
//!     sectioning commands used for heading levels 1 to 5:
//!
//!     | type    | 1          | 2          | 3               | 4               | 5                |
//!     | report  | chapter    | section    | subsection      | subsubsection   | paragraph        |
//!     | article | section    | subsection | subsubsection   | paragraph       | subparagraph     |
//!     | book    | part       | chapter    | section         | subsection      | subsubsection    |
//!
//!     The output relies on a few packages: graphicx, hyperref, listings, enumerate (for
//!     lettered lists), wasysym (checkbox symbols) and ulem (underline and strike). The
//!     `standalone` preamble loads all of them; fragments expect the including document to.

mod serializer;

use crate::common::collect_resources;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{DumpOptions, Dumped};
use zim_parser::zim::ast::Document;

pub use serializer::{escape_latex, serialize_latex};

pub struct LatexFormat;

impl Format for LatexFormat {
    fn name(&self) -> &str {
        "latex"
    }

    fn description(&self) -> &str {
        "LaTeX for report, article or book classes"
    }

    fn aliases(&self) -> &[&str] {
        &["tex"]
    }

    fn extension(&self) -> &str {
        "tex"
    }

    fn serialize(&self, doc: &Document, options: &DumpOptions) -> Result<Dumped, FormatError> {
        Ok(Dumped::with_resources(
            serialize_latex(doc, options),
            collect_resources(doc),
        ))
    }
}
