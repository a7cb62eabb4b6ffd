//! HTML format implementation
//!
//!     Dump-only. The output is an HTML fragment; with `standalone` set it is wrapped in a
//!     complete document whose title is the first heading of the page.
//!
//!     Mapping:
//!
//!     | Zim             | HTML                                                    |
//!     | heading         | `<h1>`..`<h5>` with an `id` derived from the text       |
//!     | paragraph       | `<p>`, line breaks as `<br>`                            |
//!     | indented text   | `<div>` with a left padding of 30pt per level           |
//!     | bullet list     | `<ul>`                                                  |
//!     | checkbox list   | `<ul class="checklist">`, the state as class on `<li>`  |
//!     | numbered list   | `<ol>` with `type` and `start`                          |
//!     | verbatim        | `<pre>`                                                 |
//!     | object          | `<pre class="zim-object">`                              |
//!     | tag             | `<span class="zim-tag">`                                |
//!     | anchor          | an empty `<a id>`                                       |
//!
//!     Heading ids that collide get a numeric suffix in document order: the second
//!     "Notes" heading is `notes-1`, the third `notes-2`.

mod serializer;

use crate::common::collect_resources;
use crate::error::FormatError;
use crate::format::Format;
use crate::options::{DumpOptions, Dumped};
use zim_parser::zim::ast::Document;

pub use serializer::serialize_html;

pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragment or standalone page"
    }

    fn extension(&self) -> &str {
        "html"
    }

    fn serialize(&self, doc: &Document, options: &DumpOptions) -> Result<Dumped, FormatError> {
        Ok(Dumped::with_resources(
            serialize_html(doc, options),
            collect_resources(doc),
        ))
    }
}
