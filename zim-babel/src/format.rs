//! Format trait definition
//!
//! Every output format implements [Format]. Dumping is what a format is for, so
//! [Format::serialize] has no default. Parsing is optional and only the wiki and plain text
//! formats provide it.

use crate::error::FormatError;
use crate::options::{DumpOptions, Dumped};
use zim_parser::zim::ast::Document;
use zim_parser::zim::parsing::ParseOptions;

/// Trait for document formats
///
/// # Examples
///
/// ```ignore
/// struct Shout;
///
/// impl Format for Shout {
///     fn name(&self) -> &str {
///         "shout"
///     }
///
///     fn serialize(&self, doc: &Document, _options: &DumpOptions) -> Result<Dumped, FormatError> {
///         Ok(Dumped::text(plain(doc).to_uppercase()))
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Canonical name, lowercase (e.g. "wiki", "html")
    fn name(&self) -> &str;

    /// Optional description of this format
    fn description(&self) -> &str {
        ""
    }

    /// Other names the registry accepts for this format
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Conventional file extension, without the dot
    fn extension(&self) -> &str {
        "txt"
    }

    /// Whether this format supports parsing (source → Document)
    fn supports_parsing(&self) -> bool {
        false
    }

    /// Parse source text into a Document
    ///
    /// Formats that can only be dumped keep the default, which reports the format as not
    /// found for parsing.
    fn parse(&self, _source: &str, _options: &ParseOptions) -> Result<Document, FormatError> {
        Err(FormatError::FormatNotFound(format!(
            "{} (not parseable)",
            self.name()
        )))
    }

    /// Serialize a Document into this format
    fn serialize(&self, doc: &Document, options: &DumpOptions) -> Result<Dumped, FormatError>;
}
