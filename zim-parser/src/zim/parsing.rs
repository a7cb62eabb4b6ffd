//! Parsing entry point
//!
//!     [parse_document] runs the whole pipeline on one source string:
//!         1. Line endings are normalized to `\n`.
//!         2. Page headers are split off when the source is a complete page file. Their
//!            `Wiki-Format` decides whether legacy mode applies.
//!         3. Lines are classified and grouped into tokens, see [crate::zim::lexing].
//!         4. Tokens are built into blocks, parsing inline markup on the way, see
//!            [crate::zim::building].
//!
//!     Every stage recovers from malformed input locally, so parsing cannot fail.

use crate::zim::ast::Document;
use crate::zim::building::build_blocks;
use crate::zim::lexing::{split_headers, tokenize};
use tracing::debug;

pub use crate::zim::inlines::LinkHeuristics;

/// Options for one parse call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Which bare tokens are recognized as links
    pub links: LinkHeuristics,
    /// Read paragraphs made of indented lines only as verbatim text
    pub legacy_indented_verbatim: bool,
    /// The source is a page file starting with headers
    pub file_input: bool,
}

pub fn parse_document(source: &str, options: &ParseOptions) -> Document {
    let normalized = source.replace("\r\n", "\n");

    let (headers, body, legacy) = if options.file_input {
        let (headers, body) = split_headers(&normalized);
        let legacy = options.legacy_indented_verbatim || headers.needs_legacy_mode();
        if legacy && !options.legacy_indented_verbatim {
            debug!(
                wiki_format = headers.get("Wiki-Format"),
                "page predates indented text, reading it in legacy mode"
            );
        }
        (headers.user_headers(), body, legacy)
    } else {
        (Vec::new(), normalized.as_str(), options.legacy_indented_verbatim)
    };

    let blocks = build_blocks(tokenize(body, legacy), &options.links);
    Document {
        headers,
        blocks,
        ends_with_newline: body.is_empty() || body.ends_with('\n'),
    }
}
