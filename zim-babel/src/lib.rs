//! Output formats for zim wiki documents
//!
//!     This crate turns a parsed [Document] into text in one of several formats, and parses
//!     the formats that can be read back. It is a pure library: no I/O, no environment
//!     access. The `zim` binary in zim-cli is a thin shell around it.
//!
//! Architecture
//!
//!     - [Format]: the interface every format implements. Serialization is mandatory,
//!       parsing is optional.
//!     - [FormatRegistry]: name and alias lookup over the registered formats.
//!     - [formats]: one module per format. Each is a tree walker that writes its output
//!       directly; escaping rules live next to the walker that needs them.
//!     - [common]: link resolution and table layout shared by several dumpers.
//!
//!     The file structure:
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait
//!     ├── options.rs              # DumpOptions and the Dumped result
//!     ├── registry.rs             # FormatRegistry
//!     ├── common
//!     │   ├── linker.rs           # href and image path resolution
//!     │   ├── resources.rs        # resources referenced by a document
//!     │   └── table.rs            # column widths and cell padding
//!     └── formats
//!         ├── wiki                # native markup, parse + dump
//!         ├── plain               # parse + dump
//!         ├── html
//!         ├── latex
//!         ├── markdown
//!         └── rst
//!
//! Entry points
//!
//!     [parse] and [dump] go through a registry with every built-in format. They fail only
//!     with [FormatError::FormatNotFound]: malformed input never fails, it degrades to the
//!     most literal reading.

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod options;
pub mod registry;

pub use error::FormatError;
pub use format::Format;
pub use options::{DocumentType, DumpOptions, Dumped};
pub use registry::{FormatInfo, FormatRegistry};
pub use zim_parser::zim::ast::Document;
pub use zim_parser::zim::parsing::{LinkHeuristics, ParseOptions};

use once_cell::sync::Lazy;

static DEFAULT_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);

/// Parse `source` written in the named format.
pub fn parse(format: &str, source: &str, options: &ParseOptions) -> Result<Document, FormatError> {
    DEFAULT_REGISTRY.parse(source, format, options)
}

/// Dump a document to the named format, along with the resources it refers to.
pub fn dump(format: &str, doc: &Document, options: &DumpOptions) -> Result<Dumped, FormatError> {
    DEFAULT_REGISTRY.serialize(doc, format, options)
}

/// The registry behind [parse] and [dump].
pub fn default_registry() -> &'static FormatRegistry {
    &DEFAULT_REGISTRY
}
