//! Format registry for format discovery and selection
//!
//! Formats are registered under their canonical name and any aliases. Lookup is
//! case-insensitive, so `HTML`, `Markdown` and `md` all resolve.

use crate::error::FormatError;
use crate::format::Format;
use crate::options::{DumpOptions, Dumped};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use zim_parser::zim::ast::Document;
use zim_parser::zim::parsing::ParseOptions;

/// What a registered format can do, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatInfo {
    pub name: String,
    pub description: String,
    pub aliases: Vec<String>,
    pub extension: String,
    pub parsing: bool,
    pub serialization: bool,
}

/// Registry of document formats
pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
    /// Alias to canonical name
    aliases: HashMap<String, String>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    /// Register a format
    ///
    /// If a format with the same name already exists, it will be replaced.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        let name = format.name().to_lowercase();
        for alias in format.aliases() {
            self.aliases.insert(alias.to_lowercase(), name.clone());
        }
        self.formats.insert(name, Box::new(format));
    }

    fn canonical(&self, name: &str) -> String {
        let lowered = name.to_lowercase();
        match self.aliases.get(&lowered) {
            Some(canonical) => canonical.clone(),
            None => lowered,
        }
    }

    /// Get a format by name or alias
    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(&self.canonical(name))
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    /// Check if a format exists
    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(&self.canonical(name))
    }

    /// List all canonical format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Describe every registered format, sorted by name
    pub fn describe(&self) -> Vec<FormatInfo> {
        self.list_formats()
            .into_iter()
            .filter_map(|name| self.formats.get(&name))
            .map(|format| FormatInfo {
                name: format.name().to_string(),
                description: format.description().to_string(),
                aliases: format.aliases().iter().map(|a| a.to_string()).collect(),
                extension: format.extension().to_string(),
                parsing: format.supports_parsing(),
                serialization: true,
            })
            .collect()
    }

    /// Parse source text using the specified format
    ///
    /// Asking a dump-only format to parse is reported the same as an unknown name.
    pub fn parse(
        &self,
        source: &str,
        format: &str,
        options: &ParseOptions,
    ) -> Result<Document, FormatError> {
        let fmt = self.get(format)?;
        if !fmt.supports_parsing() {
            return Err(FormatError::FormatNotFound(format.to_string()));
        }
        debug!(format = fmt.name(), "parsing");
        fmt.parse(source, options)
    }

    /// Serialize a document using the specified format
    pub fn serialize(
        &self,
        doc: &Document,
        format: &str,
        options: &DumpOptions,
    ) -> Result<Dumped, FormatError> {
        let fmt = self.get(format)?;
        debug!(format = fmt.name(), "dumping");
        fmt.serialize(doc, options)
    }

    /// Create a registry with default formats
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::wiki::WikiFormat);
        registry.register(crate::formats::plain::PlainFormat);
        registry.register(crate::formats::html::HtmlFormat);
        registry.register(crate::formats::latex::LatexFormat);
        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::rst::RstFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
