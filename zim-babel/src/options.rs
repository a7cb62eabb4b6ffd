//! Dump options and results
//!
//!     Every dumper takes the same [DumpOptions] and ignores the fields that do not apply
//!     to it: `document_type` only matters to LaTeX, `file_output` only to the wiki format.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// LaTeX document class, which decides the top sectioning command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentType {
    #[default]
    Report,
    Article,
    Book,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Report => "report",
            DocumentType::Article => "article",
            DocumentType::Book => "book",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "report" => Ok(DocumentType::Report),
            "article" => Ok(DocumentType::Article),
            "book" => Ok(DocumentType::Book),
            other => Err(format!(
                "unknown document type '{other}', expected report, article or book"
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpOptions {
    pub document_type: DocumentType,
    /// Relative file links and images are resolved against this directory
    pub base_dir: Option<PathBuf>,
    /// Number the lines of verbatim blocks
    pub line_numbers: bool,
    /// Wrap the output in a complete document (HTML page, LaTeX preamble)
    pub standalone: bool,
    /// Write page headers before wiki output
    pub file_output: bool,
    /// Interwiki shortcuts and their URL templates
    pub interwiki: BTreeMap<String, String>,
}

/// Output of one dump call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dumped {
    pub output: String,
    /// Files the output refers to, such as images to copy next to it
    pub resources: Vec<String>,
}

impl Dumped {
    /// Output that refers to no resources.
    pub fn text(output: String) -> Self {
        Dumped {
            output,
            resources: Vec::new(),
        }
    }

    pub fn with_resources(output: String, resources: Vec<String>) -> Self {
        Dumped { output, resources }
    }
}
