//! Error type for format lookup

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// No registered format by this name, or the format cannot do what was asked
    #[error("format not found: {0}")]
    FormatNotFound(String),
}
