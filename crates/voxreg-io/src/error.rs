//! Error types for transform documents.

use thiserror::Error;

/// Errors raised while reading or writing transform documents.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document parsed as XML but does not describe a transform or
    /// registry of a supported version.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

impl DocumentError {
    /// Create a malformed document error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument(msg.into())
    }
}
