//! XML error types

use thiserror::Error;

/// Result type for XML operations
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// Errors that can occur while reading a document
#[derive(Debug, Error)]
pub enum XmlError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Well-formed XML that is not a usable document
    #[error("Invalid XML document: {0}")]
    InvalidFormat(String),
}
