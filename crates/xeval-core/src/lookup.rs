//! Document lookups
//!
//! The interpreter never parses XML itself. A formula term starting with
//! `//` is handed verbatim to an [`XmlLookup`], which returns the text of the
//! single node the path selects.

use thiserror::Error;

/// Why a path lookup produced no text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No node matches the path
    #[error("No node matches '{0}'")]
    NotFound(String),

    /// The path selects more than one node
    #[error("{count} nodes match '{path}'")]
    MultipleMatches { path: String, count: usize },

    /// The path could not be interpreted
    #[error("Cannot evaluate path '{path}': {reason}")]
    Query { path: String, reason: String },
}

/// Text access into an already-parsed XML document
pub trait XmlLookup {
    /// Return the text content of the node selected by `path`
    fn text_at(&self, path: &str) -> Result<String, LookupError>;
}
