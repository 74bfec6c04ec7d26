//! Error type for the high-level API

use thiserror::Error;
use xeval_formula::{EvalError, FormulaError, ParseError};
use xeval_xml::XmlError;

/// Result type for the high-level API
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from parsing, evaluating or loading a document
#[derive(Debug, Error)]
pub enum Error {
    /// Formula text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Formula could not be evaluated
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvalError),

    /// XML document could not be read
    #[error("XML error: {0}")]
    Xml(#[from] XmlError),
}

impl From<FormulaError> for Error {
    fn from(err: FormulaError) -> Self {
        match err {
            FormulaError::Parse(e) => Error::Parse(e),
            FormulaError::Evaluation(e) => Error::Evaluation(e),
        }
    }
}
