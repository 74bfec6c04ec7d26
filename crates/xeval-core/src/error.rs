//! Error types for xeval-core

use thiserror::Error;

use crate::value::ScalarType;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding the canonical text of a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Text is not a `YYYY-MM-DD HH:MM:SS` date
    #[error("Invalid date '{0}': expected YYYY-MM-DD HH:MM:SS")]
    InvalidDate(String),

    /// Text is not six colon-separated integers
    #[error("Invalid period '{0}': expected years:months:days:hours:minutes:seconds")]
    InvalidPeriod(String),

    /// Text does not parse as the declared numeric type
    #[error("Invalid {ty} literal '{value}'")]
    InvalidNumber { value: String, ty: ScalarType },
}
