//! # xeval-core
//!
//! Core data structures for the xeval formula interpreter.
//!
//! This crate provides the fundamental types used throughout xeval:
//! - [`ScalarType`] and [`Constant`] - Typed terminal values
//! - [`Period`] - Six-component durations used in date arithmetic
//! - [`Variables`] and the [`VariableStore`] trait - Named variable tables
//! - The [`XmlLookup`] trait - Text lookups into an external XML document
//!
//! ## Example
//!
//! ```rust
//! use xeval_core::{ScalarType, VariableStore, Variables};
//!
//! let mut vars = Variables::new();
//! vars.insert("start", "2022-12-12", ScalarType::Date);
//!
//! let start = vars.lookup("start").unwrap();
//! assert_eq!(start.value(), "2022-12-12 00:00:00");
//! ```

pub mod error;
pub mod lookup;
pub mod period;
pub mod value;
pub mod variables;

// Re-exports for convenience
pub use error::{Error, Result};
pub use lookup::{LookupError, XmlLookup};
pub use period::Period;
pub use value::{canonicalize_date, format_date, format_double, parse_date, Constant, ScalarType};
pub use variables::{VariableStore, Variables};

/// Canonical textual layout of a Date value (chrono format string)
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Suffix appended to a bare `YYYY-MM-DD` date during canonicalization
pub const MIDNIGHT_SUFFIX: &str = " 00:00:00";
