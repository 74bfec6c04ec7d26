//! # xeval
//!
//! An interpreter for a small XPath-flavoured formula language, of the
//! kind used to express checks over XBRL-style reports.
//!
//! ## Features
//!
//! - Arithmetic, comparison and logic with Integer, Double and String values
//! - Dates and periods (`xsd:date`, `xsd:yearMonthDuration`,
//!   `xsd:dayTimeDuration`, `fn:year-from-date`, ...)
//! - `if ... then ... else ...` with lazily evaluated branches
//! - `$name` variables and `//path` lookups into an XML document
//!
//! ## Example
//!
//! ```rust
//! use xeval::prelude::*;
//!
//! let document = XmlDocument::parse_str(
//!     "<report><period><end>2000-09-30</end></period></report>",
//! ).unwrap();
//! let calculator = Calculator::with_document(document);
//!
//! let value = calculator.evaluate("fn:month-from-date(xsd:date(//period/end))").unwrap();
//! assert_eq!(value, FormulaValue::Integer(9));
//! ```

pub mod calculator;
pub mod error;
pub mod prelude;

pub use calculator::Calculator;
pub use error::{Error, Result};

// Re-export core types
pub use xeval_core::{Constant, LookupError, Period, ScalarType, VariableStore, Variables, XmlLookup};

// Re-export formula types
pub use xeval_formula::{
    evaluate, evaluate_to_value, parse, EvalError, EvaluationContext, EvaluationOptions, Formula,
    FormulaError, FormulaValue, Node, OperatorKind, ParseError, ParseOptions,
};

// Re-export document types
pub use xeval_xml::{XmlDocument, XmlError};
