//! # xeval-formula
//!
//! Formula parser and evaluator for xeval.
//!
//! This crate provides:
//! - Formula parsing (text → flat node sequences)
//! - Priority-driven reduction of sequences to a single value
//! - The built-in operator table (arithmetic, comparison, logic, dates,
//!   durations, casts, `max`/`min`/`fn:concat`)
//!
//! ## Example
//!
//! ```rust
//! use xeval_formula::{evaluate_to_value, parse, EvaluationContext, FormulaValue};
//!
//! let tree = parse("1 + 7 / 2.8").unwrap();
//! let value = evaluate_to_value(&tree, &EvaluationContext::simple()).unwrap();
//! assert!(matches!(value, FormulaValue::Double(n) if (n - 3.5).abs() < 1e-9));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod formula;
pub mod operators;
pub mod parser;

pub use ast::{Condition, Node, OperatorKind};
pub use error::{EvalError, EvalResult, FormulaError, FormulaResult, ParseError, ParseResult};
pub use evaluator::{
    evaluate, evaluate_optional, evaluate_to_value, last_operation_index, next_operation_index,
    reduce, EvaluationContext, EvaluationOptions, FormulaValue,
};
pub use formula::Formula;
pub use parser::{classify_number, parse, parse_with_options, ParseOptions};
