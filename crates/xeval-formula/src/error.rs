//! Formula error types

use thiserror::Error;
use xeval_core::{LookupError, ScalarType};

/// Result type for parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Result type for evaluation
pub type EvalResult<T> = std::result::Result<T, EvalError>;

/// Result type for operations that both parse and evaluate
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors raised while turning formula text into a tree
///
/// Positions are byte offsets into the full formula text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// `(` without a matching `)`
    #[error("Unmatched opening bracket at {position}")]
    UnmatchedBracket { position: usize },

    /// `()` with nothing inside
    #[error("Empty brackets at {position}")]
    EmptyGroup { position: usize },

    /// `$` not followed by a name
    #[error("Missing variable name after '$' at {position}")]
    InvalidVariableName { position: usize },

    /// `'` without a closing quote
    #[error("Unterminated string literal starting at {position}")]
    UnterminatedString { position: usize },

    /// Token is neither a number nor a known operator
    #[error("Unknown operator '{token}' at {position}")]
    UnknownOperator { token: String, position: usize },

    /// `if` without a following `then`
    #[error("'then' is not present after 'if' at {position}")]
    MissingThen { position: usize },

    /// `then` without a following `else`
    #[error("'else' is not present after 'then' at {position}")]
    MissingElse { position: usize },

    /// Groups or conditionals nest deeper than the configured limit
    #[error("Formula nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

/// Errors raised while reducing a tree to a value
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Operator applied to operands it does not accept
    #[error("Cannot apply '{operator}' to {operands}")]
    TypeMismatch {
        operator: &'static str,
        operands: String,
    },

    /// No common type exists for the two operands
    #[error("Can't operate with values of types {left} and {right}")]
    IncompatibleTypes { left: ScalarType, right: ScalarType },

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// The `if` branch did not produce an Integer
    #[error("Condition must evaluate to an Integer, got {0}")]
    InvalidCondition(String),

    /// The node cannot be evaluated on its own
    #[error("Couldn't evaluate {0}")]
    CannotEvaluate(String),

    /// The formula did not reduce to a single value
    #[error("Incorrect expression: reduced to {0}")]
    IncorrectExpression(String),

    /// A value's text does not decode as its declared type
    #[error("Malformed {ty} literal '{value}'")]
    MalformedLiteral { value: String, ty: ScalarType },

    /// An XPath term was used without a document
    #[error("XML document was not provided")]
    NoDocument,

    /// The document lookup failed
    #[error("Can't evaluate XPath '{path}': {source}")]
    XPathFailure {
        path: String,
        #[source]
        source: LookupError,
    },

    /// A `$name` reference is not defined
    #[error("Variable '{0}' is not defined")]
    VariableNotFound(String),

    /// An operator is missing its left or right operand
    #[error("Operator '{operator}' is missing an operand")]
    MissingOperand { operator: &'static str },

    /// Integer arithmetic or date shifting left the representable range
    #[error("Arithmetic overflow in '{operator}'")]
    Overflow { operator: &'static str },

    /// Evaluation recursed deeper than the configured limit
    #[error("Evaluation nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl From<xeval_core::Error> for EvalError {
    fn from(err: xeval_core::Error) -> Self {
        match err {
            xeval_core::Error::InvalidDate(value) => EvalError::MalformedLiteral {
                value,
                ty: ScalarType::Date,
            },
            xeval_core::Error::InvalidPeriod(value) => EvalError::MalformedLiteral {
                value,
                ty: ScalarType::Period,
            },
            xeval_core::Error::InvalidNumber { value, ty } => {
                EvalError::MalformedLiteral { value, ty }
            }
        }
    }
}

/// Errors that can occur during formula parsing or evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Formula parse error
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Formula evaluation error
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvalError),
}
