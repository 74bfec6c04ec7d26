//! Parsed formula handle

use std::fmt;
use std::str::FromStr;

use crate::ast::Node;
use crate::error::{EvalResult, ParseError, ParseResult};
use crate::evaluator::{evaluate_to_value, EvaluationContext, FormulaValue};
use crate::parser::{parse_with_options, ParseOptions};

/// A formula parsed once and evaluated any number of times
///
/// # Example
/// ```rust
/// use xeval_core::{ScalarType, Variables};
/// use xeval_formula::{EvaluationContext, Formula, FormulaValue};
///
/// let formula = Formula::parse("$a * 2").unwrap();
///
/// let mut vars = Variables::new();
/// vars.insert("a", "21", ScalarType::Integer);
/// let value = formula.evaluate(&EvaluationContext::new(&vars)).unwrap();
/// assert_eq!(value, FormulaValue::Integer(42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    root: Node,
}

impl Formula {
    pub fn parse(text: &str) -> ParseResult<Self> {
        Self::parse_with_options(text, &ParseOptions::default())
    }

    pub fn parse_with_options(text: &str, options: &ParseOptions) -> ParseResult<Self> {
        Ok(Self {
            source: text.to_string(),
            root: parse_with_options(text, options)?,
        })
    }

    /// The formula text as given
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed tree
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluate against a set of variables and an optional document
    pub fn evaluate(&self, ctx: &EvaluationContext) -> EvalResult<FormulaValue> {
        evaluate_to_value(&self.root, ctx)
    }
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use xeval_core::{ScalarType, Variables};

    #[test]
    fn test_reuse_against_different_variables() {
        let formula: Formula = "xsd:date($d) - xsd:yearMonthDuration('P1Y')".parse().unwrap();

        let mut first = Variables::new();
        first.insert("d", "1928-01-30", ScalarType::Date);
        let mut second = Variables::new();
        second.insert("d", "2000-02-29", ScalarType::Date);

        let value = formula.evaluate(&EvaluationContext::new(&first)).unwrap();
        assert_eq!(value.to_text(), "1927-01-30 00:00:00");
        let value = formula.evaluate(&EvaluationContext::new(&second)).unwrap();
        assert_eq!(value.to_text(), "1999-02-28 00:00:00");
    }

    #[test]
    fn test_source_is_kept() {
        let formula = Formula::parse("1 + 2").unwrap();
        assert_eq!(formula.source(), "1 + 2");
        assert_eq!(formula.to_string(), "1 + 2");
        assert_eq!(formula.root().children().len(), 3);
    }

    #[test]
    fn test_parse_errors_surface() {
        assert_eq!(
            "(1 + 2".parse::<Formula>(),
            Err(ParseError::UnmatchedBracket { position: 0 })
        );
    }
}
