//! Built-in operators and functions
//!
//! Every operator is a pure function over its (already evaluated) operands,
//! uniformly typed as [`OperatorImpl`]. Binary operators receive both
//! operands; prefix functions receive only the right one, which may be a
//! multi-element [`Node::Sequence`] acting as an argument list.

pub mod aggregate;
pub mod arithmetic;
pub mod cast;
pub mod date;
pub mod duration;
pub mod logical;
pub mod text;

use xeval_core::{Constant, ScalarType};

use crate::ast::{Node, OperatorKind};
use crate::error::{EvalError, EvalResult};

/// Operator implementation signature: `(left, right) -> result`
pub type OperatorImpl = fn(Option<&Node>, Option<&Node>) -> EvalResult<Constant>;

/// The implementation of an operator
pub fn implementation(kind: OperatorKind) -> OperatorImpl {
    match kind {
        OperatorKind::Add => arithmetic::add,
        OperatorKind::Subtract => arithmetic::subtract,
        OperatorKind::Multiply => arithmetic::multiply,
        OperatorKind::Divide => arithmetic::divide,
        OperatorKind::Eq | OperatorKind::Equal => logical::equal,
        OperatorKind::NotEqual => logical::not_equal,
        OperatorKind::And => logical::and,
        OperatorKind::Or => logical::or,
        OperatorKind::Exists => logical::exists,
        OperatorKind::Max => aggregate::max,
        OperatorKind::Min => aggregate::min,
        OperatorKind::DayFromDate => date::day_from_date,
        OperatorKind::MonthFromDate => date::month_from_date,
        OperatorKind::YearFromDate => date::year_from_date,
        OperatorKind::Concat => text::concat,
        OperatorKind::XsdDate => cast::xsd_date,
        OperatorKind::XsdString => cast::xsd_string,
        OperatorKind::DayTimeDuration => duration::day_time_duration,
        OperatorKind::YearMonthDuration => duration::year_month_duration,
    }
}

/// Apply an operator to its operands
pub fn apply(kind: OperatorKind, left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    implementation(kind)(left, right)
}

/// The type two operands are promoted to
///
/// | left × right | common |
/// |---|---|
/// | Integer × Integer | Integer |
/// | Integer/Double × Double/Integer | Double |
/// | String × String | String |
/// | Date × Date | Date |
/// | Date × Period (either order) | Date |
pub fn common_type(left: ScalarType, right: ScalarType) -> EvalResult<ScalarType> {
    use ScalarType::*;

    match (left, right) {
        (Integer, Integer) => Ok(Integer),
        (Integer, Double) | (Double, Integer) | (Double, Double) => Ok(Double),
        (String, String) => Ok(String),
        (Date, Date) | (Date, Period) | (Period, Date) => Ok(Date),
        _ => Err(EvalError::IncompatibleTypes { left, right }),
    }
}

/// The operand, or `MissingOperand` if absent
pub(crate) fn required(kind: OperatorKind, operand: Option<&Node>) -> EvalResult<&Node> {
    operand.ok_or(EvalError::MissingOperand {
        operator: kind.token(),
    })
}

/// The operand as a single Constant
pub(crate) fn constant_operand(kind: OperatorKind, operand: Option<&Node>) -> EvalResult<&Constant> {
    let node = required(kind, operand)?;
    node.as_constant()
        .ok_or_else(|| mismatch(kind, &[node.describe()]))
}

/// Both operands of a binary operator as Constants
pub(crate) fn binary_constants<'n>(
    kind: OperatorKind,
    left: Option<&'n Node>,
    right: Option<&'n Node>,
) -> EvalResult<(&'n Constant, &'n Constant)> {
    let left = required(kind, left)?;
    let right = required(kind, right)?;
    match (left, right) {
        (Node::Constant(l), Node::Constant(r)) => Ok((l, r)),
        _ => Err(mismatch(kind, &[left.describe(), right.describe()])),
    }
}

/// The right operand as a variadic argument list
///
/// A single Constant is a one-element list; a Sequence must hold only
/// Constants.
pub(crate) fn argument_list(kind: OperatorKind, operand: Option<&Node>) -> EvalResult<Vec<&Constant>> {
    let node = required(kind, operand)?;
    match node {
        Node::Constant(c) => Ok(vec![c]),
        Node::Sequence(items) if !items.is_empty() => items
            .iter()
            .map(|item| {
                item.as_constant()
                    .ok_or_else(|| mismatch(kind, &[item.describe()]))
            })
            .collect(),
        _ => Err(mismatch(kind, &[node.describe()])),
    }
}

/// `TypeMismatch` naming the operator and the offending operands
pub(crate) fn mismatch(kind: OperatorKind, operands: &[String]) -> EvalError {
    EvalError::TypeMismatch {
        operator: kind.token(),
        operands: operands.join(" and "),
    }
}

/// `TypeMismatch` for a pair of constants
pub(crate) fn constants_mismatch(kind: OperatorKind, left: &Constant, right: &Constant) -> EvalError {
    EvalError::TypeMismatch {
        operator: kind.token(),
        operands: format!("{} and {}", left.ty(), right.ty()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_common_type() {
        use ScalarType::*;
        assert_eq!(common_type(Integer, Integer), Ok(Integer));
        assert_eq!(common_type(Integer, Double), Ok(Double));
        assert_eq!(common_type(Double, Integer), Ok(Double));
        assert_eq!(common_type(String, String), Ok(String));
        assert_eq!(common_type(Date, Period), Ok(Date));
        assert_eq!(common_type(Period, Date), Ok(Date));
        assert_eq!(
            common_type(Integer, String),
            Err(EvalError::IncompatibleTypes {
                left: Integer,
                right: String
            })
        );
        assert!(common_type(Period, Period).is_err());
        assert!(common_type(Date, Integer).is_err());
    }

    #[test]
    fn test_dispatch_over_integer_operands() {
        let two = Node::Constant(Constant::integer(2));
        let integer_results = [
            (OperatorKind::Add, 4),
            (OperatorKind::Subtract, 0),
            (OperatorKind::Multiply, 4),
            (OperatorKind::Divide, 1),
            (OperatorKind::Eq, 1),
            (OperatorKind::Equal, 1),
            (OperatorKind::NotEqual, 0),
            (OperatorKind::And, 1),
            (OperatorKind::Or, 1),
            (OperatorKind::Exists, 1),
            (OperatorKind::Max, 2),
            (OperatorKind::Min, 2),
        ];
        for (kind, expected) in integer_results {
            assert_eq!(
                apply(kind, Some(&two), Some(&two)),
                Ok(Constant::integer(expected)),
                "{}",
                kind
            );
        }

        for kind in [OperatorKind::Concat, OperatorKind::XsdString] {
            assert_eq!(
                apply(kind, None, Some(&two)),
                Ok(Constant::string("2")),
                "{}",
                kind
            );
        }

        for kind in [
            OperatorKind::DayFromDate,
            OperatorKind::MonthFromDate,
            OperatorKind::YearFromDate,
            OperatorKind::XsdDate,
            OperatorKind::DayTimeDuration,
            OperatorKind::YearMonthDuration,
        ] {
            assert!(
                matches!(
                    apply(kind, None, Some(&two)),
                    Err(EvalError::TypeMismatch { operator, .. }) if operator == kind.token()
                ),
                "{}",
                kind
            );
        }
    }

    #[test]
    fn test_argument_list() {
        let single = Node::Constant(Constant::integer(1));
        assert_eq!(argument_list(OperatorKind::Max, Some(&single)).unwrap().len(), 1);

        let list = Node::Sequence(vec![
            Node::Constant(Constant::integer(1)),
            Node::Constant(Constant::integer(2)),
        ]);
        assert_eq!(argument_list(OperatorKind::Max, Some(&list)).unwrap().len(), 2);

        let unresolved = Node::Sequence(vec![
            Node::Variable("a".into()),
            Node::Constant(Constant::integer(2)),
        ]);
        assert!(matches!(
            argument_list(OperatorKind::Max, Some(&unresolved)),
            Err(EvalError::TypeMismatch { operator: "max", .. })
        ));

        assert_eq!(
            argument_list(OperatorKind::Max, None),
            Err(EvalError::MissingOperand { operator: "max" })
        );
    }
}
