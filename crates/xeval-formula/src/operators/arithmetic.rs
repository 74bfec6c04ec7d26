//! Arithmetic operators: `+ - * /`

use xeval_core::{Constant, ScalarType};

use super::{binary_constants, common_type, constants_mismatch};
use crate::ast::{Node, OperatorKind};
use crate::error::{EvalError, EvalResult};
use crate::operators::date::shift_date;

/// `+`: numeric addition, or Date plus Period
pub fn add(left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    additive(OperatorKind::Add, left, right)
}

/// `-`: numeric subtraction, or Date minus Period
pub fn subtract(left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    additive(OperatorKind::Subtract, left, right)
}

/// `*`: numeric multiplication
pub fn multiply(left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let kind = OperatorKind::Multiply;
    let (l, r) = binary_constants(kind, left, right)?;
    match common_type(l.ty(), r.ty())? {
        ScalarType::Integer => l
            .as_integer()?
            .checked_mul(r.as_integer()?)
            .map(Constant::integer)
            .ok_or(EvalError::Overflow {
                operator: kind.token(),
            }),
        ScalarType::Double => Ok(Constant::double(l.as_double()? * r.as_double()?)),
        _ => Err(constants_mismatch(kind, l, r)),
    }
}

/// `/`: numeric division
///
/// Integer division truncates toward zero. Dividing by zero is an error for
/// both Integer and Double operands.
pub fn divide(left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let kind = OperatorKind::Divide;
    let (l, r) = binary_constants(kind, left, right)?;
    match common_type(l.ty(), r.ty())? {
        ScalarType::Integer => {
            let divisor = r.as_integer()?;
            if divisor == 0 {
                return Err(EvalError::DivisionByZero);
            }
            l.as_integer()?
                .checked_div(divisor)
                .map(Constant::integer)
                .ok_or(EvalError::Overflow {
                    operator: kind.token(),
                })
        }
        ScalarType::Double => {
            let divisor = r.as_double()?;
            if divisor == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(Constant::double(l.as_double()? / divisor))
        }
        _ => Err(constants_mismatch(kind, l, r)),
    }
}

fn additive(kind: OperatorKind, left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let (l, r) = binary_constants(kind, left, right)?;
    let common = common_type(l.ty(), r.ty())?;

    // The date is always the base the period is applied to
    let (l, r) = if l.ty() == ScalarType::Period && r.ty() == ScalarType::Date {
        (r, l)
    } else {
        (l, r)
    };

    match common {
        ScalarType::Integer => {
            let (a, b) = (l.as_integer()?, r.as_integer()?);
            let result = match kind {
                OperatorKind::Add => a.checked_add(b),
                _ => a.checked_sub(b),
            };
            result.map(Constant::integer).ok_or(EvalError::Overflow {
                operator: kind.token(),
            })
        }
        ScalarType::Double => {
            let (a, b) = (l.as_double()?, r.as_double()?);
            Ok(Constant::double(match kind {
                OperatorKind::Add => a + b,
                _ => a - b,
            }))
        }
        ScalarType::Date if r.ty() == ScalarType::Period => {
            shift_date(kind, l, r, kind == OperatorKind::Add)
        }
        _ => Err(constants_mismatch(kind, l, r)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn c(value: &str, ty: ScalarType) -> Node {
        Node::Constant(Constant::new(value, ty))
    }

    fn int(v: &str) -> Node {
        c(v, ScalarType::Integer)
    }

    fn dbl(v: &str) -> Node {
        c(v, ScalarType::Double)
    }

    #[test]
    fn test_integer_arithmetic() {
        assert_eq!(add(Some(&int("2")), Some(&int("2"))), Ok(Constant::integer(4)));
        assert_eq!(subtract(Some(&int("2")), Some(&int("5"))), Ok(Constant::integer(-3)));
        assert_eq!(multiply(Some(&int("4")), Some(&int("5"))), Ok(Constant::integer(20)));
        assert_eq!(divide(Some(&int("7")), Some(&int("2"))), Ok(Constant::integer(3)));
        assert_eq!(divide(Some(&int("-7")), Some(&int("2"))), Ok(Constant::integer(-3)));
    }

    #[test]
    fn test_mixed_arithmetic_promotes_to_double() {
        assert_eq!(add(Some(&int("2")), Some(&dbl("2.8"))).unwrap().ty(), ScalarType::Double);
        let product = multiply(Some(&int("2")), Some(&dbl("2.8"))).unwrap();
        assert!((product.as_double().unwrap() - 5.6).abs() < 1e-9);
        let quotient = divide(Some(&int("7")), Some(&dbl("2.8"))).unwrap();
        assert!((quotient.as_double().unwrap() - 2.5).abs() < 1e-9);
        assert_eq!(add(Some(&dbl("2.5")), Some(&dbl("2.5"))).unwrap().value(), "5.0");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            divide(Some(&int("1")), Some(&int("0"))),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            divide(Some(&dbl("1.5")), Some(&dbl("0.0"))),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_integer_overflow() {
        let max = Node::Constant(Constant::integer(i64::MAX));
        assert_eq!(
            add(Some(&max), Some(&int("1"))),
            Err(EvalError::Overflow { operator: "+" })
        );
    }

    #[test]
    fn test_date_plus_period_either_order() {
        let date = c("2022-12-12", ScalarType::Date);
        let period = c("0:0:1:2:0:0", ScalarType::Period);
        let expected = Constant::new("2022-12-13 02:00:00", ScalarType::Date);
        assert_eq!(add(Some(&date), Some(&period)), Ok(expected.clone()));
        assert_eq!(add(Some(&period), Some(&date)), Ok(expected));
    }

    #[test]
    fn test_date_minus_period() {
        let date = c("2000-06-30", ScalarType::Date);
        let period = c("0:3:0:0:0:0", ScalarType::Period);
        assert_eq!(
            subtract(Some(&date), Some(&period)),
            Ok(Constant::new("2000-03-30", ScalarType::Date))
        );
    }

    #[test]
    fn test_type_errors() {
        let s = c("a", ScalarType::String);
        assert!(matches!(
            add(Some(&s), Some(&s)),
            Err(EvalError::TypeMismatch { operator: "+", .. })
        ));
        assert!(matches!(
            add(Some(&int("1")), Some(&s)),
            Err(EvalError::IncompatibleTypes { .. })
        ));
        let date = c("2022-12-12", ScalarType::Date);
        assert!(matches!(
            subtract(Some(&date), Some(&date)),
            Err(EvalError::TypeMismatch { operator: "-", .. })
        ));
        assert!(matches!(
            multiply(Some(&date), Some(&date)),
            Err(EvalError::TypeMismatch { operator: "*", .. })
        ));
        assert_eq!(
            add(None, Some(&int("1"))),
            Err(EvalError::MissingOperand { operator: "+" })
        );
    }

    #[test]
    fn test_malformed_operand_text() {
        assert_eq!(
            add(Some(&int("x")), Some(&int("1"))),
            Err(EvalError::MalformedLiteral {
                value: "x".into(),
                ty: ScalarType::Integer
            })
        );
    }
}
