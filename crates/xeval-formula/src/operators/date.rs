//! Date functions and date/period arithmetic

use chrono::Datelike;
use xeval_core::{Constant, ScalarType};

use super::{constant_operand, mismatch};
use crate::ast::{Node, OperatorKind};
use crate::error::{EvalError, EvalResult};

/// `fn:day-from-date`: day of month, 1-31
pub fn day_from_date(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    date_field(OperatorKind::DayFromDate, right, |d| i64::from(d.day()))
}

/// `fn:month-from-date`: month, 1-12
pub fn month_from_date(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    date_field(OperatorKind::MonthFromDate, right, |d| i64::from(d.month()))
}

/// `fn:year-from-date`: calendar year
pub fn year_from_date(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    date_field(OperatorKind::YearFromDate, right, |d| i64::from(d.year()))
}

fn date_field(
    kind: OperatorKind,
    operand: Option<&Node>,
    field: impl Fn(&chrono::NaiveDateTime) -> i64,
) -> EvalResult<Constant> {
    let value = constant_operand(kind, operand)?;
    if value.ty() != ScalarType::Date {
        return Err(mismatch(kind, &[value.ty().to_string()]));
    }
    let date = value.as_date()?;
    Ok(Constant::integer(field(&date)))
}

/// Apply a Period constant to a Date constant
pub(crate) fn shift_date(
    kind: OperatorKind,
    date: &Constant,
    period: &Constant,
    forward: bool,
) -> EvalResult<Constant> {
    let base = date.as_date()?;
    let period = period.as_period()?;
    let shifted = if forward {
        period.add_to(base)
    } else {
        period.subtract_from(base)
    };
    shifted.map(Constant::date).ok_or(EvalError::Overflow {
        operator: kind.token(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(v: &str) -> Node {
        Node::Constant(Constant::new(v, ScalarType::Date))
    }

    #[test]
    fn test_date_fields() {
        let d = date("2000-06-30");
        assert_eq!(day_from_date(None, Some(&d)), Ok(Constant::integer(30)));
        assert_eq!(month_from_date(None, Some(&d)), Ok(Constant::integer(6)));
        assert_eq!(year_from_date(None, Some(&d)), Ok(Constant::integer(2000)));
    }

    #[test]
    fn test_date_field_requires_date() {
        let s = Node::Constant(Constant::string("2000-06-30"));
        assert_eq!(
            day_from_date(None, Some(&s)),
            Err(EvalError::TypeMismatch {
                operator: "fn:day-from-date",
                operands: "String".into()
            })
        );
        assert_eq!(
            year_from_date(None, None),
            Err(EvalError::MissingOperand {
                operator: "fn:year-from-date"
            })
        );
    }

    #[test]
    fn test_malformed_date() {
        assert!(matches!(
            month_from_date(None, Some(&date("June 30"))),
            Err(EvalError::MalformedLiteral {
                ty: ScalarType::Date,
                ..
            })
        ));
    }

    #[test]
    fn test_shift_date() {
        let d = Constant::new("1928-01-30", ScalarType::Date);
        let p = Constant::new("2:0:0:0:0:0", ScalarType::Period);
        assert_eq!(
            shift_date(OperatorKind::Subtract, &d, &p, false),
            Ok(Constant::new("1926-01-30", ScalarType::Date))
        );
    }
}
