//! Variadic `max` and `min`

use std::cmp::Ordering;

use xeval_core::{Constant, ScalarType};

use super::{argument_list, common_type, constants_mismatch, mismatch};
use crate::ast::{Node, OperatorKind};
use crate::error::EvalResult;

/// `max(a, b, ...)` over Integers, Doubles or Dates
pub fn max(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    extremum(OperatorKind::Max, right, Ordering::Greater)
}

/// `min(a, b, ...)` over Integers, Doubles or Dates
pub fn min(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    extremum(OperatorKind::Min, right, Ordering::Less)
}

/// Pairwise fold keeping the value that compares as `keep` (ties keep the earlier value)
fn extremum(kind: OperatorKind, operand: Option<&Node>, keep: Ordering) -> EvalResult<Constant> {
    let args = argument_list(kind, operand)?;
    let mut iter = args.into_iter();
    let Some(first) = iter.next() else {
        return Err(mismatch(kind, &["no arguments".to_string()]));
    };
    if !matches!(
        first.ty(),
        ScalarType::Integer | ScalarType::Double | ScalarType::Date
    ) {
        return Err(mismatch(kind, &[first.ty().to_string()]));
    }

    let mut best = first.clone();
    for arg in iter {
        best = match common_type(best.ty(), arg.ty())? {
            ScalarType::Integer => {
                let (a, b) = (best.as_integer()?, arg.as_integer()?);
                Constant::integer(if b.cmp(&a) == keep { b } else { a })
            }
            ScalarType::Double => {
                let (a, b) = (best.as_double()?, arg.as_double()?);
                let pick_b = b.partial_cmp(&a) == Some(keep);
                Constant::double(if pick_b { b } else { a })
            }
            ScalarType::Date if best.ty() == arg.ty() => {
                let (a, b) = (best.as_date()?, arg.as_date()?);
                Constant::date(if b.cmp(&a) == keep { b } else { a })
            }
            _ => return Err(constants_mismatch(kind, &best, arg)),
        };
    }
    Ok(best)
}
