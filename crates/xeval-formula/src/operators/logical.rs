//! Comparison and logical operators
//!
//! Booleans are Integers: results are `1` or `0`, and an operand is truthy
//! when it is greater than zero.

use xeval_core::{Constant, ScalarType};

use super::{binary_constants, common_type, constants_mismatch};
use crate::ast::{Node, OperatorKind};
use crate::error::EvalResult;

/// `eq` and `=`: equality of the raw textual values
///
/// The comparison ignores types, so `'2' eq '2.0'` is false.
pub fn equal(left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let (l, r) = binary_constants(OperatorKind::Equal, left, right)?;
    Ok(Constant::boolean(l.value() == r.value()))
}

/// `!=`: inverse of [`equal`]
pub fn not_equal(left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let (l, r) = binary_constants(OperatorKind::NotEqual, left, right)?;
    Ok(Constant::boolean(l.value() != r.value()))
}

/// `and`: both Integer operands truthy
pub fn and(left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let (a, b) = truthiness(OperatorKind::And, left, right)?;
    Ok(Constant::boolean(a && b))
}

/// `or`: either Integer operand truthy
pub fn or(left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let (a, b) = truthiness(OperatorKind::Or, left, right)?;
    Ok(Constant::boolean(a || b))
}

/// `exists`: 1 when the operand resolved to a value, 0 otherwise
///
/// The evaluator passes `None` when resolving the operand failed because a
/// variable or document node is absent.
pub fn exists(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    Ok(Constant::boolean(right.is_some()))
}

fn truthiness(
    kind: OperatorKind,
    left: Option<&Node>,
    right: Option<&Node>,
) -> EvalResult<(bool, bool)> {
    let (l, r) = binary_constants(kind, left, right)?;
    match common_type(l.ty(), r.ty())? {
        ScalarType::Integer => Ok((l.as_integer()? > 0, r.as_integer()? > 0)),
        _ => Err(constants_mismatch(kind, l, r)),
    }
}
