//! `xsd:` type constructors

use xeval_core::{Constant, ScalarType};

use super::{constant_operand, mismatch};
use crate::ast::{Node, OperatorKind};
use crate::error::EvalResult;

/// `xsd:date`: re-tags a String (or Date) as a Date
///
/// The text is not decoded here; a value that is not a date fails with
/// `MalformedLiteral` where it is used as one.
pub fn xsd_date(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let kind = OperatorKind::XsdDate;
    let value = constant_operand(kind, right)?;
    match value.ty() {
        ScalarType::String | ScalarType::Date => {
            Ok(Constant::new(value.value(), ScalarType::Date))
        }
        other => Err(mismatch(kind, &[other.to_string()])),
    }
}

/// `xsd:string`: the textual value of any constant, as a String
pub fn xsd_string(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let value = constant_operand(OperatorKind::XsdString, right)?;
    Ok(Constant::string(value.value()))
}
