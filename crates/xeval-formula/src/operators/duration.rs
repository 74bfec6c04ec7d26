//! Duration literal constructors
//!
//! `xsd:dayTimeDuration` accepts `P[nD][T[nH][nM][nS]]` and
//! `xsd:yearMonthDuration` accepts `P[nY][nM]`. Text that does not fit the
//! grammar yields the zero period.

use lazy_regex::{regex, Captures};
use log::warn;
use xeval_core::{Constant, Period, ScalarType};

use super::{constant_operand, mismatch};
use crate::ast::{Node, OperatorKind};
use crate::error::{EvalError, EvalResult};

/// `xsd:dayTimeDuration('P1DT2H')`
pub fn day_time_duration(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let kind = OperatorKind::DayTimeDuration;
    let text = duration_text(kind, right)?;
    let pattern = regex!(r"^P(?:(\d+)D)?(?:T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?)?$");

    let period = match pattern.captures(text) {
        Some(caps) => Period::day_time(
            component(&caps, 1, text)?,
            component(&caps, 2, text)?,
            component(&caps, 3, text)?,
            component(&caps, 4, text)?,
        ),
        None => {
            warn!("{kind}: '{text}' is not a day-time duration, using zero");
            Period::default()
        }
    };
    Ok(Constant::period(&period))
}

/// `xsd:yearMonthDuration('P1Y2M')`
pub fn year_month_duration(_left: Option<&Node>, right: Option<&Node>) -> EvalResult<Constant> {
    let kind = OperatorKind::YearMonthDuration;
    let text = duration_text(kind, right)?;
    let pattern = regex!(r"^P(?:(\d+)Y)?(?:(\d+)M)?$");

    let period = match pattern.captures(text) {
        Some(caps) => Period::year_month(component(&caps, 1, text)?, component(&caps, 2, text)?),
        None => {
            warn!("{kind}: '{text}' is not a year-month duration, using zero");
            Period::default()
        }
    };
    Ok(Constant::period(&period))
}

fn duration_text(kind: OperatorKind, operand: Option<&Node>) -> EvalResult<&str> {
    let value = constant_operand(kind, operand)?;
    match value.ty() {
        ScalarType::String => Ok(value.value().trim()),
        other => Err(mismatch(kind, &[other.to_string()])),
    }
}

/// An optional numeric capture group, zero when absent
fn component(caps: &Captures<'_>, group: usize, text: &str) -> EvalResult<i64> {
    match caps.get(group) {
        Some(m) => m.as_str().parse().map_err(|_| EvalError::MalformedLiteral {
            value: text.to_string(),
            ty: ScalarType::Period,
        }),
        None => Ok(0),
    }
}
