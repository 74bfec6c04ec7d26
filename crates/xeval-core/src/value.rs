//! Scalar types and typed constants

use std::fmt;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::period::Period;
use crate::{DATE_FORMAT, MIDNIGHT_SUFFIX};

/// The type tag carried by every terminal value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Integer,
    Double,
    String,
    Date,
    Period,
}

impl ScalarType {
    /// Name used in error messages
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Integer => "Integer",
            ScalarType::Double => "Double",
            ScalarType::String => "String",
            ScalarType::Date => "Date",
            ScalarType::Period => "Period",
        }
    }

    /// Check if this is Integer or Double
    pub fn is_numeric(self) -> bool {
        matches!(self, ScalarType::Integer | ScalarType::Double)
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A typed, immutable value held as its textual form
///
/// Dates are stored canonically as `YYYY-MM-DD HH:MM:SS`; a 10-character
/// `YYYY-MM-DD` value is extended with ` 00:00:00` on construction.
/// Periods are stored as six colon-joined integers (see [`Period`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constant {
    value: String,
    ty: ScalarType,
}

impl Constant {
    /// Create a constant, canonicalizing Date values
    pub fn new<S: Into<String>>(value: S, ty: ScalarType) -> Self {
        let value = value.into();
        let value = match ty {
            ScalarType::Date => canonicalize_date(value),
            _ => value,
        };
        Self { value, ty }
    }

    pub fn integer(n: i64) -> Self {
        Self::new(n.to_string(), ScalarType::Integer)
    }

    pub fn double(n: f64) -> Self {
        Self::new(format_double(n), ScalarType::Double)
    }

    pub fn string<S: Into<String>>(s: S) -> Self {
        Self::new(s, ScalarType::String)
    }

    pub fn date(dt: NaiveDateTime) -> Self {
        Self::new(format_date(&dt), ScalarType::Date)
    }

    pub fn period(period: &Period) -> Self {
        Self::new(period.to_string(), ScalarType::Period)
    }

    /// Integer 1 for true, 0 for false
    pub fn boolean(b: bool) -> Self {
        Self::integer(i64::from(b))
    }

    /// The raw textual value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The declared type
    pub fn ty(&self) -> ScalarType {
        self.ty
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Decode the value as an integer
    pub fn as_integer(&self) -> Result<i64> {
        self.value.trim().parse().map_err(|_| Error::InvalidNumber {
            value: self.value.clone(),
            ty: ScalarType::Integer,
        })
    }

    /// Decode the value as a double (integers widen)
    pub fn as_double(&self) -> Result<f64> {
        self.value.trim().parse().map_err(|_| Error::InvalidNumber {
            value: self.value.clone(),
            ty: ScalarType::Double,
        })
    }

    /// Decode the value as a canonical date
    pub fn as_date(&self) -> Result<NaiveDateTime> {
        parse_date(&self.value)
    }

    /// Decode the value as a period
    pub fn as_period(&self) -> Result<Period> {
        self.value.parse()
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Extend a bare `YYYY-MM-DD` date with a midnight time component
///
/// Any other value is returned unchanged.
pub fn canonicalize_date(mut value: String) -> String {
    if value.chars().count() == 10 {
        value.push_str(MIDNIGHT_SUFFIX);
    }
    value
}

/// Parse canonical `YYYY-MM-DD HH:MM:SS` text
pub fn parse_date(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, DATE_FORMAT).map_err(|_| Error::InvalidDate(text.into()))
}

/// Render a date in canonical `YYYY-MM-DD HH:MM:SS` form
pub fn format_date(dt: &NaiveDateTime) -> String {
    dt.format(DATE_FORMAT).to_string()
}

/// Render a double, always keeping a fractional part for integral values
///
/// `5.0` renders as `"5.0"` rather than `"5"`, so a computed double and the
/// same double written as a literal compare equal as text.
pub fn format_double(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
        format!("{:.1}", n)
    } else {
        format!("{}", n)
    }
}
