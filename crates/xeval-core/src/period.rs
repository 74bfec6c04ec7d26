//! Six-component periods and calendar-aware date shifting

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months, NaiveDateTime};

use crate::error::Error;

/// A duration of years, months, days, hours, minutes and seconds
///
/// Serialized as the six components joined by `:` in that order,
/// e.g. `0:3:0:0:0:0` for three months.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Period {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Period {
    /// A period of whole years and months
    pub fn year_month(years: i64, months: i64) -> Self {
        Self {
            years,
            months,
            ..Self::default()
        }
    }

    /// A period of days and a time of day
    pub fn day_time(days: i64, hours: i64, minutes: i64, seconds: i64) -> Self {
        Self {
            days,
            hours,
            minutes,
            seconds,
            ..Self::default()
        }
    }

    fn components(&self) -> [i64; 6] {
        [
            self.years,
            self.months,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ]
    }

    /// Add this period to a date, component by component
    ///
    /// Years, months, days, hours, minutes and seconds are applied in that
    /// order. Month arithmetic clamps to the last day of the target month
    /// (`2000-01-31` plus one month is `2000-02-29`). Returns `None` when the
    /// result leaves the representable range.
    pub fn add_to(&self, date: NaiveDateTime) -> Option<NaiveDateTime> {
        self.shift(date, 1)
    }

    /// Subtract this period from a date, component by component
    pub fn subtract_from(&self, date: NaiveDateTime) -> Option<NaiveDateTime> {
        self.shift(date, -1)
    }

    fn shift(&self, date: NaiveDateTime, sign: i64) -> Option<NaiveDateTime> {
        let date = shift_months(date, self.years.checked_mul(12)?.checked_mul(sign)?)?;
        let date = shift_months(date, self.months.checked_mul(sign)?)?;
        let date = date.checked_add_signed(Duration::try_days(self.days.checked_mul(sign)?)?)?;
        let date = date.checked_add_signed(Duration::try_hours(self.hours.checked_mul(sign)?)?)?;
        let date =
            date.checked_add_signed(Duration::try_minutes(self.minutes.checked_mul(sign)?)?)?;
        date.checked_add_signed(Duration::try_seconds(self.seconds.checked_mul(sign)?)?)
    }
}

fn shift_months(date: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [y, mo, d, h, mi, s] = self.components();
        write!(f, "{}:{}:{}:{}:{}:{}", y, mo, d, h, mi, s)
    }
}

impl FromStr for Period {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(':')
            .map(|part| part.parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| Error::InvalidPeriod(s.into()))?;

        match parts.as_slice() {
            [years, months, days, hours, minutes, seconds] => Ok(Self {
                years: *years,
                months: *months,
                days: *days,
                hours: *hours,
                minutes: *minutes,
                seconds: *seconds,
            }),
            _ => Err(Error::InvalidPeriod(s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{format_date, parse_date};
    use pretty_assertions::assert_eq;

    fn add(date: &str, period: Period) -> String {
        format_date(&period.add_to(parse_date(date).unwrap()).unwrap())
    }

    fn sub(date: &str, period: Period) -> String {
        format_date(&period.subtract_from(parse_date(date).unwrap()).unwrap())
    }

    #[test]
    fn test_period_text() {
        assert_eq!(Period::year_month(0, 3).to_string(), "0:3:0:0:0:0");
        assert_eq!(Period::day_time(1, 2, 0, 0).to_string(), "0:0:1:2:0:0");
        assert_eq!("2:3:0:0:0:0".parse::<Period>(), Ok(Period::year_month(2, 3)));
    }

    #[test]
    fn test_period_parse_errors() {
        assert!("1:2:3".parse::<Period>().is_err());
        assert!("a:0:0:0:0:0".parse::<Period>().is_err());
        assert!("0:0:0:0:0:0:0".parse::<Period>().is_err());
    }

    #[test]
    fn test_add_day_time() {
        assert_eq!(
            add("2022-12-12 00:00:00", Period::day_time(1, 2, 0, 0)),
            "2022-12-13 02:00:00"
        );
        assert_eq!(
            add("1921-12-31 00:00:00", Period::day_time(1, 0, 0, 0)),
            "1922-01-01 00:00:00"
        );
        assert_eq!(
            add("2022-12-31 23:59:30", Period::day_time(0, 0, 0, 45)),
            "2023-01-01 00:00:15"
        );
    }

    #[test]
    fn test_month_arithmetic_clamps() {
        assert_eq!(
            add("2000-01-31 00:00:00", Period::year_month(0, 1)),
            "2000-02-29 00:00:00"
        );
        assert_eq!(
            sub("2000-06-30 00:00:00", Period::year_month(0, 3)),
            "2000-03-30 00:00:00"
        );
        assert_eq!(
            sub("2000-02-29 00:00:00", Period::year_month(1, 0)),
            "1999-02-28 00:00:00"
        );
    }

    #[test]
    fn test_subtract_years() {
        assert_eq!(
            sub("1928-01-30 00:00:00", Period::year_month(1, 0)),
            "1927-01-30 00:00:00"
        );
    }

    #[test]
    fn test_out_of_range_shift() {
        let date = parse_date("2022-12-12 00:00:00").unwrap();
        assert_eq!(Period::year_month(i64::MAX, 0).add_to(date), None);
        assert_eq!(Period::day_time(i64::MAX, 0, 0, 0).add_to(date), None);
    }
}
