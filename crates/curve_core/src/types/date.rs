//! Excel-epoch integer date representation.
//!
//! All schedule and curve arithmetic in this workspace operates on a plain
//! signed day count since 1899-12-30 (day 0), matching the convention of the
//! spreadsheet-driven instrument/curve definition tables in `curve_builder`.

use super::DateError;
use std::fmt;
use std::ops::{Add, Sub};

/// Day 61 is the earliest supported date: days below it fall inside the
/// 1900 fictitious-leap-year anomaly that the epoch inherits from Excel.
pub const MIN_SUPPORTED_DATE: i64 = 61;

/// An integer day count since 1899-12-30.
///
/// `Date` is a thin newtype over `i64` rather than a bare alias so that
/// curve/schedule APIs read as date-typed signatures, while still
/// supporting the arithmetic (`Date - Date = i64 days`, `Date + i64`)
/// the bootstrapping code relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub i64);

impl Date {
    /// Construct a `Date` from a raw excel-epoch day count.
    ///
    /// Fails if `days < `[`MIN_SUPPORTED_DATE`]`.
    pub fn from_excel(days: i64) -> Result<Self, DateError> {
        if days < MIN_SUPPORTED_DATE {
            return Err(DateError::OutOfRange(days));
        }
        Ok(Date(days))
    }

    /// Raw excel-epoch day count.
    pub fn excel(self) -> i64 {
        self.0
    }

    /// Convert to a `chrono::NaiveDate`, for display and parsing boundaries.
    pub fn to_naive_date(self) -> chrono::NaiveDate {
        let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
        base + chrono::Duration::days(self.0)
    }

    /// Construct from a `chrono::NaiveDate`.
    pub fn from_naive_date(d: chrono::NaiveDate) -> Result<Self, DateError> {
        let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
        let days = (d - base).num_days();
        Date::from_excel(days)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive_date().format("%Y-%m-%d"))
    }
}

impl Sub for Date {
    type Output = i64;
    fn sub(self, rhs: Date) -> i64 {
        self.0 - rhs.0
    }
}

impl Add<i64> for Date {
    type Output = Date;
    fn add(self, rhs: i64) -> Date {
        Date(self.0 + rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_dates_below_epoch_floor() {
        assert!(Date::from_excel(60).is_err());
        assert!(Date::from_excel(61).is_ok());
    }

    #[test]
    fn roundtrips_through_naive_date() {
        let d = Date::from_excel(42000).unwrap();
        let nd = d.to_naive_date();
        assert_eq!(Date::from_naive_date(nd).unwrap(), d);
    }

    #[test]
    fn subtraction_yields_day_difference() {
        let a = Date::from_excel(100).unwrap();
        let b = Date::from_excel(90).unwrap();
        assert_eq!(a - b, 10);
    }

    #[test]
    fn display_formats_as_iso_date() {
        let d = Date::from_excel(42000).unwrap();
        let s = format!("{}", d);
        assert_eq!(s.len(), 10);
        assert_eq!(&s[4..5], "-");
    }
}
