//! IMM (International Monetary Market) date successor.

use chrono::{Datelike, NaiveDate};
use curve_core::types::{Date, DateError};

/// Day-of-month of the third Wednesday of `year`-`month`.
fn third_wednesday(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar month");
    let weekday0 = first.weekday().num_days_from_monday() as i64; // Mon=0..Sun=6
    let days_until_first_wednesday = (2 - weekday0).rem_euclid(7);
    (1 + days_until_first_wednesday + 14) as u32
}

/// The IMM month following (or equal to) `month`, among `{3, 6, 9, 12}`.
fn next_imm_month(month: u32) -> u32 {
    ((month - 1) / 3 + 1) * 3
}

/// The next IMM date (third Wednesday of March/June/September/December) at
/// or after `date`.
///
/// If `date` already falls in an IMM month but on or after that month's
/// third Wednesday, the result rolls to the following IMM month.
pub fn next_imm_date(date: Date) -> Result<Date, DateError> {
    let naive = date.to_naive_date();
    let (year, month, day) = (naive.year(), naive.month(), naive.day());

    if matches!(month, 3 | 6 | 9 | 12) {
        let wed = third_wednesday(year, month);
        if wed <= day {
            let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
            let next = NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid calendar month");
            return next_imm_date(Date::from_naive_date(next)?);
        }
        let result = NaiveDate::from_ymd_opt(year, month, wed).expect("valid calendar day");
        Date::from_naive_date(result)
    } else {
        let imm_month = next_imm_month(month);
        let wed = third_wednesday(year, imm_month);
        let result = NaiveDate::from_ymd_opt(year, imm_month, wed).expect("valid calendar day");
        Date::from_naive_date(result)
    }
}
