//! Tenor stepping and business-day rolling.

use chrono::{Datelike, Months, NaiveDate};
use curve_core::types::{Calendar, Date, DateError, Tenor, TenorUnit};

use super::error::ScheduleError;
use super::imm::next_imm_date;
use super::roll::RollType;

/// Step `date` by `tenor`.
///
/// `Future` tenors repeat [`next_imm_date`] `tenor.n()` times — zero or
/// negative counts advance zero times, matching the original `range(n)`
/// iteration. `preserve_eom`, when set, re-snaps the result onto the last
/// day of its month whenever `date` itself was the last day of its own
/// month; it is rejected for `Future` tenors.
pub fn date_step(date: Date, tenor: &Tenor, preserve_eom: bool) -> Result<Date, ScheduleError> {
    if tenor.unit() == TenorUnit::Future {
        if preserve_eom {
            return Err(ScheduleError::Date(DateError::UnsupportedRollType(
                "preserve_eom is not supported for Future tenors".to_string(),
            )));
        }
        let mut cur = date;
        for _ in 0..tenor.n().max(0) {
            cur = next_imm_date(cur)?;
        }
        return Ok(cur);
    }

    let naive = date.to_naive_date();
    let stepped = match tenor.unit() {
        TenorUnit::Day => naive + chrono::Duration::days(tenor.n()),
        TenorUnit::Month => add_months(naive, tenor.n())?,
        TenorUnit::Quarter => add_months(naive, tenor.n() * 3)?,
        TenorUnit::Year => add_months(naive, tenor.n() * 12)?,
        TenorUnit::Future => unreachable!("handled above"),
    };

    let stepped = if preserve_eom && is_last_day_of_month(naive) {
        last_day_of_month(stepped)
    } else {
        stepped
    };

    Ok(Date::from_naive_date(stepped)?)
}

fn add_months(date: NaiveDate, n: i64) -> Result<NaiveDate, ScheduleError> {
    let result = if n >= 0 {
        date.checked_add_months(Months::new(n as u32))
    } else {
        date.checked_sub_months(Months::new((-n) as u32))
    };
    result.ok_or_else(|| {
        ScheduleError::Date(DateError::ParseError(format!(
            "adding {} months to {} overflowed",
            n, date
        )))
    })
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.month() != (date + chrono::Duration::days(1)).month()
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("valid calendar month");
    next_month_first - chrono::Duration::days(1)
}

/// Roll `date` onto a business day under `calendar`, per `roll_type`.
///
/// Only `Following`/`Preceding` are implemented; the modified variants are
/// reserved and return [`ScheduleError::UnsupportedRoll`].
pub fn date_roll(date: Date, roll_type: RollType, calendar: &dyn Calendar) -> Result<Date, ScheduleError> {
    match roll_type {
        RollType::Following => {
            let mut d = date;
            while calendar.is_holiday(d) {
                d = d + 1;
            }
            Ok(d)
        }
        RollType::Preceding => {
            let mut d = date;
            while calendar.is_holiday(d) {
                d = d + (-1);
            }
            Ok(d)
        }
        other => Err(ScheduleError::UnsupportedRoll(other)),
    }
}

/// Advance `trade_date` by `spot_offset` good business days (each day
/// stepped and `FOLLOWING`-rolled in turn).
///
/// Panics in debug builds if `trade_date` is itself a holiday, mirroring the
/// original's precondition assertion.
pub fn calculate_spot_date(trade_date: Date, spot_offset: u32, calendar: &dyn Calendar) -> Result<Date, ScheduleError> {
    debug_assert!(!calendar.is_holiday(trade_date));
    let one_day = Tenor::parse("1D")?;
    let mut spot = trade_date;
    for _ in 0..spot_offset {
        spot = date_step(spot, &one_day, false)?;
        spot = date_roll(spot, RollType::Following, calendar)?;
    }
    debug_assert!(!calendar.is_holiday(spot));
    Ok(spot)
}
