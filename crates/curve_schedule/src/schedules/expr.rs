//! Tenor-expression date resolution, e.g. `"E+3M+1D"` relative to a trade date.

use curve_core::types::{Date, Tenor};

use super::error::ScheduleError;
use super::step::date_step;

/// Resolve a `"+"`-joined tenor expression against `reference_date`.
///
/// The literal token `"E"` resolves to `reference_date` unchanged; every
/// other token parses as a [`Tenor`] and steps the running date, in order.
/// `"E+3M+1D"` therefore means "3 months and 1 day after the reference
/// date".
pub fn resolve_date_expression(expr: &str, reference_date: Date) -> Result<Date, ScheduleError> {
    let mut current = reference_date;
    for token in expr.split('+') {
        if token == "E" {
            continue;
        }
        let tenor = Tenor::parse(token)?;
        current = date_step(current, &tenor, false)?;
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_naive_date(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    #[test]
    fn literal_e_resolves_to_reference_date_unchanged() {
        let reference = date(2024, 1, 1);
        assert_eq!(resolve_date_expression("E", reference).unwrap(), reference);
    }

    #[test]
    fn steps_each_plus_joined_tenor_in_order() {
        let reference = date(2024, 1, 1);
        let result = resolve_date_expression("E+3M+1D", reference).unwrap();
        assert_eq!(result.to_naive_date(), NaiveDate::from_ymd_opt(2024, 4, 2).unwrap());
    }

    #[test]
    fn bare_tenor_expression_without_leading_e() {
        let reference = date(2024, 1, 1);
        let result = resolve_date_expression("6M", reference).unwrap();
        assert_eq!(result.to_naive_date(), NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
    }
}
