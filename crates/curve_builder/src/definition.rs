//! Instrument definition table: one row per instrument, naming its type,
//! the curve it pillars, the curves it consumes, and its conventions.

use curve_core::types::{ConventionRegistry, Date, Tenor};
use curve_instruments::{BasisSwap, CrossCurrencySwap, ForecastRateInstrument, Future, Instrument, MtmCrossCurrencyBasisSwap, Swap, TermDeposit};
use curve_schedule::schedules::{date_step, resolve_date_expression};

use crate::error::BuildError;

const NA: &str = "na";

/// One row of the instrument definition table.
///
/// Unused curve/convention columns carry the sentinel `"na"`; which
/// columns are required or forbidden depends on `type_name` (see
/// [`build_instrument`]).
#[derive(Debug, Clone)]
pub struct InstrumentRow {
    /// The instrument's unique name; also its input-price key.
    pub name: String,
    /// One of `Deposit`, `ZeroRate`, `Future`, `Swap`, `BasisSwap`,
    /// `TermDeposit`, `CrossCurrencySwap`, `MtmCrossCurrencyBasisSwap`.
    pub type_name: String,
    /// The curve this instrument pillars and contributes a residual to.
    pub curve: String,
    /// Left-leg forecast curve, or `"na"`.
    pub forecast_curve_left: String,
    /// Right-leg forecast curve, or `"na"`.
    pub forecast_curve_right: String,
    /// Left-leg discount curve, or `"na"`.
    pub discount_curve_left: String,
    /// Right-leg discount curve, or `"na"`.
    pub discount_curve_right: String,
    /// Left-leg (or sole) convention name, or `"na"`.
    pub convention_left: String,
    /// Right-leg convention name, or `"na"`.
    pub convention_right: String,
    /// A tenor-expression string resolved against `eval_date`.
    pub start: String,
    /// The instrument's tenor length.
    pub length: String,
    /// `"Y"` or `"N"`.
    pub enabled: String,
}

const INSTRUMENT_TABLE_COLUMNS: [&str; 12] = [
    "Name",
    "Type",
    "Curve",
    "Forecast Curve Left",
    "Forecast Curve Right",
    "Discount Curve Left",
    "Discount Curve Right",
    "Convention Left",
    "Convention Right",
    "Start",
    "Length",
    "Enabled",
];

impl InstrumentRow {
    /// Parse a tab-separated instrument definition table: a header row
    /// naming the columns listed in [`INSTRUMENT_TABLE_COLUMNS`] (any
    /// order), followed by one row per instrument. Blank lines are
    /// skipped.
    pub fn from_table(text: &str) -> Result<Vec<InstrumentRow>, BuildError> {
        let mut lines = text.lines();
        let header = lines.next().unwrap_or("");
        let cols: Vec<&str> = header.split('\t').collect();
        let idx = |name: &str| -> Result<usize, BuildError> {
            cols.iter().position(|c| *c == name).ok_or_else(|| BuildError::MissingTableColumn { column: name.to_string() })
        };

        let indices: Vec<usize> = INSTRUMENT_TABLE_COLUMNS.iter().map(|c| idx(c)).collect::<Result<_, _>>()?;

        let mut rows = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let field = |i: usize| fields[indices[i]].to_string();
            rows.push(InstrumentRow {
                name: field(0),
                type_name: field(1),
                curve: field(2),
                forecast_curve_left: field(3),
                forecast_curve_right: field(4),
                discount_curve_left: field(5),
                discount_curve_right: field(6),
                convention_left: field(7),
                convention_right: field(8),
                start: field(9),
                length: field(10),
                enabled: field(11),
            });
        }
        Ok(rows)
    }
}

fn required<'a>(name: &str, type_name: &str, column: &str, value: &'a str) -> Result<&'a str, BuildError> {
    if value == NA {
        Err(BuildError::MissingColumn { name: name.to_string(), type_name: type_name.to_string(), column: column.to_string() })
    } else {
        Ok(value)
    }
}

fn forbidden(name: &str, type_name: &str, column: &str, value: &str) -> Result<(), BuildError> {
    if value != NA {
        Err(BuildError::ForbiddenColumn { name: name.to_string(), type_name: type_name.to_string(), column: column.to_string() })
    } else {
        Ok(())
    }
}

fn convention<'a>(
    registry: &'a ConventionRegistry,
    name: &str,
    convention_name: &str,
) -> Result<&'a curve_core::types::Convention, BuildError> {
    registry.get(convention_name).ok_or_else(|| BuildError::UnknownConvention { name: name.to_string(), convention: convention_name.to_string() })
}

fn resolve_length(start: Date, length: &str) -> Result<Date, BuildError> {
    let tenor: Tenor = Tenor::parse(length).map_err(curve_schedule::schedules::ScheduleError::from)?;
    Ok(date_step(start, &tenor, false)?)
}

/// Build the priced instrument this row describes, along with the curve id
/// it pillars. Returns `None` if `Enabled == "N"`.
pub fn build_instrument(row: &InstrumentRow, eval_date: Date, conventions: &ConventionRegistry) -> Result<Option<(String, Instrument)>, BuildError> {
    if row.enabled != "Y" && row.enabled != "N" {
        return Err(BuildError::InvalidEnabledFlag { name: row.name.clone(), value: row.enabled.clone() });
    }
    if row.enabled == "N" {
        return Ok(None);
    }

    let start = resolve_date_expression(&row.start, eval_date)?;
    let end = resolve_length(start, &row.length)?;
    let name = row.name.as_str();
    let ty = row.type_name.as_str();

    let instrument = match ty {
        "Deposit" | "ZeroRate" => {
            forbidden(name, ty, "Forecast Curve Left", &row.forecast_curve_left)?;
            forbidden(name, ty, "Forecast Curve Right", &row.forecast_curve_right)?;
            forbidden(name, ty, "Discount Curve Left", &row.discount_curve_left)?;
            forbidden(name, ty, "Discount Curve Right", &row.discount_curve_right)?;
            forbidden(name, ty, "Convention Right", &row.convention_right)?;
            let conv = convention(conventions, name, required(name, ty, "Convention Left", &row.convention_left)?)?;
            let inner = ForecastRateInstrument::new(name, &row.curve, start, end, &conv.payment_frequency, conv.dcc)?;
            if ty == "Deposit" {
                Instrument::Deposit(inner)
            } else {
                Instrument::ZeroRate(inner)
            }
        }
        "Future" => {
            forbidden(name, ty, "Forecast Curve Left", &row.forecast_curve_left)?;
            forbidden(name, ty, "Forecast Curve Right", &row.forecast_curve_right)?;
            forbidden(name, ty, "Discount Curve Left", &row.discount_curve_left)?;
            forbidden(name, ty, "Discount Curve Right", &row.discount_curve_right)?;
            forbidden(name, ty, "Convention Right", &row.convention_right)?;
            let conv = convention(conventions, name, required(name, ty, "Convention Left", &row.convention_left)?)?;
            Instrument::Future(Future::new(name, &row.curve, eval_date, start, end, conv.dcc))
        }
        "Swap" => {
            forbidden(name, ty, "Forecast Curve Right", &row.forecast_curve_right)?;
            forbidden(name, ty, "Discount Curve Right", &row.discount_curve_right)?;
            let forecast = required(name, ty, "Forecast Curve Left", &row.forecast_curve_left)?;
            let discount = required(name, ty, "Discount Curve Left", &row.discount_curve_left)?;
            let fixed_conv = convention(conventions, name, required(name, ty, "Convention Left", &row.convention_left)?)?;
            let float_conv = convention(conventions, name, required(name, ty, "Convention Right", &row.convention_right)?)?;
            Instrument::Swap(Swap::new(
                name,
                forecast,
                discount,
                start,
                end,
                &fixed_conv.payment_frequency,
                fixed_conv.dcc,
                &float_conv.payment_frequency,
                float_conv.dcc,
            )?)
        }
        "BasisSwap" => {
            forbidden(name, ty, "Discount Curve Right", &row.discount_curve_right)?;
            let forecast_left = required(name, ty, "Forecast Curve Left", &row.forecast_curve_left)?;
            let forecast_right = required(name, ty, "Forecast Curve Right", &row.forecast_curve_right)?;
            let discount = required(name, ty, "Discount Curve Left", &row.discount_curve_left)?;
            let left_conv = convention(conventions, name, required(name, ty, "Convention Left", &row.convention_left)?)?;
            let right_conv = convention(conventions, name, required(name, ty, "Convention Right", &row.convention_right)?)?;
            Instrument::BasisSwap(BasisSwap::new(
                name,
                forecast_left,
                forecast_right,
                discount,
                start,
                end,
                &left_conv.payment_frequency,
                left_conv.dcc,
                &right_conv.payment_frequency,
                right_conv.dcc,
            )?)
        }
        "TermDeposit" => {
            forbidden(name, ty, "Forecast Curve Right", &row.forecast_curve_right)?;
            forbidden(name, ty, "Discount Curve Right", &row.discount_curve_right)?;
            forbidden(name, ty, "Convention Right", &row.convention_right)?;
            let forecast = required(name, ty, "Forecast Curve Left", &row.forecast_curve_left)?;
            let discount = required(name, ty, "Discount Curve Left", &row.discount_curve_left)?;
            let conv = convention(conventions, name, required(name, ty, "Convention Left", &row.convention_left)?)?;
            Instrument::TermDeposit(TermDeposit::new(name, forecast, discount, start, end, &conv.payment_frequency, conv.dcc)?)
        }
        "CrossCurrencySwap" => {
            forbidden(name, ty, "Forecast Curve Left", &row.forecast_curve_left)?;
            let forecast_right = required(name, ty, "Forecast Curve Right", &row.forecast_curve_right)?;
            let discount_left = required(name, ty, "Discount Curve Left", &row.discount_curve_left)?;
            let discount_right = required(name, ty, "Discount Curve Right", &row.discount_curve_right)?;
            let left_conv = convention(conventions, name, required(name, ty, "Convention Left", &row.convention_left)?)?;
            let right_conv = convention(conventions, name, required(name, ty, "Convention Right", &row.convention_right)?)?;
            Instrument::CrossCurrencySwap(CrossCurrencySwap::new(
                name,
                forecast_right,
                discount_left,
                discount_right,
                start,
                end,
                &left_conv.payment_frequency,
                left_conv.dcc,
                &right_conv.payment_frequency,
                right_conv.dcc,
            )?)
        }
        "MtmCrossCurrencyBasisSwap" => {
            let forecast_left = required(name, ty, "Forecast Curve Left", &row.forecast_curve_left)?;
            let forecast_right = required(name, ty, "Forecast Curve Right", &row.forecast_curve_right)?;
            let discount_left = required(name, ty, "Discount Curve Left", &row.discount_curve_left)?;
            let discount_right = required(name, ty, "Discount Curve Right", &row.discount_curve_right)?;
            let left_conv = convention(conventions, name, required(name, ty, "Convention Left", &row.convention_left)?)?;
            let right_conv = convention(conventions, name, required(name, ty, "Convention Right", &row.convention_right)?)?;
            Instrument::MtmCrossCurrencyBasisSwap(MtmCrossCurrencyBasisSwap::new(
                name,
                forecast_left,
                forecast_right,
                discount_left,
                discount_right,
                start,
                end,
                &left_conv.payment_frequency,
                left_conv.dcc,
                right_conv.dcc,
            )?)
        }
        other => {
            return Err(BuildError::UnknownInstrumentType { name: row.name.clone(), type_name: other.to_string() });
        }
    };

    let pillar_curve = required(name, ty, "Curve", &row.curve)?.to_string();
    Ok(Some((pillar_curve, instrument)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_table_parses_columns_in_any_order_and_skips_blank_lines() {
        let text = "Name\tType\tCurve\tEnabled\tStart\tLength\tConvention Left\tConvention Right\tForecast Curve Left\tForecast Curve Right\tDiscount Curve Left\tDiscount Curve Right\n\
                     USD.3M.DEP\tDeposit\tUSD.OIS\tY\tE\t3M\tUSD.3M\tna\tna\tna\tna\tna\n\
                     \n\
                     USD.SKIP\tDeposit\tUSD.OIS\tN\tE\t6M\tUSD.3M\tna\tna\tna\tna\tna\n";

        let rows = InstrumentRow::from_table(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "USD.3M.DEP");
        assert_eq!(rows[0].curve, "USD.OIS");
        assert_eq!(rows[0].enabled, "Y");
        assert_eq!(rows[1].name, "USD.SKIP");
        assert_eq!(rows[1].enabled, "N");
    }

    #[test]
    fn from_table_rejects_a_missing_column() {
        let text = "Name\tType\tCurve\n";
        let result = InstrumentRow::from_table(text);
        assert!(matches!(result, Err(BuildError::MissingTableColumn { .. })));
    }
}
