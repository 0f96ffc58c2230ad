//! Shared loading of the three calibration input tables (instrument
//! definitions, curve properties, conventions) and the eval date, common to
//! every subcommand that builds or inspects a curve map.

use std::path::Path;

use curve_builder::{parse_curve_properties_table, CurveBuilder, InstrumentRow};
use curve_core::types::{ConventionRegistry, Date};
use curve_instruments::PriceLadder;
use curve_model::InterpolationMode;

use crate::error::{CliError, Result};

/// Command-line arguments shared by every subcommand that loads a
/// calibration input set.
#[derive(clap::Args, Debug)]
pub struct CalibrationArgs {
    /// Tab-separated instrument definition table.
    #[arg(long)]
    pub instruments: String,

    /// Tab-separated convention table.
    #[arg(long)]
    pub conventions: String,

    /// Tab-separated curve-properties table (`Curve, Interpolation, Solve
    /// Stage`). Curves it does not name default to stage 0 and
    /// `--default-interpolation`.
    #[arg(long)]
    pub curve_properties: Option<String>,

    /// Evaluation date, as a day count since the epoch base 1899-12-30.
    #[arg(long)]
    pub eval_date: i64,

    /// Interpolation mode for curves with no row in `--curve-properties`.
    #[arg(long, value_enum, default_value = "linear-log-df")]
    pub default_interpolation: InterpolationModeArg,
}

/// `clap`-friendly mirror of [`InterpolationMode`].
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum InterpolationModeArg {
    /// [`InterpolationMode::LinearLogDf`]
    LinearLogDf,
    /// [`InterpolationMode::LinearCczr`]
    LinearCczr,
    /// [`InterpolationMode::CubicLogDf`]
    CubicLogDf,
}

impl From<InterpolationModeArg> for InterpolationMode {
    fn from(value: InterpolationModeArg) -> Self {
        match value {
            InterpolationModeArg::LinearLogDf => InterpolationMode::LinearLogDf,
            InterpolationModeArg::LinearCczr => InterpolationMode::LinearCczr,
            InterpolationModeArg::CubicLogDf => InterpolationMode::CubicLogDf,
        }
    }
}

fn read_table(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// An instrument table, parsed into a ready-to-solve [`CurveBuilder`].
pub fn load_builder(args: &CalibrationArgs) -> Result<CurveBuilder> {
    let eval_date = Date::from_excel(args.eval_date)?;
    let conventions = ConventionRegistry::from_table(&read_table(&args.conventions)?).map_err(CliError::InvalidArgument)?;
    let rows = InstrumentRow::from_table(&read_table(&args.instruments)?)?;

    let mut builder = CurveBuilder::new(eval_date, args.default_interpolation.into());
    for row in &rows {
        builder.add_row(row, &conventions)?;
    }

    if let Some(path) = &args.curve_properties {
        for (curve_id, interpolation_mode, stage) in parse_curve_properties_table(&read_table(path)?)? {
            builder.set_curve_properties(curve_id, interpolation_mode, stage);
        }
    }

    Ok(builder)
}

/// Load a tab-separated `Name\tPrice` table from disk.
pub fn load_prices(path: &str) -> Result<PriceLadder> {
    Ok(PriceLadder::from_text_table(&read_table(path)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    fn scratch_file(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(format!("curve_cli_test_{}_{}", COUNTER.fetch_add(1, Ordering::Relaxed), name));
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn load_builder_parses_instruments_conventions_and_curve_properties() {
        let instruments = scratch_file(
            "instruments.tsv",
            "Name\tType\tCurve\tForecast Curve Left\tForecast Curve Right\tDiscount Curve Left\tDiscount Curve Right\tConvention Left\tConvention Right\tStart\tLength\tEnabled\n\
             USD.3M.DEP\tDeposit\tUSD.OIS\tna\tna\tna\tna\tUSD.3M\tna\tE\t3M\tY\n",
        );
        let conventions = scratch_file("conventions.tsv", "Index\tReset Frequency\tCalculation Period Frequency\tPayment Frequency\tDay Count Convention\nUSD.3M\t3M\t3M\t3M\tACT360\n");
        let curve_properties = scratch_file("curve_properties.tsv", "Curve\tInterpolation\tSolve Stage\nUSD.OIS\tLinearLogDf\t0\n");

        let args = CalibrationArgs {
            instruments,
            conventions,
            curve_properties: Some(curve_properties),
            eval_date: 42000,
            default_interpolation: InterpolationModeArg::LinearLogDf,
        };

        let builder = load_builder(&args).unwrap();
        assert_eq!(builder.instrument_count(), 1);
        assert_eq!(builder.stage_count(), 1);
    }

    #[test]
    fn load_builder_reports_a_missing_file() {
        let args = CalibrationArgs {
            instruments: "/nonexistent/instruments.tsv".to_string(),
            conventions: "/nonexistent/conventions.tsv".to_string(),
            curve_properties: None,
            eval_date: 42000,
            default_interpolation: InterpolationModeArg::LinearLogDf,
        };
        assert!(matches!(load_builder(&args), Err(CliError::FileNotFound(_))));
    }

    #[test]
    fn load_prices_parses_a_text_table() {
        let path = scratch_file("prices.tsv", "Name\tPrice\nUSD.3M.DEP\t2.0\n");
        let prices = load_prices(&path).unwrap();
        assert_eq!(prices.get("USD.3M.DEP"), Some(2.0));
    }
}
