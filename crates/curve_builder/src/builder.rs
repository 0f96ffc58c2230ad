//! Staged joint calibration: curves are grouped into solve stages by the
//! curve-properties table (`Curve, Interpolation, Solve Stage`), each stage
//! jointly solved by [`levenberg_marquardt`] against the instruments
//! pillared on its curves, followed by a single post-calibration
//! [`build_jacobian`] pass.

use std::collections::BTreeMap;

use curve_core::types::{ConventionRegistry, Date};
use curve_instruments::{Instrument, PriceLadder};
use curve_model::{Curve, CurveMap, InterpolationMode};

use crate::build_output::BuildOutput;
use crate::definition::{build_instrument, InstrumentRow};
use crate::error::BuildError;
use crate::jacobian::build_jacobian;
use crate::solver::{levenberg_marquardt, SolverConfig};

/// Initial zero-rate guess fed to every pillar before the first stage
/// solves: a flat 2% continuously-compounded curve.
const INITIAL_GUESS_RATE: f64 = 0.02;
const DAYS_PER_YEAR: f64 = 365.0;

/// One row of the curve-properties table: a curve's interpolation scheme
/// and the stage it solves in.
#[derive(Debug, Clone, Copy)]
struct CurveProperties {
    interpolation_mode: InterpolationMode,
    stage: i64,
}

/// Builds a [`CurveMap`] by running an ordered sequence of calibration
/// stages, each jointly solving every curve assigned to that stage against
/// every instrument pillared on one of those curves. Stage membership and
/// per-curve interpolation come from the curve-properties table via
/// [`CurveBuilder::set_curve_properties`]; a curve with no properties row
/// defaults to stage `0` and the builder's default interpolation mode.
pub struct CurveBuilder {
    eval_date: Date,
    default_interpolation_mode: InterpolationMode,
    curve_properties: std::collections::HashMap<String, CurveProperties>,
    instruments: Vec<(String, Instrument)>,
}

impl CurveBuilder {
    /// A builder with no instruments or curve properties yet.
    pub fn new(eval_date: Date, default_interpolation_mode: InterpolationMode) -> Self {
        Self {
            eval_date,
            default_interpolation_mode,
            curve_properties: std::collections::HashMap::new(),
            instruments: Vec::new(),
        }
    }

    /// Parse and add one definition-table row. Disabled rows (`Enabled ==
    /// "N"`) are silently skipped.
    pub fn add_row(&mut self, row: &InstrumentRow, conventions: &ConventionRegistry) -> Result<(), BuildError> {
        if let Some((curve_id, instrument)) = build_instrument(row, self.eval_date, conventions)? {
            self.instruments.push((curve_id, instrument));
        }
        Ok(())
    }

    /// Record one curve-properties-table row: `curve_id` interpolates with
    /// `interpolation_mode` and solves jointly with every other curve
    /// sharing `stage`. Stages execute in ascending numeric order.
    pub fn set_curve_properties(&mut self, curve_id: impl Into<String>, interpolation_mode: InterpolationMode, stage: i64) {
        self.curve_properties.insert(curve_id.into(), CurveProperties { interpolation_mode, stage });
    }

    /// Number of enabled instrument rows added so far.
    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    /// Number of distinct solve stages the known curves fall into.
    pub fn stage_count(&self) -> usize {
        self.stages().len()
    }

    /// Distinct pillar curve ids referenced by the instruments added so
    /// far, in first-seen order.
    fn known_curve_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        for (curve_id, _) in &self.instruments {
            if !ids.contains(curve_id) {
                ids.push(curve_id.clone());
            }
        }
        ids
    }

    fn interpolation_mode_for(&self, curve_id: &str) -> InterpolationMode {
        self.curve_properties.get(curve_id).map(|p| p.interpolation_mode).unwrap_or(self.default_interpolation_mode)
    }

    /// Known curve ids grouped by stage number, stages in ascending order.
    /// A curve with no recorded properties defaults to stage `0`.
    fn stages(&self) -> Vec<Vec<String>> {
        let mut groups: BTreeMap<i64, Vec<String>> = BTreeMap::new();
        for id in self.known_curve_ids() {
            let stage = self.curve_properties.get(&id).map(|p| p.stage).unwrap_or(0);
            groups.entry(stage).or_default().push(id);
        }
        groups.into_values().collect()
    }

    fn initial_curve_map(&self) -> Result<CurveMap<f64>, BuildError> {
        let mut curves = CurveMap::new();
        let eval_time = self.eval_date.excel() as f64;
        for curve_id in self.known_curve_ids() {
            let mut pillars: Vec<f64> = self
                .instruments
                .iter()
                .filter(|(cid, _)| cid == &curve_id)
                .map(|(_, instrument)| instrument.get_pillar_date().excel() as f64)
                .collect();
            pillars.sort_by(|a, b| a.partial_cmp(b).expect("pillar times are never NaN"));
            pillars.dedup_by(|a, b| a == b);

            let dfs: Vec<f64> = pillars.iter().map(|&t| (-INITIAL_GUESS_RATE * (t - eval_time) / DAYS_PER_YEAR).exp()).collect();
            let interpolation_mode = self.interpolation_mode_for(&curve_id);
            curves.add_curve(Curve::new(curve_id, eval_time, pillars, dfs, interpolation_mode)?);
        }
        Ok(curves)
    }

    fn stage_instruments(&self, stage: &[String]) -> Vec<&Instrument> {
        self.instruments.iter().filter(|(cid, _)| stage.iter().any(|s| s == cid)).map(|(_, i)| i).collect()
    }

    fn solve_stage(&self, curves: &mut CurveMap<f64>, stage: &[String], prices: &PriceLadder, config: &SolverConfig) -> Result<(), BuildError> {
        let stage_instruments = self.stage_instruments(stage);
        if stage_instruments.is_empty() {
            return Ok(());
        }

        let initial = curves.get_all_dofs(stage);
        let baseline = curves.clone();
        let stage_owned = stage.to_vec();

        let residual_fn = |p: &[f64]| -> Vec<f64> {
            let mut trial = baseline.clone();
            if trial.set_all_dofs(&stage_owned, p).is_err() {
                return vec![f64::INFINITY; stage_instruments.len()];
            }
            stage_instruments
                .iter()
                .map(|instrument| match instrument.calc_par_rate(&trial) {
                    Ok(rate) => {
                        let target_quote = prices.get(instrument.name()).unwrap_or(0.0);
                        rate - instrument.quote_to_rate(target_quote)
                    }
                    Err(_) => f64::INFINITY,
                })
                .collect()
        };

        let solved = levenberg_marquardt(&initial, config, residual_fn)?;
        curves.set_all_dofs(stage, &solved)?;
        Ok(())
    }

    /// Run every stage in ascending stage-number order against `prices`,
    /// then build the post-calibration Jacobian and return the full
    /// [`BuildOutput`].
    pub fn build(&self, prices: &PriceLadder, config: &SolverConfig) -> Result<BuildOutput, BuildError> {
        let mut curves = self.initial_curve_map()?;
        for stage in self.stages() {
            self.solve_stage(&mut curves, &stage, prices, config)?;
        }

        let instruments: Vec<Instrument> = self.instruments.iter().map(|(_, i)| i.clone()).collect();
        let jacobian = build_jacobian(&curves, &instruments)?;

        Ok(BuildOutput { curves, instruments, input_prices: prices.clone(), jacobian })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_core::types::{Convention, Dcc, Tenor};

    fn registry() -> ConventionRegistry {
        let mut registry = ConventionRegistry::new();
        let tenor = Tenor::parse("3M").unwrap();
        registry.insert(
            "USD.3M",
            Convention { reset_frequency: tenor.clone(), calculation_frequency: tenor.clone(), payment_frequency: tenor, dcc: Dcc::Act360 },
        );
        registry
    }

    fn row(name: &str, type_name: &str, curve: &str, length: &str, convention: &str, enabled: &str) -> InstrumentRow {
        InstrumentRow {
            name: name.to_string(),
            type_name: type_name.to_string(),
            curve: curve.to_string(),
            forecast_curve_left: "na".to_string(),
            forecast_curve_right: "na".to_string(),
            discount_curve_left: "na".to_string(),
            discount_curve_right: "na".to_string(),
            convention_left: convention.to_string(),
            convention_right: "na".to_string(),
            start: "E".to_string(),
            length: length.to_string(),
            enabled: enabled.to_string(),
        }
    }

    #[test]
    fn single_curve_single_stage_calibrates_to_quoted_par_rates() {
        let eval_date = Date::from_excel(42000).unwrap();
        let mut builder = CurveBuilder::new(eval_date, InterpolationMode::LinearLogDf);
        let conventions = registry();

        builder.add_row(&row("USD.3M.DEP", "Deposit", "USD.OIS", "3M", "USD.3M", "Y"), &conventions).unwrap();
        builder.add_row(&row("USD.6M.DEP", "Deposit", "USD.OIS", "6M", "USD.3M", "Y"), &conventions).unwrap();
        builder.add_row(&row("USD.SKIP", "Deposit", "USD.OIS", "9M", "USD.3M", "N"), &conventions).unwrap();
        builder.set_curve_properties("USD.OIS", InterpolationMode::LinearLogDf, 0);

        let prices = PriceLadder::from_table(&[("USD.3M.DEP".to_string(), 2.0), ("USD.6M.DEP".to_string(), 2.2)]);
        let output = builder.build(&prices, &SolverConfig::default()).unwrap();

        assert_eq!(output.instruments.len(), 2);
        let repriced = output.reprice().unwrap();
        assert!((repriced.get("USD.3M.DEP").unwrap() - 2.0).abs() < 1e-6);
        assert!((repriced.get("USD.6M.DEP").unwrap() - 2.2).abs() < 1e-6);
        assert_eq!(output.jacobian.nrows(), 2);
        assert_eq!(output.jacobian.ncols(), 2);
    }

    #[test]
    fn curves_with_no_properties_row_default_to_stage_zero() {
        let eval_date = Date::from_excel(42000).unwrap();
        let mut builder = CurveBuilder::new(eval_date, InterpolationMode::LinearLogDf);
        let conventions = registry();
        builder.add_row(&row("USD.3M.DEP", "Deposit", "USD.OIS", "3M", "USD.3M", "Y"), &conventions).unwrap();

        let prices = PriceLadder::from_table(&[("USD.3M.DEP".to_string(), 2.0)]);
        let output = builder.build(&prices, &SolverConfig::default()).unwrap();
        assert_eq!(output.instruments.len(), 1);
    }

    #[test]
    fn later_stages_solve_after_earlier_ones_in_ascending_order() {
        let eval_date = Date::from_excel(42000).unwrap();
        let mut builder = CurveBuilder::new(eval_date, InterpolationMode::LinearLogDf);
        let conventions = registry();
        builder.add_row(&row("USD.OIS.3M.DEP", "Deposit", "USD.OIS", "3M", "USD.3M", "Y"), &conventions).unwrap();
        builder.add_row(&row("USD.LIB.3M.DEP", "Deposit", "USD.LIBOR", "3M", "USD.3M", "Y"), &conventions).unwrap();
        builder.set_curve_properties("USD.OIS", InterpolationMode::LinearLogDf, 0);
        builder.set_curve_properties("USD.LIBOR", InterpolationMode::LinearLogDf, 1);

        let prices = PriceLadder::from_table(&[("USD.OIS.3M.DEP".to_string(), 2.0), ("USD.LIB.3M.DEP".to_string(), 2.5)]);
        let output = builder.build(&prices, &SolverConfig::default()).unwrap();
        let repriced = output.reprice().unwrap();
        assert!((repriced.get("USD.OIS.3M.DEP").unwrap() - 2.0).abs() < 1e-6);
        assert!((repriced.get("USD.LIB.3M.DEP").unwrap() - 2.5).abs() < 1e-6);
    }
}
