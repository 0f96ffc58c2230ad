//! Regex-selected bump scenarios against a calibrated [`BuildOutput`],
//! with an unbounded memoisation cache keyed by the selected instruments
//! and bump size.

use std::cell::RefCell;
use std::collections::HashMap;

use curve_builder::{BuildOutput, CurveBuilder, SolverConfig};
use curve_model::CurveMap;
use nalgebra::DVector;

use crate::bump_type::BumpType;
use crate::error::RiskError;

/// Pseudo-inverse singular-value cutoff; singular values below this
/// fraction of the largest are treated as zero.
const PINV_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    instruments: Vec<String>,
    bump_bits: u64,
    bump_type: BumpType,
}

/// Drives bump-and-reprice scenarios against a calibration result.
///
/// Never mutates `output`'s curve map: every bumped result is a fresh
/// deep copy, built either by re-running [`CurveBuilder::build`] or by
/// perturbing the calibrated DOFs along the Jacobian's pseudo-inverse.
pub struct RiskCalculator<'a> {
    builder: &'a CurveBuilder,
    output: &'a BuildOutput,
    solver_config: SolverConfig,
    cache: RefCell<HashMap<CacheKey, CurveMap<f64>>>,
}

impl<'a> RiskCalculator<'a> {
    /// A calculator over `output`, re-solving through `builder` with
    /// `solver_config` whenever [`BumpType::FullRebuild`] is requested.
    pub fn new(builder: &'a CurveBuilder, output: &'a BuildOutput, solver_config: SolverConfig) -> Self {
        Self { builder, output, solver_config, cache: RefCell::new(HashMap::new()) }
    }

    /// The sorted subset of input-price keys matching `pattern`. Fails if
    /// nothing matches.
    pub fn find_instruments(&self, pattern: &str) -> Result<Vec<String>, RiskError> {
        let mut matches = self.output.input_prices.filter(pattern)?;
        if matches.is_empty() {
            return Err(RiskError::NoMatchingInstruments { pattern: pattern.to_string() });
        }
        matches.sort();
        Ok(matches)
    }

    /// Bump the named instruments by `bump` and return the resulting
    /// curve map, computed per `bump_type`. Memoised by
    /// `(sorted instrument names, bump, bump_type)`; never mutates
    /// `self.output`'s curves.
    pub fn get_bumped_curvemap(&self, instruments: &[String], bump: f64, bump_type: BumpType) -> Result<CurveMap<f64>, RiskError> {
        let mut sorted_instruments = instruments.to_vec();
        sorted_instruments.sort();
        let key = CacheKey { instruments: sorted_instruments, bump_bits: bump.to_bits(), bump_type };

        if let Some(cached) = self.cache.borrow().get(&key) {
            return Ok(cached.clone());
        }

        let curves = match bump_type {
            BumpType::FullRebuild => self.full_rebuild(&key.instruments, bump)?,
            BumpType::JacobianRebuild => self.jacobian_rebuild(&key.instruments, bump)?,
        };

        self.cache.borrow_mut().insert(key, curves.clone());
        Ok(curves)
    }

    fn full_rebuild(&self, instruments: &[String], bump: f64) -> Result<CurveMap<f64>, RiskError> {
        let mut prices = self.output.input_prices.clone();
        for instrument in &self.output.instruments {
            if instruments.iter().any(|name| name == instrument.name()) {
                let base_price = prices.get(instrument.name()).unwrap_or(0.0);
                prices.insert(instrument.name().to_string(), base_price + bump * instrument.drdp());
            }
        }
        let rebuilt = self.builder.build(&prices, &self.solver_config)?;
        Ok(rebuilt.curves)
    }

    fn jacobian_rebuild(&self, instruments: &[String], bump: f64) -> Result<CurveMap<f64>, RiskError> {
        let mut b = DVector::zeros(self.output.instruments.len());
        for (col, instrument) in self.output.instruments.iter().enumerate() {
            if instruments.iter().any(|name| name == instrument.name()) {
                b[col] = bump;
            }
        }

        let pinv = self
            .output
            .jacobian
            .clone()
            .pseudo_inverse(PINV_EPSILON)
            .map_err(|_| RiskError::PseudoInverseFailed)?;
        let delta = pinv.transpose() * &b;

        let mut curves = self.output.curves.clone();
        let all_ids: Vec<String> = curves.keys().cloned().collect();
        let mut dofs = curves.get_all_dofs(&all_ids);
        for (dof, delta_i) in dofs.iter_mut().zip(delta.iter()) {
            *dof += *delta_i;
        }
        curves.set_all_dofs(&all_ids, &dofs)?;
        Ok(curves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_core::types::{ConventionRegistry, Convention, Dcc, Date, Tenor};
    use curve_instruments::PriceLadder;
    use curve_model::InterpolationMode;

    fn registry() -> ConventionRegistry {
        let mut registry = ConventionRegistry::new();
        let tenor = Tenor::parse("3M").unwrap();
        registry.insert(
            "USD.3M",
            Convention { reset_frequency: tenor.clone(), calculation_frequency: tenor.clone(), payment_frequency: tenor, dcc: Dcc::Act360 },
        );
        registry
    }

    fn row(name: &str, length: &str) -> curve_builder::InstrumentRow {
        curve_builder::InstrumentRow {
            name: name.to_string(),
            type_name: "Deposit".to_string(),
            curve: "USD.OIS".to_string(),
            forecast_curve_left: "na".to_string(),
            forecast_curve_right: "na".to_string(),
            discount_curve_left: "na".to_string(),
            discount_curve_right: "na".to_string(),
            convention_left: "USD.3M".to_string(),
            convention_right: "na".to_string(),
            start: "E".to_string(),
            length: length.to_string(),
            enabled: "Y".to_string(),
        }
    }

    fn setup() -> (CurveBuilder, BuildOutput) {
        let eval_date = Date::from_excel(42000).unwrap();
        let mut builder = CurveBuilder::new(eval_date, InterpolationMode::LinearLogDf);
        let conventions = registry();
        builder.add_row(&row("USD.3M.DEP", "3M"), &conventions).unwrap();
        builder.add_row(&row("USD.6M.DEP", "6M"), &conventions).unwrap();
        builder.set_curve_properties("USD.OIS", InterpolationMode::LinearLogDf, 0);

        let prices = PriceLadder::from_table(&[("USD.3M.DEP".to_string(), 2.0), ("USD.6M.DEP".to_string(), 2.2)]);
        let output = builder.build(&prices, &SolverConfig::default()).unwrap();
        (builder, output)
    }

    #[test]
    fn find_instruments_sorts_and_rejects_empty_match() {
        let (builder, output) = setup();
        let calc = RiskCalculator::new(&builder, &output, SolverConfig::default());
        let matches = calc.find_instruments(r"^USD\.").unwrap();
        assert_eq!(matches, vec!["USD.3M.DEP".to_string(), "USD.6M.DEP".to_string()]);
        assert!(matches!(calc.find_instruments("ZZZ").unwrap_err(), RiskError::NoMatchingInstruments { .. }));
    }

    #[test]
    fn full_and_jacobian_rebuild_track_each_other_for_small_bumps() {
        let (builder, output) = setup();
        let calc = RiskCalculator::new(&builder, &output, SolverConfig::default());
        let bump = 1e-5;

        let full = calc.get_bumped_curvemap(&["USD.3M.DEP".to_string()], bump, BumpType::FullRebuild).unwrap();
        let jacobian = calc.get_bumped_curvemap(&["USD.3M.DEP".to_string()], bump, BumpType::JacobianRebuild).unwrap();

        for id in full.keys() {
            let full_dofs = full[id.as_str()].get_all_dofs();
            let jacobian_dofs = jacobian[id.as_str()].get_all_dofs();
            for (a, b) in full_dofs.iter().zip(jacobian_dofs.iter()) {
                let divergence = (a - b).abs();
                assert!(divergence < bump.abs() * 0.01, "divergence {divergence} too large for bump {bump}");
            }
        }
    }

    #[test]
    fn bumped_curvemap_is_cached_by_instruments_and_bump() {
        let (builder, output) = setup();
        let calc = RiskCalculator::new(&builder, &output, SolverConfig::default());
        let instruments = vec!["USD.3M.DEP".to_string()];
        calc.get_bumped_curvemap(&instruments, 1e-5, BumpType::JacobianRebuild).unwrap();
        assert_eq!(calc.cache.borrow().len(), 1);
        calc.get_bumped_curvemap(&instruments, 1e-5, BumpType::JacobianRebuild).unwrap();
        assert_eq!(calc.cache.borrow().len(), 1);
    }

    #[test]
    fn jacobian_rebuild_does_not_mutate_the_original_curvemap() {
        let (builder, output) = setup();
        let before = output.curves.clone();
        let calc = RiskCalculator::new(&builder, &output, SolverConfig::default());
        calc.get_bumped_curvemap(&["USD.3M.DEP".to_string()], 1e-4, BumpType::JacobianRebuild).unwrap();
        for id in before.keys() {
            assert_eq!(before[id.as_str()].get_all_dofs(), output.curves[id.as_str()].get_all_dofs());
        }
    }
}
